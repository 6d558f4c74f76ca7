//! Terminal UI for cardstack.
//!
//! A Ratatui board of columns and stacked cards, driven by keyboard and
//! mouse. Cards are picked up by holding or dragging the pointer and
//! dropped between other cards; the result is handed to a
//! [`Backend`](cardstack_protocol::Backend) for persistence.
//!
//! # Overview
//!
//! - [`app`]: [`App`], message dispatch, persistence queue and run loop
//! - [`state`]: selection and view state
//! - [`layout`]: screen regions derived from the terminal size
//! - [`geometry`]: pointer position to card and drop slot
//! - [`gesture`]: press, hold, drag and release tracking
//! - [`form`]: create/edit card form state
//! - [`event`]: terminal events to [`Message`](cardstack_protocol::Message)s
//! - [`terminal`]: terminal setup, teardown and panic handling
//! - [`widgets`]: rendering
//!
//! # Example
//!
//! ```no_run
//! use cardstack_config::Config;
//! use cardstack_store::LocalBackend;
//! use cardstack_tui::{App, terminal};
//! use cardstack_protocol::Backend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = LocalBackend::new(".cardstack.yaml");
//!     let board = backend.load_board().await?;
//!
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let mut app = App::new(board, Some(Box::new(backend)), &Config::default());
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod event;
pub mod form;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod state;
pub mod terminal;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

pub use app::{App, SyncOp};
pub use state::{AppState, StatusMessage, View};
