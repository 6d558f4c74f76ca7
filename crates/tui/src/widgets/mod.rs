//! Widget components for the cardstack TUI.
//!
//! Each widget is a function rendering borrowed state into a
//! [`Buffer`](ratatui::buffer::Buffer), so it can be tested without a
//! terminal.
//!
//! # Modules
//!
//! - [`board`]: title bar, column headers and card stacks
//! - [`card`]: a single card
//! - [`detail`]: the detail side panel
//! - [`form`]: the create/edit card overlay
//! - [`help`]: the key binding overlay
//! - [`projects`]: the project list screen
//! - [`status_bar`]: the footer with hints or the last status message
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use cardstack_protocol::sample::sample_board;
//! use cardstack_tui::widgets;
//!
//! let board = sample_board(Utc::now());
//! let area = Rect::new(0, 0, 80, 24);
//! let mut buf = Buffer::empty(area);
//!
//! widgets::render_title_bar(&board, area, &mut buf);
//! ```

pub mod board;
pub mod card;
pub mod detail;
pub mod form;
pub mod help;
pub mod projects;
pub mod status_bar;

pub use board::{BoardFrame, render_board, render_title_bar};
pub use card::{CardStyle, render_card};
pub use detail::{format_date, label_color, render_detail_panel};
pub use form::render_form;
pub use help::render_help_overlay;
pub use projects::render_project_list;
pub use status_bar::{StatusContext, render_status_bar};

#[cfg(test)]
mod tests;
