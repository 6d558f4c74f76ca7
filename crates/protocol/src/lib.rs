//! Shared protocol types for the cardstack application.
//!
//! This crate defines the board model used across all cardstack components:
//! cards, columns, the reorder engine that moves cards around, the contract
//! persistence backends implement, and the TUI message enum.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`card`]: Card identifiers and the `Card` struct
//! - [`board`]: Columns and the `Board` that owns all cards
//! - [`reorder`]: Moving a card within or across columns
//! - [`backend`]: The async `Backend` trait for loading and saving boards
//! - [`message`]: TUI event messages
//! - [`sample`]: A sample board for first runs
//! - [`error`]: Error types for protocol and backend operations
//!
//! # Examples
//!
//! Creating a board and moving a card between columns:
//!
//! ```
//! use chrono::Utc;
//! use cardstack_protocol::{Board, CardMove};
//!
//! let mut board = Board::with_default_columns("Release");
//! let id = board.create_card("TODO", "Tag v1.0", "", Utc::now()).unwrap();
//!
//! let placed = board
//!     .move_card(&CardMove::new("TODO", 0, "PROGRESS", 0), Utc::now())
//!     .unwrap();
//!
//! assert_eq!(placed.card_id, id);
//! assert_eq!(board.card(&id).unwrap().column, "PROGRESS");
//! ```

pub mod backend;
pub mod board;
pub mod card;
pub mod error;
pub mod message;
pub mod reorder;
pub mod sample;

// Re-export primary types at crate root for convenience
pub use backend::Backend;
pub use board::{ARCHIVE_COLUMN, Board, Column, DEFAULT_COLUMNS};
pub use card::{Card, CardId};
pub use error::{BackendError, BoxError, ProtocolError, Result};
pub use message::Message;
pub use reorder::{CardMove, Placement};
