//! Local board storage for cardstack.
//!
//! # Overview
//!
//! - [`file`]: YAML board file format, reading and writing
//! - [`local`]: [`LocalBackend`], the file-backed [`Backend`](cardstack_protocol::Backend)
//! - [`discover`]: scanning a directory tree for board files
//! - [`error`]: Error types for storage operations
//!
//! A directory is a project when it contains a [`BOARD_FILE_NAME`] file.

pub mod discover;
pub mod error;
pub mod file;
pub mod local;

pub use discover::{MAX_SCAN_DEPTH, Project, scan_projects};
pub use error::{Result, StoreError};
pub use file::{BOARD_FILE_NAME, read_board, write_board};
pub use local::LocalBackend;
