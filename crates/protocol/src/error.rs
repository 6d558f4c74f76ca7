//! Error types for the cardstack-protocol crate.
//!
//! [`ProtocolError`] covers violations of the board model's rules, while
//! [`BackendError`] is the error contract every persistence backend reports
//! through.

use thiserror::Error;

use crate::card::CardId;

/// Errors that can occur when manipulating a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// A card with the given ID was not found.
    #[error("card not found: {0}")]
    CardNotFound(CardId),

    /// The named column does not exist on the board.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// Two cards share the same identifier.
    #[error("duplicate card id: {0}")]
    DuplicateCard(CardId),

    /// Two columns share the same name.
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A board must have at least one column.
    #[error("a board needs at least one column")]
    NoColumns,

    /// A card title was empty or invalid.
    #[error("invalid card title: title cannot be empty")]
    InvalidCardTitle,

    /// The board's column lists and card map disagree.
    #[error("board invariant violated: {0}")]
    InvariantViolated(String),
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// A boxed error coming from a backend implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors reported by a persistence backend.
///
/// The variants mirror the three calls a backend serves: loading a board,
/// saving it, and pushing a single card change to a remote service.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The board source is missing, unreadable, or malformed.
    #[error("failed to load board: {0}")]
    Load(#[source] BoxError),

    /// The board could not be written back.
    #[error("failed to save board: {0}")]
    Save(#[source] BoxError),

    /// A remote call (move, create, update, delete) failed.
    #[error("remote update failed: {0}")]
    Remote(#[source] BoxError),
}

impl BackendError {
    /// Wraps an error as a [`BackendError::Load`].
    pub fn load(err: impl Into<BoxError>) -> Self {
        Self::Load(err.into())
    }

    /// Wraps an error as a [`BackendError::Save`].
    pub fn save(err: impl Into<BoxError>) -> Self {
        Self::Save(err.into())
    }

    /// Wraps an error as a [`BackendError::Remote`].
    pub fn remote(err: impl Into<BoxError>) -> Self {
        Self::Remote(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ProtocolError::InvalidCardTitle;
        assert_eq!(err.to_string(), "invalid card title: title cannot be empty");

        let err = ProtocolError::CardNotFound(CardId::new("42"));
        assert_eq!(err.to_string(), "card not found: 42");

        let err = ProtocolError::ColumnNotFound("LIMBO".to_string());
        assert_eq!(err.to_string(), "column not found: LIMBO");
    }

    #[test]
    fn backend_error_keeps_source_message() {
        let err = BackendError::save("disk full");
        assert_eq!(err.to_string(), "failed to save board: disk full");
        assert!(std::error::Error::source(&err).is_some());

        let err = BackendError::remote(std::io::Error::other("timeout"));
        assert!(matches!(err, BackendError::Remote(_)));
        assert_eq!(err.to_string(), "remote update failed: timeout");
    }
}
