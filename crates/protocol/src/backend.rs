//! The persistence backend contract.
//!
//! A [`Backend`] loads a [`Board`] at startup and receives every change the
//! user makes afterwards. Local backends persist by rewriting the whole
//! board on [`save_board`](Backend::save_board); remote backends make each
//! change durable as it happens and treat a full save as a no-op.
//!
//! All methods are async so that remote backends can perform network
//! round-trips. The application awaits each call before handling the next
//! input event.

use async_trait::async_trait;

use crate::board::Board;
use crate::card::{Card, CardId};
use crate::error::BackendError;

/// A source and sink for one board.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use cardstack_protocol::{Backend, BackendError, Board, CardId};
///
/// #[derive(Debug)]
/// struct Scratch;
///
/// #[async_trait]
/// impl Backend for Scratch {
///     fn describe(&self) -> String {
///         "scratch board".to_string()
///     }
///
///     async fn load_board(&self) -> Result<Board, BackendError> {
///         Ok(Board::with_default_columns("Scratch"))
///     }
///
///     async fn save_board(&self, _board: &Board) -> Result<(), BackendError> {
///         Ok(())
///     }
///
///     async fn move_card(&self, _card: &CardId, _column: &str) -> Result<(), BackendError> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Backend: Send + Sync + std::fmt::Debug {
    /// A short human-readable description, shown in the status bar.
    fn describe(&self) -> String;

    /// Returns `true` if changes must be pushed to a remote service one by
    /// one instead of being written with a full save.
    fn is_remote(&self) -> bool {
        false
    }

    /// Loads the board.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Load`] if the source is missing, unreadable,
    /// or malformed.
    async fn load_board(&self) -> Result<Board, BackendError>;

    /// Persists the whole board.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Save`] if the board cannot be written.
    async fn save_board(&self, board: &Board) -> Result<(), BackendError>;

    /// Records that a card now belongs to `column`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Remote`] if the remote service rejects the
    /// change.
    async fn move_card(&self, card_id: &CardId, column: &str) -> Result<(), BackendError>;

    /// Records a newly created card.
    ///
    /// Returns the identifier the backend assigned, if it differs from the
    /// local one.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Remote`] if the remote service rejects it.
    async fn create_card(&self, _card: &Card) -> Result<Option<CardId>, BackendError> {
        Ok(None)
    }

    /// Records a changed title or description.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Remote`] if the remote service rejects it.
    async fn update_card(&self, _card: &Card) -> Result<(), BackendError> {
        Ok(())
    }

    /// Records a deleted card.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Remote`] if the remote service rejects it.
    async fn delete_card(&self, _card_id: &CardId) -> Result<(), BackendError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Minimal;

    #[async_trait]
    impl Backend for Minimal {
        fn describe(&self) -> String {
            "minimal".to_string()
        }

        async fn load_board(&self) -> Result<Board, BackendError> {
            Err(BackendError::load("nothing here"))
        }

        async fn save_board(&self, _board: &Board) -> Result<(), BackendError> {
            Ok(())
        }

        async fn move_card(&self, _card_id: &CardId, _column: &str) -> Result<(), BackendError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn default_methods_are_local_noops() {
        let backend: Box<dyn Backend> = Box::new(Minimal);
        let card = Card::new("Title", "TODO");

        assert!(!backend.is_remote());
        assert_eq!(backend.create_card(&card).await.unwrap(), None);
        assert!(backend.update_card(&card).await.is_ok());
        assert!(backend.delete_card(&card.id).await.is_ok());
    }

    #[tokio::test]
    async fn load_errors_surface_as_load_variant() {
        let err = Minimal.load_board().await.unwrap_err();
        assert!(matches!(err, BackendError::Load(_)));
    }
}
