//! Backend storing a board in a local YAML file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cardstack_protocol::{Backend, BackendError, Board, CardId, CardMove, sample::sample_board};
use chrono::Utc;
use tracing::{info, instrument};

use crate::error::{Result, StoreError};
use crate::file::{read_board, write_board};

/// A board persisted to a single YAML file.
///
/// Every change is made durable by rewriting the whole file on
/// [`save_board`](Backend::save_board).
///
/// # Examples
///
/// ```no_run
/// use cardstack_protocol::Backend;
/// use cardstack_store::LocalBackend;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new(".cardstack.yaml");
/// let board = backend.load_board().await?;
/// backend.save_board(&board).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LocalBackend {
    path: PathBuf,
}

impl LocalBackend {
    /// Creates a backend for the board file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the board file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the sample board unless the file already exists.
    ///
    /// Returns `true` if a new file was created.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn initialize(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        write_board(&self.path, &sample_board(Utc::now()))?;
        info!("created sample board");
        Ok(true)
    }

    fn move_in_file(&self, card_id: &CardId, column: &str) -> Result<()> {
        let mut board: Board = read_board(&self.path)?;
        let card = board
            .card(card_id)
            .ok_or_else(|| StoreError::CardNotFound(card_id.to_string()))?;
        if card.column == column {
            return Ok(());
        }
        let from_column = card.column.clone();
        let from_index = board
            .column(&from_column)
            .and_then(|c| c.position(card_id))
            .ok_or_else(|| StoreError::CardNotFound(card_id.to_string()))?;
        let request = CardMove::new(from_column, from_index, column, usize::MAX);
        if board.move_card(&request, Utc::now()).is_some() {
            write_board(&self.path, &board)?;
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for LocalBackend {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load_board(&self) -> std::result::Result<Board, BackendError> {
        let board = read_board(&self.path).map_err(BackendError::load)?;
        info!(path = %self.path.display(), cards = board.len(), "loaded board");
        Ok(board)
    }

    async fn save_board(&self, board: &Board) -> std::result::Result<(), BackendError> {
        write_board(&self.path, board).map_err(BackendError::save)
    }

    /// Appends the card to `column` directly in the file.
    ///
    /// The application persists local boards with a full save instead; this
    /// exists for callers that only know the card and its new column.
    async fn move_card(
        &self,
        card_id: &CardId,
        column: &str,
    ) -> std::result::Result<(), BackendError> {
        self.move_in_file(card_id, column)
            .map_err(BackendError::save)
    }
}
