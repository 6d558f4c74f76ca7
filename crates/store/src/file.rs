//! Board file reading and writing.
//!
//! Boards are stored as YAML. Columns are listed by name in display order;
//! cards are a flat list written column by column, so the order of cards
//! inside a column survives a save and reload.
//!
//! ```yaml
//! name: My Project
//! description: A sample Kanban board
//! columns:
//!   - name: TODO
//!   - name: DONE
//! cards:
//!   - id: "1"
//!     title: Fix login flow
//!     column: TODO
//!     created_at: 2025-01-01T00:00:00Z
//!     modified_at: 2025-01-02T00:00:00Z
//! created_at: 2025-01-01T00:00:00Z
//! modified_at: 2025-01-02T00:00:00Z
//! ```

use std::path::{Path, PathBuf};

use cardstack_protocol::{Board, Card};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StoreError};

/// File name marking a directory as a cardstack project.
pub const BOARD_FILE_NAME: &str = ".cardstack.yaml";

#[derive(Debug, Serialize, Deserialize)]
struct ColumnEntry {
    name: String,
}

/// On-disk shape of a board.
#[derive(Debug, Serialize, Deserialize)]
struct BoardFile {
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    columns: Vec<ColumnEntry>,
    #[serde(default)]
    cards: Vec<Card>,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    modified_at: DateTime<Utc>,
}

impl From<&Board> for BoardFile {
    fn from(board: &Board) -> Self {
        Self {
            name: board.name.clone(),
            description: board.description.clone(),
            url: board.url.clone(),
            columns: board
                .columns()
                .iter()
                .map(|c| ColumnEntry {
                    name: c.name().to_string(),
                })
                .collect(),
            cards: board.cards().cloned().collect(),
            created_at: board.created_at,
            modified_at: board.modified_at,
        }
    }
}

impl BoardFile {
    fn into_board(self, path: &Path) -> Result<Board> {
        let mut board = Board::from_cards(
            self.name,
            self.columns.into_iter().map(|c| c.name),
            self.cards,
        )
        .map_err(|source| StoreError::InvalidBoard {
            path: path.to_path_buf(),
            source,
        })?;
        board.description = self.description;
        board.url = self.url;
        board.created_at = self.created_at;
        board.modified_at = self.modified_at;
        Ok(board)
    }
}

/// Parses board YAML.
///
/// `path` is only used for error messages.
///
/// # Errors
///
/// Returns [`StoreError::Parse`] for malformed YAML and
/// [`StoreError::InvalidBoard`] for duplicate identifiers or columns.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use cardstack_store::file::parse_board;
///
/// let yaml = "name: Demo\ncolumns:\n  - name: TODO\n  - name: DONE\n";
/// let board = parse_board(yaml, Path::new("inline")).unwrap();
/// assert_eq!(board.name, "Demo");
/// assert_eq!(board.columns().len(), 2);
/// ```
pub fn parse_board(content: &str, path: &Path) -> Result<Board> {
    let file: BoardFile = serde_yaml_ng::from_str(content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    file.into_board(path)
}

/// Renders a board as YAML.
///
/// # Errors
///
/// Returns [`StoreError::Serialize`] if serialization fails.
pub fn render_board(board: &Board) -> Result<String> {
    serde_yaml_ng::to_string(&BoardFile::from(board)).map_err(StoreError::Serialize)
}

/// Reads and parses a board file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid board.
pub fn read_board(path: impl AsRef<Path>) -> Result<Board> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| StoreError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    let board = parse_board(&content, path)?;
    debug!(path = %path.display(), cards = board.len(), "read board file");
    Ok(board)
}

/// Writes a board file.
///
/// The content goes to a sibling temporary file first and is then renamed
/// over the target, so a failed write never leaves a truncated board.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written.
pub fn write_board(path: impl AsRef<Path>, board: &Board) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source| StoreError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.exists())
    {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let content = render_board(board)?;
    let temp = temp_path(path);
    std::fs::write(&temp, content).map_err(write_err)?;
    std::fs::rename(&temp, path).map_err(write_err)?;
    debug!(path = %path.display(), cards = board.len(), "wrote board file");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
