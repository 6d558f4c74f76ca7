//! Error types for local board storage.

use std::path::PathBuf;

use cardstack_protocol::ProtocolError;

/// Errors that can occur while reading or writing board files.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to read a board file.
    #[error("failed to read board file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a board file.
    #[error("failed to write board file at {path}: {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid board YAML.
    #[error("failed to parse board YAML at {path}: {source}")]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// The underlying YAML error.
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// The board could not be serialized.
    #[error("failed to serialize board: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    /// The file parsed but describes an inconsistent board.
    #[error("invalid board in {path}: {source}")]
    InvalidBoard {
        /// The file being loaded.
        path: PathBuf,
        /// What is wrong with the board.
        #[source]
        source: ProtocolError,
    },

    /// The card to move does not exist in the file.
    #[error("card {0} not found in board file")]
    CardNotFound(String),
}

/// A specialized Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_path() {
        let err = StoreError::ReadFile {
            path: PathBuf::from("/tmp/board.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read board file at /tmp/board.yaml: missing"
        );
    }

    #[test]
    fn invalid_board_wraps_protocol_error() {
        let err = StoreError::InvalidBoard {
            path: PathBuf::from("b.yaml"),
            source: ProtocolError::NoColumns,
        };
        assert!(err.to_string().contains("a board needs at least one column"));
    }
}
