//! Error types for GitHub API operations.

/// Errors that can occur while talking to GitHub.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error occurred while calling the GitHub API.
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// The GraphQL endpoint answered with errors.
    #[error("GraphQL error: {message}")]
    GraphQl {
        /// All error messages, joined with `; `.
        message: String,
    },

    /// The GraphQL response had neither data nor errors.
    #[error("GraphQL response contained no data")]
    MissingData,

    /// Token validation failed.
    #[error("token validation failed: {reason}")]
    TokenValidation {
        /// A description of why validation failed.
        reason: String,
    },

    /// Neither a user nor an organization owns the requested project.
    #[error("project {owner}/{number} not found")]
    ProjectNotFound {
        /// The owner login that was searched.
        owner: String,
        /// The project number that was searched.
        number: u64,
    },

    /// The project has no single-select `Status` field.
    #[error("project has no Status field")]
    NoStatusField,

    /// The project's `Status` field has no option for a column.
    #[error("no Status option '{status}' for column {column}")]
    UnknownStatus {
        /// The board column.
        column: String,
        /// The Status option name it maps to.
        status: String,
    },

    /// The project's items do not form a valid board.
    #[error("project cannot be shown as a board: {0}")]
    Board(#[from] cardstack_protocol::ProtocolError),

    /// A card has no remote content that could be edited.
    #[error("card {0} is not a project item known to this board")]
    UnknownItem(String),
}

/// A specialized Result type for GitHub API operations.
pub type Result<T> = std::result::Result<T, Error>;
