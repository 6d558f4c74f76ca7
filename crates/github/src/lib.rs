//! GitHub Projects v2 backend for cardstack.
//!
//! # Overview
//!
//! - [`GitHubClient`]: octocrab wrapper with a typed GraphQL helper
//! - [`GitHubBackend`]: a [`Backend`](cardstack_protocol::Backend) that
//!   loads a project as a board and pushes each card change back
//! - [`project`]: queries and item-to-card conversion
//! - [`status`]: mapping between columns and the `Status` field
//! - [`Error`]: Error types for GitHub operations
//!
//! # Authentication
//!
//! The Projects v2 API is GraphQL-only and always needs a token with the
//! `project` scope (`read:project` for read-only use). Tokens are handled
//! as [`secrecy::SecretString`].
//!
//! # Examples
//!
//! ```no_run
//! use secrecy::SecretString;
//! use cardstack_github::{GitHubClient, project::list_projects};
//!
//! # async fn example() -> cardstack_github::Result<()> {
//! let token = SecretString::from("ghp_your_token_here".to_string());
//! let client = GitHubClient::new(Some(token)).await?;
//!
//! for project in list_projects(&client, "acme").await? {
//!     println!("#{} {}", project.number, project.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod client;
pub mod error;
pub mod project;
pub mod status;

pub use backend::GitHubBackend;
pub use client::GitHubClient;
pub use error::{Error, Result};
pub use project::{ProjectSummary, list_projects};
