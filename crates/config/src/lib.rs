//! Configuration management for cardstack.
//!
//! # Overview
//!
//! - [`config`]: [`Config`], loading and saving
//! - [`project`]: [`ProjectRef`], a GitHub Projects v2 reference with flexible parsing
//! - [`interaction`]: [`InteractionConfig`], drag escalation tuning
//! - [`auth`]: GitHub token resolution
//! - [`persistence`]: config file lookup, reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources
//!
//! The first file found wins:
//!
//! 1. Local: `./cardstack.json5` or `./cardstack.json`
//! 2. User: `<config_dir>/cardstack/config.json5` or `<config_dir>/cardstack/config.json`
//! 3. Built-in defaults
//!
//! Command-line flags are applied on top by the binary.
//!
//! # File Format
//!
//! ```json5
//! {
//!   // Either "owner/number" or an object
//!   github_project: { owner: "acme", repo: "api", number: 7 },
//!   interaction: { drag_delay_ms: 200, drag_threshold: 9 },
//!   display: { show_details: false },
//! }
//! ```
//!
//! # Token Resolution
//!
//! 1. `github_token` from config
//! 2. `GITHUB_TOKEN` environment variable
//! 3. `gh auth token` command (GitHub CLI)
//! 4. Unauthenticated
//!
//! # Examples
//!
//! ```no_run
//! use cardstack_config::Config;
//!
//! # async fn example() -> cardstack_config::Result<()> {
//! let config = Config::load().await?;
//! println!("Drag starts after {} ms", config.interaction.drag_delay_ms);
//! if let Some(project) = &config.github_project {
//!     println!("Remote board: {}", project.url());
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod interaction;
pub mod persistence;
pub mod project;

pub use config::{Config, DisplayConfig};
pub use error::{ConfigError, Result};
pub use interaction::InteractionConfig;
pub use project::ProjectRef;
