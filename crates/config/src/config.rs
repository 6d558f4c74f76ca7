//! The [`Config`] struct and its loading logic.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interaction::InteractionConfig;
use crate::persistence::{find_config_file, read_config_file, write_config_file};
use crate::project::ProjectRef;

/// Initial view settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Whether the detail side panel starts open.
    #[serde(default = "default_true")]
    pub show_details: bool,

    /// Whether the archive lane starts visible.
    #[serde(default)]
    pub show_archive: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_details: true,
            show_archive: false,
        }
    }
}

/// Application configuration.
///
/// # Examples
///
/// ```
/// use cardstack_config::{Config, ProjectRef};
///
/// let config = Config {
///     github_project: Some(ProjectRef::new("acme", 3)),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// assert!(config.display.show_details);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// GitHub token used for the remote backend.
    ///
    /// If not set, `GITHUB_TOKEN` and then the `gh` CLI are tried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,

    /// Remote board to open instead of a local file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_project: Option<ProjectRef>,

    /// Pointer drag tuning.
    #[serde(default)]
    pub interaction: InteractionConfig,

    /// Initial view settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Loads configuration from the default file locations.
    ///
    /// Returns the defaults if no file is found.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is found but cannot be read, parsed or
    /// validated.
    pub async fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads and validates configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an interaction setting is out of range.
    pub fn validate(&self) -> Result<()> {
        self.interaction.validate()
    }
}
