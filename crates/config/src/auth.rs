//! GitHub token resolution.
//!
//! Tokens are looked up in this order:
//!
//! 1. Global `github_token` from config
//! 2. `GITHUB_TOKEN` environment variable
//! 3. `gh auth token` command (GitHub CLI)
//! 4. Unauthenticated (returns `None`)

use tracing::debug;

use crate::error::{ConfigError, Result};

/// Environment variable consulted when the config has no token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Resolves the GitHub token to use.
///
/// Failures of the `gh` CLI are logged and treated as "no token".
///
/// # Examples
///
/// ```no_run
/// use cardstack_config::auth::resolve_token;
///
/// # async fn example() {
/// let token = resolve_token(Some("ghp_configured")).await;
/// assert_eq!(token.as_deref(), Some("ghp_configured"));
/// # }
/// ```
pub async fn resolve_token(config_token: Option<&str>) -> Option<String> {
    if let Some(token) = non_empty(config_token) {
        return Some(token.to_string());
    }

    let env_token = std::env::var(TOKEN_ENV_VAR).ok();
    if let Some(token) = non_empty(env_token.as_deref()) {
        debug!("using GitHub token from {TOKEN_ENV_VAR}");
        return Some(token.to_string());
    }

    match get_gh_token().await {
        Ok(token) => token,
        Err(e) => {
            debug!(error = %e, "gh CLI token lookup failed");
            None
        }
    }
}

fn non_empty(token: Option<&str>) -> Option<&str> {
    token.map(str::trim).filter(|t| !t.is_empty())
}

/// Gets a GitHub token from the `gh` CLI.
///
/// # Returns
///
/// - `Ok(Some(token))` if the command succeeds and prints a token
/// - `Ok(None)` if `gh` is not installed or not logged in
/// - `Err(...)` if the command exists but fails
///
/// # Errors
///
/// Returns an error if `gh` cannot be started or exits unsuccessfully for a
/// reason other than missing credentials.
pub async fn get_gh_token() -> Result<Option<String>> {
    use tokio::process::Command;

    let output = match Command::new("gh").args(["auth", "token"]).output().await {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::GhAuthFailed(e)),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if stderr.contains("not logged in") || stderr.contains("no oauth token") {
            return Ok(None);
        }
        return Err(ConfigError::GhAuthError {
            code: output.status.code(),
            stderr,
        });
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok((!token.is_empty()).then_some(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn config_token_wins() {
        let token = resolve_token(Some("ghp_config")).await;
        assert_eq!(token.as_deref(), Some("ghp_config"));
    }

    #[tokio::test]
    async fn config_token_is_trimmed() {
        let token = resolve_token(Some("  ghp_config\n")).await;
        assert_eq!(token.as_deref(), Some("ghp_config"));
    }

    #[tokio::test]
    async fn blank_config_token_falls_through_without_panicking() {
        // Result depends on the environment and the local gh install.
        let _ = resolve_token(Some("   ")).await;
    }

    #[test]
    fn non_empty_filters_blank_values() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some(" x ")), Some("x"));
    }
}
