//! GitHub API client.
//!
//! [`GitHubClient`] wraps octocrab and adds a typed GraphQL helper, which
//! is all the Projects v2 API offers.

use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};

/// GitHub API client with optional authentication.
///
/// Tokens are held as [`SecretString`] until handed to octocrab, so they
/// never show up in debug output.
///
/// # Examples
///
/// ```no_run
/// use secrecy::SecretString;
/// use cardstack_github::GitHubClient;
///
/// # async fn example() -> cardstack_github::Result<()> {
/// let token = SecretString::from("ghp_your_token".to_string());
/// let client = GitHubClient::new(Some(token)).await?;
/// println!("Token valid: {}", client.validate_token().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GitHubClient {
    inner: Octocrab,
    authenticated: bool,
}

/// The envelope every GraphQL response comes in.
#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub(crate) struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl<T> GraphQlResponse<T> {
    /// Returns the data, or the errors if there is no data.
    ///
    /// Partial data is accepted: a user lookup on an organization login
    /// returns `null` plus an error, and callers treat the `null` as absent.
    pub(crate) fn into_data(self) -> Result<T> {
        match (self.data, self.errors.is_empty()) {
            (Some(data), _) => {
                for error in &self.errors {
                    debug!(message = %error.message, "GraphQL returned partial error");
                }
                Ok(data)
            }
            (None, false) => Err(Error::GraphQl {
                message: self
                    .errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; "),
            }),
            (None, true) => Err(Error::MissingData),
        }
    }
}

impl GitHubClient {
    /// Creates a new GitHub client.
    ///
    /// Without a token the client is unauthenticated; the Projects v2 API
    /// will then reject every call.
    ///
    /// # Errors
    ///
    /// Returns an error if the octocrab client fails to initialize.
    #[instrument(skip(token), fields(authenticated = token.is_some()))]
    pub async fn new(token: Option<SecretString>) -> Result<Self> {
        let (inner, authenticated) = match token {
            Some(token) => {
                debug!("creating authenticated GitHub client");
                let client = Octocrab::builder()
                    .personal_token(token.expose_secret())
                    .build()?;
                (client, true)
            }
            None => {
                debug!("creating unauthenticated GitHub client");
                (Octocrab::builder().build()?, false)
            }
        };

        Ok(Self {
            inner,
            authenticated,
        })
    }

    /// Validates the current token by calling the `/user` endpoint.
    ///
    /// Returns `Ok(false)` without a network call if there is no token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenValidation`] if the token is rejected and
    /// [`Error::Api`] for other API errors.
    #[instrument(skip(self))]
    pub async fn validate_token(&self) -> Result<bool> {
        if !self.authenticated {
            return Ok(false);
        }

        match self.inner.current().user().await {
            Ok(user) => {
                debug!(login = %user.login, "token validated successfully");
                Ok(true)
            }
            Err(octocrab::Error::GitHub { source, .. }) => {
                warn!(message = %source.message, "token validation failed");
                Err(Error::TokenValidation {
                    reason: source.message,
                })
            }
            Err(e) => {
                warn!(error = %e, "API error during token validation");
                Err(Error::Api(e))
            }
        }
    }

    /// Returns whether this client was created with a token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Runs a GraphQL query or mutation and decodes its `data`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] for transport or decoding failures and
    /// [`Error::GraphQl`] if GitHub reports errors without data.
    pub async fn graphql<T>(&self, query: &str, variables: serde_json::Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let payload = serde_json::json!({ "query": query, "variables": variables });
        let response: GraphQlResponse<T> = self.inner.graphql(&payload).await?;
        response.into_data()
    }
}
