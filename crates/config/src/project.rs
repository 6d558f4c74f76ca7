//! GitHub Projects v2 references with flexible parsing.
//!
//! A [`ProjectRef`] accepts two formats:
//!
//! - Short format: `"owner/number"` or `"owner/repo/number"`
//! - Full format: `{ "owner": "...", "repo": "...", "number": 7 }` object
//!
//! # Examples
//!
//! ```
//! use cardstack_config::ProjectRef;
//!
//! let project: ProjectRef = serde_json::from_str(r#""acme/3""#).unwrap();
//! assert_eq!(project.owner(), "acme");
//! assert_eq!(project.number(), 3);
//!
//! let project: ProjectRef =
//!     serde_json::from_str(r#"{"owner": "acme", "repo": "api", "number": 7}"#).unwrap();
//! assert_eq!(project.to_string(), "acme/api/7");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// A GitHub Projects v2 board owned by a user or an organization.
///
/// The optional repository is informational: projects belong to owners,
/// not repositories, but users often think of them per repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    owner: String,
    repo: Option<String>,
    number: u64,
}

impl ProjectRef {
    /// Creates a reference to project `number` of `owner`.
    #[must_use]
    pub fn new(owner: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: None,
            number,
        }
    }

    /// Sets the associated repository.
    #[must_use]
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    /// Parses `"owner/number"` or `"owner/repo/number"`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProject`] for any other shape, empty
    /// parts, or a number that is not a positive integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardstack_config::ProjectRef;
    ///
    /// let project = ProjectRef::parse_short("microsoft/vscode/2").unwrap();
    /// assert_eq!(project.repo(), Some("vscode"));
    ///
    /// assert!(ProjectRef::parse_short("acme").is_err());
    /// assert!(ProjectRef::parse_short("acme/board").is_err());
    /// ```
    pub fn parse_short(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('/').map(str::trim).collect();
        let (owner, repo, number) = match parts.as_slice() {
            [owner, number] => (*owner, None, *number),
            [owner, repo, number] => (*owner, Some(*repo), *number),
            _ => {
                return Err(ConfigError::InvalidProject(format!(
                    "expected 'owner/number' or 'owner/repo/number', got '{s}'"
                )));
            }
        };

        if owner.is_empty() || repo.is_some_and(str::is_empty) {
            return Err(ConfigError::InvalidProject(format!(
                "owner and repo cannot be empty in '{s}'"
            )));
        }

        let number = number
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                ConfigError::InvalidProject(format!("'{number}' is not a project number"))
            })?;

        let project = Self::new(owner, number);
        Ok(match repo {
            Some(repo) => project.with_repo(repo),
            None => project,
        })
    }

    /// Returns the owning user or organization login.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the associated repository, if any.
    #[must_use]
    pub fn repo(&self) -> Option<&str> {
        self.repo.as_deref()
    }

    /// Returns the project number.
    #[must_use]
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Returns the project's web address.
    ///
    /// GitHub redirects between the user and organization forms, so the
    /// user form is used for both.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardstack_config::ProjectRef;
    ///
    /// let project = ProjectRef::new("acme", 3);
    /// assert_eq!(project.url(), "https://github.com/users/acme/projects/3");
    /// ```
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "https://github.com/users/{}/projects/{}",
            self.owner, self.number
        )
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repo {
            Some(repo) => write!(f, "{}/{}/{}", self.owner, repo, self.number),
            None => write!(f, "{}/{}", self.owner, self.number),
        }
    }
}

impl FromStr for ProjectRef {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_short(s)
    }
}

impl Serialize for ProjectRef {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ProjectRef {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};

        struct ProjectRefVisitor;

        impl<'de> Visitor<'de> for ProjectRefVisitor {
            type Value = ProjectRef;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(
                    "a string 'owner/number' or an object with owner, number and optional repo",
                )
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                ProjectRef::parse_short(v).map_err(de::Error::custom)
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut owner: Option<String> = None;
                let mut repo: Option<String> = None;
                let mut number: Option<u64> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "owner" => {
                            if owner.is_some() {
                                return Err(de::Error::duplicate_field("owner"));
                            }
                            owner = Some(map.next_value()?);
                        }
                        "repo" => {
                            if repo.is_some() {
                                return Err(de::Error::duplicate_field("repo"));
                            }
                            repo = map.next_value()?;
                        }
                        "number" => {
                            if number.is_some() {
                                return Err(de::Error::duplicate_field("number"));
                            }
                            number = Some(map.next_value()?);
                        }
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                let owner = owner.ok_or_else(|| de::Error::missing_field("owner"))?;
                let number = number.ok_or_else(|| de::Error::missing_field("number"))?;
                if owner.trim().is_empty() || number == 0 {
                    return Err(de::Error::custom("owner must be set and number positive"));
                }

                Ok(ProjectRef {
                    owner,
                    repo,
                    number,
                })
            }
        }

        deserializer.deserialize_any(ProjectRefVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_short_owner_and_number() {
        let project = ProjectRef::parse_short("acme/12").unwrap();
        assert_eq!(project.owner(), "acme");
        assert_eq!(project.repo(), None);
        assert_eq!(project.number(), 12);
    }

    #[test]
    fn parse_short_with_repo_and_whitespace() {
        let project = ProjectRef::parse_short(" acme / api / 4 ").unwrap();
        assert_eq!(project.owner(), "acme");
        assert_eq!(project.repo(), Some("api"));
        assert_eq!(project.number(), 4);
    }

    #[test]
    fn parse_short_rejects_bad_shapes() {
        assert!(ProjectRef::parse_short("acme").is_err());
        assert!(ProjectRef::parse_short("a/b/c/1").is_err());
        assert!(ProjectRef::parse_short("/1").is_err());
        assert!(ProjectRef::parse_short("acme//1").is_err());
    }

    #[test]
    fn parse_short_rejects_bad_numbers() {
        assert!(ProjectRef::parse_short("acme/zero").is_err());
        assert!(ProjectRef::parse_short("acme/0").is_err());
        assert!(ProjectRef::parse_short("acme/-3").is_err());
    }

    #[test]
    fn from_str_matches_parse_short() {
        let project: ProjectRef = "acme/api/4".parse().unwrap();
        assert_eq!(project, ProjectRef::new("acme", 4).with_repo("api"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for s in ["acme/1", "acme/api/9"] {
            assert_eq!(ProjectRef::parse_short(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn deserialize_short_format() {
        let project: ProjectRef = serde_json::from_str(r#""acme/5""#).unwrap();
        assert_eq!(project, ProjectRef::new("acme", 5));
    }

    #[test]
    fn deserialize_full_format() {
        let project: ProjectRef =
            serde_json::from_str(r#"{"owner": "acme", "number": 5, "extra": true}"#).unwrap();
        assert_eq!(project, ProjectRef::new("acme", 5));
    }

    #[test]
    fn deserialize_full_format_with_repo() {
        let project: ProjectRef =
            serde_json::from_str(r#"{"owner": "acme", "repo": "api", "number": 5}"#).unwrap();
        assert_eq!(project.repo(), Some("api"));
    }

    #[test]
    fn deserialize_rejects_missing_number() {
        let result: std::result::Result<ProjectRef, _> =
            serde_json::from_str(r#"{"owner": "acme"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn deserialize_rejects_zero_number() {
        let result: std::result::Result<ProjectRef, _> =
            serde_json::from_str(r#"{"owner": "acme", "number": 0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serialize_as_short_string() {
        let json = serde_json::to_string(&ProjectRef::new("acme", 2).with_repo("web")).unwrap();
        assert_eq!(json, r#""acme/web/2""#);
    }
}
