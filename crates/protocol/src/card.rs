//! Card-related types for the board.
//!
//! A [`Card`] is a single work item. Cards are owned by the
//! [`Board`](crate::Board) in a map keyed by [`CardId`]; columns only hold
//! ordered lists of identifiers.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Opaque, immutable identifier of a card.
///
/// Local boards use short random identifiers, remote boards use whatever
/// identifier the remote service hands out.
///
/// # Examples
///
/// ```
/// use cardstack_protocol::CardId;
///
/// let id = CardId::new("42");
/// assert_eq!(id.as_str(), "42");
/// assert_eq!(id.to_string(), "42");
///
/// let generated = CardId::generate();
/// assert_ne!(generated, CardId::generate());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Creates an identifier from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A card on the board.
///
/// The `column` field is authoritative: it always names the column whose
/// list contains this card's identifier. Only the owning
/// [`Board`](crate::Board) changes it.
///
/// # Examples
///
/// ```
/// use cardstack_protocol::Card;
///
/// let card = Card::new("Fix login flow", "TODO")
///     .with_description("OAuth refresh returns 401")
///     .with_tags(["bug", "p1"])
///     .with_assignee("@alice");
///
/// assert_eq!(card.column, "TODO");
/// assert_eq!(card.tags, vec!["bug", "p1"]);
/// assert_eq!(card.assignee.as_deref(), Some("@alice"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier for this card.
    pub id: CardId,
    /// Short summary of the card.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Ordered list of tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Who is working on this card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// When the card is due.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Link to the card on a remote service, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// When this card was created.
    pub created_at: DateTime<Utc>,
    /// When this card was last modified.
    pub modified_at: DateTime<Utc>,
    /// Name of the column containing this card.
    pub column: String,
}

impl Card {
    /// Creates a card with a generated identifier in the given column.
    ///
    /// Both timestamps are set to the current time.
    #[must_use]
    pub fn new(title: impl Into<String>, column: impl Into<String>) -> Self {
        Self::with_id(CardId::generate(), title, column, Utc::now())
    }

    /// Creates a card with a specific identifier and creation time.
    ///
    /// Useful for tests and when recreating cards from persistent storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use cardstack_protocol::{Card, CardId};
    ///
    /// let now = Utc::now();
    /// let card = Card::with_id(CardId::new("7"), "Write tests", "TODO", now);
    /// assert_eq!(card.id.as_str(), "7");
    /// assert_eq!(card.created_at, card.modified_at);
    /// ```
    #[must_use]
    pub fn with_id(
        id: CardId,
        title: impl Into<String>,
        column: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            tags: Vec::new(),
            assignee: None,
            due_date: None,
            url: None,
            created_at: now,
            modified_at: now,
            column: column.into(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the remote URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Refreshes the last-modified timestamp.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.modified_at = now;
    }

    /// Returns `true` if the card has a due date strictly before `today`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use cardstack_protocol::Card;
    ///
    /// let due = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    /// let card = Card::new("Ship it", "TODO").with_due_date(due);
    ///
    /// assert!(card.is_overdue(NaiveDate::from_ymd_opt(2025, 1, 16).unwrap()));
    /// assert!(!card.is_overdue(due));
    /// ```
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date.is_some_and(|due| due < today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&CardId::new("abc")).expect("serialize");
        assert_eq!(json, r#""abc""#);
    }

    #[test]
    fn generated_ids_are_simple_uuids() {
        let id = CardId::generate();
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn card_new_sets_matching_timestamps() {
        let card = Card::new("Title", "BACKLOG");
        assert_eq!(card.created_at, card.modified_at);
        assert!(card.description.is_empty());
        assert!(card.tags.is_empty());
    }

    #[test]
    fn touch_updates_modified_only() {
        let start = Utc::now();
        let mut card = Card::with_id(CardId::new("1"), "Title", "TODO", start);
        let later = start + chrono::Duration::minutes(5);

        card.touch(later);

        assert_eq!(card.created_at, start);
        assert_eq!(card.modified_at, later);
    }

    #[test]
    fn optional_fields_are_omitted_when_empty() {
        let card = Card::with_id(CardId::new("1"), "Title", "TODO", Utc::now());
        let json = serde_json::to_string(&card).expect("serialize");

        assert!(!json.contains("tags"));
        assert!(!json.contains("assignee"));
        assert!(!json.contains("due_date"));
        assert!(!json.contains("url"));
    }

    #[test]
    fn missing_optional_fields_deserialize_to_defaults() {
        let json = r#"{
            "id": "9",
            "title": "Bare",
            "created_at": "2025-01-01T00:00:00Z",
            "modified_at": "2025-01-02T00:00:00Z",
            "column": "DONE"
        }"#;
        let card: Card = serde_json::from_str(json).expect("deserialize");

        assert_eq!(card.id, CardId::new("9"));
        assert!(card.description.is_empty());
        assert!(card.assignee.is_none());
        assert_eq!(card.column, "DONE");
    }
}
