//! Board and column types.
//!
//! # Overview
//!
//! A [`Board`] owns every [`Card`] in a single map keyed by [`CardId`]. Each
//! [`Column`] holds an ordered list of identifiers, so a card lives in
//! exactly one place and the columns only describe where it is shown.
//!
//! The board keeps three rules true after every public operation:
//!
//! - every identifier listed by a column refers to a card in the map;
//! - every card in the map is listed by exactly one column;
//! - a card's `column` field names the column that lists it.
//!
//! Iterating the columns in order and their identifiers in order yields the
//! flat card list used for persistence, see [`Board::cards`].
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use cardstack_protocol::Board;
//!
//! let mut board = Board::with_default_columns("Roadmap");
//! let id = board.create_card("TODO", "Write docs", "", Utc::now()).unwrap();
//!
//! assert_eq!(board.card(&id).map(|c| c.column.as_str()), Some("TODO"));
//! assert!(board.check_invariants().is_ok());
//! ```

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::card::{Card, CardId};
use crate::error::{ProtocolError, Result};

/// Name of the reserved archive column, hidden unless toggled visible.
pub const ARCHIVE_COLUMN: &str = "ARCHIVE";

/// Columns of a freshly created board, in display order.
pub const DEFAULT_COLUMNS: [&str; 6] = [
    "BACKLOG",
    "TODO",
    "PROGRESS",
    "REVIEW",
    "DONE",
    ARCHIVE_COLUMN,
];

/// A named, ordered lane of cards.
///
/// # Examples
///
/// ```
/// use cardstack_protocol::Column;
///
/// let column = Column::new("TODO");
/// assert_eq!(column.name(), "TODO");
/// assert!(column.is_empty());
/// assert!(!column.is_archive());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    pub(crate) cards: Vec<CardId>,
}

impl Column {
    /// Creates an empty column.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
        }
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the identifiers of the cards in display order.
    #[must_use]
    pub fn card_ids(&self) -> &[CardId] {
        &self.cards
    }

    /// Returns the number of cards in this column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns `true` if the column has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the position of a card within this column.
    #[must_use]
    pub fn position(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|c| c == id)
    }

    /// Returns `true` if this is the reserved archive lane.
    #[must_use]
    pub fn is_archive(&self) -> bool {
        self.name == ARCHIVE_COLUMN
    }
}

/// The full collection of columns and cards for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Display name of the board.
    pub name: String,
    /// Optional free-text description.
    pub description: String,
    /// Link to the board on a remote service, if any.
    pub url: Option<String>,
    /// When the board was created.
    pub created_at: DateTime<Utc>,
    /// When the board was last modified.
    pub modified_at: DateTime<Utc>,
    pub(crate) columns: Vec<Column>,
    pub(crate) cards: HashMap<CardId, Card>,
}

impl Board {
    /// Creates an empty board with the given column names.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::NoColumns`] when no column is given and
    /// [`ProtocolError::DuplicateColumn`] when a name repeats.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardstack_protocol::{Board, ProtocolError};
    ///
    /// let board = Board::new("Ops", ["TODO", "DONE"]).unwrap();
    /// assert_eq!(board.columns().len(), 2);
    ///
    /// let err = Board::new("Ops", ["TODO", "TODO"]).unwrap_err();
    /// assert_eq!(err, ProtocolError::DuplicateColumn("TODO".into()));
    /// ```
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut built = Vec::new();
        for column in columns {
            let column = column.into();
            if !seen.insert(column.clone()) {
                return Err(ProtocolError::DuplicateColumn(column));
            }
            built.push(Column::new(column));
        }
        if built.is_empty() {
            return Err(ProtocolError::NoColumns);
        }

        let now = Utc::now();
        Ok(Self {
            name: name.into(),
            description: String::new(),
            url: None,
            created_at: now,
            modified_at: now,
            columns: built,
            cards: HashMap::new(),
        })
    }

    /// Creates an empty board with [`DEFAULT_COLUMNS`].
    #[must_use]
    pub fn with_default_columns(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            description: String::new(),
            url: None,
            created_at: now,
            modified_at: now,
            columns: DEFAULT_COLUMNS.iter().map(|c| Column::new(*c)).collect(),
            cards: HashMap::new(),
        }
    }

    /// Assembles a board from a flat card list.
    ///
    /// Cards are appended to the column named by their `column` field, in
    /// list order. A card naming an unknown column is moved to the first
    /// column and a warning is logged.
    ///
    /// # Errors
    ///
    /// Fails like [`Board::new`] on bad column sets, and with
    /// [`ProtocolError::DuplicateCard`] when two cards share an identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardstack_protocol::{Board, Card};
    ///
    /// let cards = vec![Card::new("A", "TODO"), Card::new("B", "NOWHERE")];
    /// let board = Board::from_cards("Demo", ["TODO", "DONE"], cards).unwrap();
    ///
    /// assert_eq!(board.column("TODO").map(|c| c.len()), Some(2));
    /// ```
    pub fn from_cards<C, S, I>(name: impl Into<String>, columns: C, cards: I) -> Result<Self>
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        I: IntoIterator<Item = Card>,
    {
        let mut board = Self::new(name, columns)?;
        for mut card in cards {
            if board.column_index(&card.column).is_none() {
                let fallback = board.columns[0].name.clone();
                warn!(
                    card = %card.id,
                    column = %card.column,
                    fallback = %fallback,
                    "card references unknown column, moving it"
                );
                card.column = fallback;
            }
            board.insert_card(card)?;
        }
        Ok(board)
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column with the given name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the position of the named column.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Returns the columns shown to the user.
    ///
    /// The archive lane is included only when `show_archive` is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardstack_protocol::Board;
    ///
    /// let board = Board::with_default_columns("Demo");
    /// assert_eq!(board.visible_columns(false).len(), 5);
    /// assert_eq!(board.visible_columns(true).len(), 6);
    /// ```
    #[must_use]
    pub fn visible_columns(&self, show_archive: bool) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| show_archive || !c.is_archive())
            .collect()
    }

    /// Looks up a card by identifier.
    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Returns the card at `index` in the named column.
    #[must_use]
    pub fn card_at(&self, column: &str, index: usize) -> Option<&Card> {
        self.column(column)
            .and_then(|c| c.cards.get(index))
            .and_then(|id| self.cards.get(id))
    }

    /// Iterates over the cards of one column, top to bottom.
    pub fn cards_in<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a Card> + 'a {
        self.column(column)
            .into_iter()
            .flat_map(|c| c.cards.iter())
            .filter_map(|id| self.cards.get(id))
    }

    /// Iterates over every card, column by column.
    ///
    /// This is the flat card list; its order is the one persisted.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.columns
            .iter()
            .flat_map(|c| c.cards.iter())
            .filter_map(|id| self.cards.get(id))
    }

    /// Returns the total number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns `true` if the board has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Creates a card at the bottom of a column and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidCardTitle`] for a blank title and
    /// [`ProtocolError::ColumnNotFound`] for an unknown column.
    pub fn create_card(
        &mut self,
        column: &str,
        title: &str,
        description: &str,
        now: DateTime<Utc>,
    ) -> Result<CardId> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ProtocolError::InvalidCardTitle);
        }
        let card = Card::with_id(CardId::generate(), title, column, now)
            .with_description(description.trim());
        let id = card.id.clone();
        self.insert_card(card)?;
        self.modified_at = now;
        Ok(id)
    }

    /// Appends an existing card to the column named by its `column` field.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::DuplicateCard`] if the identifier is taken
    /// and [`ProtocolError::ColumnNotFound`] for an unknown column.
    pub fn insert_card(&mut self, card: Card) -> Result<()> {
        if self.cards.contains_key(&card.id) {
            return Err(ProtocolError::DuplicateCard(card.id));
        }
        let index = self
            .column_index(&card.column)
            .ok_or_else(|| ProtocolError::ColumnNotFound(card.column.clone()))?;
        self.columns[index].cards.push(card.id.clone());
        self.cards.insert(card.id.clone(), card);
        Ok(())
    }

    /// Replaces a card's title and description.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidCardTitle`] for a blank title and
    /// [`ProtocolError::CardNotFound`] for an unknown identifier.
    pub fn update_card(
        &mut self,
        id: &CardId,
        title: &str,
        description: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ProtocolError::InvalidCardTitle);
        }
        let card = self
            .cards
            .get_mut(id)
            .ok_or_else(|| ProtocolError::CardNotFound(id.clone()))?;
        card.title = title.to_string();
        card.description = description.trim().to_string();
        card.touch(now);
        self.modified_at = now;
        Ok(())
    }

    /// Removes a card from the board and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::CardNotFound`] for an unknown identifier.
    pub fn remove_card(&mut self, id: &CardId) -> Result<Card> {
        let card = self
            .cards
            .remove(id)
            .ok_or_else(|| ProtocolError::CardNotFound(id.clone()))?;
        for column in &mut self.columns {
            column.cards.retain(|c| c != id);
        }
        Ok(card)
    }

    /// Replaces a card's identifier, keeping its position.
    ///
    /// Remote backends hand out permanent identifiers only after a card has
    /// been created locally.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::CardNotFound`] if `old` is unknown and
    /// [`ProtocolError::DuplicateCard`] if `new` is already taken.
    pub fn rekey_card(&mut self, old: &CardId, new: CardId) -> Result<()> {
        if old == &new {
            return Ok(());
        }
        if self.cards.contains_key(&new) {
            return Err(ProtocolError::DuplicateCard(new));
        }
        let mut card = self
            .cards
            .remove(old)
            .ok_or_else(|| ProtocolError::CardNotFound(old.clone()))?;
        for column in &mut self.columns {
            for slot in column.cards.iter_mut().filter(|c| *c == old) {
                *slot = new.clone();
            }
        }
        card.id = new.clone();
        self.cards.insert(new, card);
        Ok(())
    }

    /// Verifies the board's structural rules.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvariantViolated`] describing the first
    /// inconsistency found.
    pub fn check_invariants(&self) -> Result<()> {
        let mut listed = HashSet::new();
        for column in &self.columns {
            for id in &column.cards {
                let card = self.cards.get(id).ok_or_else(|| {
                    ProtocolError::InvariantViolated(format!(
                        "column {} lists unknown card {id}",
                        column.name
                    ))
                })?;
                if !listed.insert(id) {
                    return Err(ProtocolError::InvariantViolated(format!(
                        "card {id} is listed more than once"
                    )));
                }
                if card.column != column.name {
                    return Err(ProtocolError::InvariantViolated(format!(
                        "card {id} claims column {} but is listed in {}",
                        card.column, column.name
                    )));
                }
            }
        }
        if let Some(orphan) = self.cards.keys().find(|id| !listed.contains(id)) {
            return Err(ProtocolError::InvariantViolated(format!(
                "card {orphan} is not listed by any column"
            )));
        }
        Ok(())
    }
}
