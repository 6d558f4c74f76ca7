//! Moving cards within and across columns.
//!
//! # Overview
//!
//! [`Board::move_card`] applies a [`CardMove`] as one remove-then-insert
//! step. The destination index is an insertion slot (`0..=len`) measured
//! *before* the card is removed, which is what the pointer resolves to; the
//! engine compensates for the shift caused by removing the card first.
//!
//! Invalid requests are not errors: an unknown column, an out-of-range
//! source index, or a move that would leave the card where it is yields
//! `None` and leaves the board untouched.
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use cardstack_protocol::{Board, Card, CardId, CardMove};
//!
//! let now = Utc::now();
//! let cards = ["A", "B", "C"].map(|id| Card::with_id(CardId::new(id), id, "TODO", now));
//! let mut board = Board::from_cards("Demo", ["TODO", "DONE"], cards).unwrap();
//!
//! let placed = board.move_card(&CardMove::new("TODO", 0, "TODO", 2), now).unwrap();
//!
//! let order: Vec<_> = board.cards_in("TODO").map(|c| c.id.as_str()).collect();
//! assert_eq!(order, ["B", "A", "C"]);
//! assert_eq!(placed.index, 1);
//! assert!(!placed.column_changed);
//! ```

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::board::Board;
use crate::card::CardId;

/// A requested move, addressed by column name and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardMove {
    /// Column currently holding the card.
    pub from_column: String,
    /// Position of the card in its column.
    pub from_index: usize,
    /// Column receiving the card.
    pub to_column: String,
    /// Insertion slot in the destination column, counted before removal.
    pub to_index: usize,
}

impl CardMove {
    /// Creates a move request.
    #[must_use]
    pub fn new(
        from_column: impl Into<String>,
        from_index: usize,
        to_column: impl Into<String>,
        to_index: usize,
    ) -> Self {
        Self {
            from_column: from_column.into(),
            from_index,
            to_column: to_column.into(),
            to_index,
        }
    }

    /// Returns `true` if the card stays in its column.
    #[must_use]
    pub fn is_same_column(&self) -> bool {
        self.from_column == self.to_column
    }
}

/// Where a moved card ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// The card that moved.
    pub card_id: CardId,
    /// Column now holding the card.
    pub column: String,
    /// Position of the card in that column.
    pub index: usize,
    /// Whether the card changed columns.
    pub column_changed: bool,
}

impl Board {
    /// Applies a move and reports where the card landed.
    ///
    /// Within a column, dropping a card on its own slot or on the slot just
    /// below it is a no-op. Otherwise the card is removed, the destination
    /// slot is decremented if it lay below the removed position, and the card
    /// is inserted there (appended if past the end). Across columns the card
    /// is inserted at the slot (appended if past the end) and its `column`
    /// field is rewritten. The card and the board are stamped with `now`.
    ///
    /// Returns `None` when the request has no effect.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use cardstack_protocol::{Board, Card, CardMove};
    ///
    /// let mut board = Board::from_cards(
    ///     "Demo",
    ///     ["BACKLOG", "DONE"],
    ///     vec![Card::new("Only card", "BACKLOG")],
    /// )
    /// .unwrap();
    ///
    /// let placed = board
    ///     .move_card(&CardMove::new("BACKLOG", 0, "DONE", 0), Utc::now())
    ///     .unwrap();
    ///
    /// assert!(placed.column_changed);
    /// assert!(board.column("BACKLOG").unwrap().is_empty());
    /// assert_eq!(board.card(&placed.card_id).unwrap().column, "DONE");
    /// ```
    pub fn move_card(&mut self, request: &CardMove, now: DateTime<Utc>) -> Option<Placement> {
        let from = self.column_index(&request.from_column)?;
        let to = self.column_index(&request.to_column)?;
        if request.from_index >= self.columns[from].cards.len() {
            return None;
        }

        let (card_id, index) = if from == to {
            if request.to_index == request.from_index || request.to_index == request.from_index + 1
            {
                return None;
            }
            let cards = &mut self.columns[from].cards;
            let card_id = cards.remove(request.from_index);
            let mut dest = request.to_index;
            if request.from_index < dest {
                dest -= 1;
            }
            let index = dest.min(cards.len());
            cards.insert(index, card_id.clone());
            (card_id, index)
        } else {
            let card_id = self.columns[from].cards.remove(request.from_index);
            let cards = &mut self.columns[to].cards;
            let index = request.to_index.min(cards.len());
            cards.insert(index, card_id.clone());
            (card_id, index)
        };

        let column = self.columns[to].name().to_string();
        if let Some(card) = self.cards.get_mut(&card_id) {
            card.column = column.clone();
            card.touch(now);
        }
        self.modified_at = now;

        debug!(
            card = %card_id,
            from = %request.from_column,
            to = %column,
            index,
            "moved card"
        );

        Some(Placement {
            card_id,
            column,
            index,
            column_changed: from != to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;

    fn board(columns: &[(&str, &[&str])]) -> Board {
        let now = Utc::now();
        let cards = columns.iter().flat_map(|(column, ids)| {
            ids.iter()
                .map(move |id| Card::with_id(CardId::new(*id), *id, *column, now))
        });
        Board::from_cards("Test", columns.iter().map(|(c, _)| *c), cards.collect::<Vec<_>>())
            .unwrap()
    }

    fn order(board: &Board, column: &str) -> Vec<String> {
        board.cards_in(column).map(|c| c.id.to_string()).collect()
    }

    #[test]
    fn same_column_move_down_compensates_for_removal() {
        let mut board = board(&[("TODO", &["A", "B", "C"])]);

        let placed = board
            .move_card(&CardMove::new("TODO", 0, "TODO", 2), Utc::now())
            .unwrap();

        assert_eq!(order(&board, "TODO"), vec!["B", "A", "C"]);
        assert_eq!(placed.index, 1);
        assert_eq!(placed.card_id, CardId::new("A"));
    }

    #[test]
    fn same_column_move_up() {
        let mut board = board(&[("TODO", &["A", "B", "C"])]);

        let placed = board
            .move_card(&CardMove::new("TODO", 2, "TODO", 0), Utc::now())
            .unwrap();

        assert_eq!(order(&board, "TODO"), vec!["C", "A", "B"]);
        assert_eq!(placed.index, 0);
    }

    #[test]
    fn same_column_move_to_end_appends() {
        let mut board = board(&[("TODO", &["A", "B", "C"])]);

        let placed = board
            .move_card(&CardMove::new("TODO", 0, "TODO", 3), Utc::now())
            .unwrap();

        assert_eq!(order(&board, "TODO"), vec!["B", "C", "A"]);
        assert_eq!(placed.index, 2);
    }

    #[test]
    fn same_column_slot_past_end_is_clamped() {
        let mut board = board(&[("TODO", &["A", "B", "C"])]);

        board
            .move_card(&CardMove::new("TODO", 0, "TODO", 99), Utc::now())
            .unwrap();

        assert_eq!(order(&board, "TODO"), vec!["B", "C", "A"]);
    }

    #[test]
    fn dropping_on_own_or_next_slot_is_noop() {
        let mut board = board(&[("TODO", &["A", "B", "C"])]);
        let before = board.clone();

        assert!(board
            .move_card(&CardMove::new("TODO", 1, "TODO", 1), Utc::now())
            .is_none());
        assert!(board
            .move_card(&CardMove::new("TODO", 1, "TODO", 2), Utc::now())
            .is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn cross_column_move_into_empty_column() {
        let mut board = board(&[("BACKLOG", &["A"]), ("DONE", &[])]);

        let placed = board
            .move_card(&CardMove::new("BACKLOG", 0, "DONE", 0), Utc::now())
            .unwrap();

        assert!(order(&board, "BACKLOG").is_empty());
        assert_eq!(order(&board, "DONE"), vec!["A"]);
        assert_eq!(board.card(&CardId::new("A")).unwrap().column, "DONE");
        assert!(placed.column_changed);
        assert_eq!(placed.column, "DONE");
    }

    #[test]
    fn cross_column_move_inserts_at_slot() {
        let mut board = board(&[("TODO", &["A", "B"]), ("DONE", &["X", "Y"])]);

        let placed = board
            .move_card(&CardMove::new("TODO", 1, "DONE", 1), Utc::now())
            .unwrap();

        assert_eq!(order(&board, "TODO"), vec!["A"]);
        assert_eq!(order(&board, "DONE"), vec!["X", "B", "Y"]);
        assert_eq!(placed.index, 1);
    }

    #[test]
    fn cross_column_slot_past_end_appends() {
        let mut board = board(&[("TODO", &["A"]), ("DONE", &["X"])]);

        let placed = board
            .move_card(&CardMove::new("TODO", 0, "DONE", 10), Utc::now())
            .unwrap();

        assert_eq!(order(&board, "DONE"), vec!["X", "A"]);
        assert_eq!(placed.index, 1);
    }

    #[test]
    fn invalid_requests_are_ignored() {
        let mut board = board(&[("TODO", &["A"]), ("DONE", &[])]);
        let before = board.clone();
        let now = Utc::now();

        assert!(board.move_card(&CardMove::new("LIMBO", 0, "DONE", 0), now).is_none());
        assert!(board.move_card(&CardMove::new("TODO", 0, "LIMBO", 0), now).is_none());
        assert!(board.move_card(&CardMove::new("TODO", 1, "DONE", 0), now).is_none());
        assert!(board.move_card(&CardMove::new("DONE", 0, "TODO", 0), now).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn move_stamps_card_and_board() {
        let mut board = board(&[("TODO", &["A"]), ("DONE", &[])]);
        let later = Utc::now() + chrono::Duration::minutes(1);

        board
            .move_card(&CardMove::new("TODO", 0, "DONE", 0), later)
            .unwrap();

        assert_eq!(board.card(&CardId::new("A")).unwrap().modified_at, later);
        assert_eq!(board.modified_at, later);
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::card::Card;
    use proptest::prelude::*;

    const COLUMNS: [&str; 3] = ["TODO", "DOING", "DONE"];

    prop_compose! {
        fn arb_board()(sizes in prop::array::uniform3(0usize..6)) -> Board {
            let now = Utc::now();
            let mut cards = Vec::new();
            for (column, size) in COLUMNS.iter().zip(sizes) {
                for i in 0..size {
                    let id = format!("{column}-{i}");
                    cards.push(Card::with_id(CardId::new(id.clone()), id, *column, now));
                }
            }
            Board::from_cards("Prop", COLUMNS, cards).unwrap()
        }
    }

    prop_compose! {
        fn arb_move()(
            from in 0usize..3,
            from_index in 0usize..7,
            to in 0usize..3,
            to_index in 0usize..8,
        ) -> CardMove {
            CardMove::new(COLUMNS[from], from_index, COLUMNS[to], to_index)
        }
    }

    fn ids(board: &Board) -> Vec<CardId> {
        let mut ids: Vec<_> = board.cards().map(|c| c.id.clone()).collect();
        ids.sort();
        ids
    }

    proptest! {
        /// The set of cards never changes, whatever moves are applied.
        #[test]
        fn moves_conserve_cards(mut board in arb_board(), moves in prop::collection::vec(arb_move(), 0..30)) {
            let expected = ids(&board);
            for request in &moves {
                board.move_card(request, Utc::now());
                prop_assert_eq!(board.len(), expected.len());
                prop_assert_eq!(ids(&board), expected.clone());
                prop_assert!(board.check_invariants().is_ok());
            }
        }

        /// A moved card is listed by its new column only, at the reported index.
        #[test]
        fn placement_matches_membership(mut board in arb_board(), request in arb_move()) {
            if let Some(placed) = board.move_card(&request, Utc::now()) {
                let card = board.card(&placed.card_id).unwrap();
                prop_assert_eq!(&card.column, &placed.column);
                prop_assert_eq!(
                    board.column(&placed.column).unwrap().position(&placed.card_id),
                    Some(placed.index)
                );
                let holders = board
                    .columns()
                    .iter()
                    .filter(|c| c.position(&placed.card_id).is_some())
                    .count();
                prop_assert_eq!(holders, 1);
            }
        }

        /// Dropping a card just below itself never changes the column.
        #[test]
        fn next_slot_is_identity(mut board in arb_board(), column in 0usize..3, index in 0usize..6) {
            let before = board.clone();
            let request = CardMove::new(COLUMNS[column], index, COLUMNS[column], index + 1);
            prop_assert!(board.move_card(&request, Utc::now()).is_none());
            prop_assert_eq!(board, before);
        }
    }
}
