//! Mapping terminal coordinates to board positions.
//!
//! # Overview
//!
//! Columns share the board width evenly. Inside a column, cards are drawn
//! as a stack: every visible card except the last shows only its top
//! [`STACKED_CARD_HEIGHT`] rows, and the last card is drawn in full
//! ([`FULL_CARD_HEIGHT`] rows). When a column holds more cards than fit,
//! only the most recent ones are drawn and the rest are hidden above.
//!
//! [`StackLayout`] captures that rule for one column. Press hit-testing
//! ([`card_hit`]), drop-target resolution ([`drop_target`]) and the column
//! renderer all go through it.
//!
//! Nothing here fails: positions that do not map to anything yield `None`.
//!
//! # Examples
//!
//! ```
//! use ratatui::layout::Position;
//! use cardstack_tui::geometry::{CardHit, DropTarget, card_hit, drop_target};
//! use cardstack_tui::layout::Viewport;
//!
//! // Four columns of 20 cells; the second holds three cards.
//! let viewport = Viewport::new(80, 24, false);
//! let lens = [0, 3, 1, 0];
//!
//! // Row 3 is the top of the stack in column 1: the oldest visible card.
//! assert_eq!(
//!     card_hit(Position::new(25, 3), &viewport, &lens),
//!     Some(CardHit { column: 1, index: 0 })
//! );
//!
//! // Dropping on an empty column always targets slot 0.
//! assert_eq!(
//!     drop_target(Position::new(70, 12), &viewport, &lens),
//!     Some(DropTarget { column: 3, slot: 0 })
//! );
//!
//! // The header row is never a target.
//! assert_eq!(drop_target(Position::new(25, 2), &viewport, &lens), None);
//! ```

use ratatui::layout::Position;

use crate::layout::{CARD_AREA_TOP, FULL_CARD_HEIGHT, STACKED_CARD_HEIGHT, Viewport};

const FULL: usize = FULL_CARD_HEIGHT as usize;
const STACKED: usize = STACKED_CARD_HEIGHT as usize;

/// A card under the pointer, by visible column and card index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardHit {
    /// Index into the visible columns.
    pub column: usize,
    /// Index of the card in that column.
    pub index: usize,
}

/// Where a dragged card would land, by visible column and insertion slot.
///
/// `slot` ranges over `0..=len`: slot `k` sits between cards `k - 1` and `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropTarget {
    /// Index into the visible columns.
    pub column: usize,
    /// Insertion slot in that column.
    pub slot: usize,
}

/// Width of one column, or zero if there are no columns.
#[must_use]
pub fn column_width(viewport: &Viewport, column_count: usize) -> u16 {
    match u16::try_from(column_count) {
        Ok(0) | Err(_) => 0,
        Ok(count) => viewport.board_width() / count,
    }
}

/// Returns the visible column under `pos`.
///
/// Only the horizontal coordinate matters. Positions right of the board
/// (over the detail panel, or in the remainder left by integer division)
/// yield `None`.
#[must_use]
pub fn column_at(pos: Position, viewport: &Viewport, column_count: usize) -> Option<usize> {
    if pos.x >= viewport.board_width() {
        return None;
    }
    let width = column_width(viewport, column_count);
    if width == 0 {
        return None;
    }
    let index = usize::from(pos.x / width);
    (index < column_count).then_some(index)
}

/// The stacked arrangement of one column's cards.
///
/// # Examples
///
/// ```
/// use cardstack_tui::geometry::StackLayout;
///
/// // 15 content rows fit five 2-row slices plus one full card.
/// let stack = StackLayout::new(8, 15);
/// assert_eq!(stack.shown(), 6);
/// assert_eq!(stack.start(), 2);
///
/// // Rows 0-1 belong to card 2, rows 10-14 to the last card.
/// assert_eq!(stack.card_at(1), Some(2));
/// assert_eq!(stack.card_at(12), Some(7));
/// assert_eq!(stack.card_at(15), None);
///
/// // Top half of a slice inserts before it, bottom half after it.
/// assert_eq!(stack.insertion_slot(0), 2);
/// assert_eq!(stack.insertion_slot(1), 3);
/// assert_eq!(stack.insertion_slot(20), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackLayout {
    total: usize,
    shown: usize,
}

impl StackLayout {
    /// Computes the layout of `total` cards in `content_height` rows.
    #[must_use]
    pub fn new(total: usize, content_height: u16) -> Self {
        let max_stacked = usize::from(content_height.saturating_sub(FULL_CARD_HEIGHT))
            / STACKED;
        Self {
            total,
            shown: total.min(max_stacked + 1),
        }
    }

    /// Number of cards in the column.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Number of cards drawn.
    #[must_use]
    pub const fn shown(&self) -> usize {
        self.shown
    }

    /// Index of the first drawn card; also the number hidden above.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.total - self.shown
    }

    /// Rows taken by the partially covered cards.
    const fn stacked_rows(&self) -> usize {
        self.shown.saturating_sub(1) * STACKED
    }

    /// Returns `true` if `index` is the fully drawn card.
    #[must_use]
    pub const fn is_last(&self, index: usize) -> bool {
        index + 1 == self.total
    }

    /// First row of card `index`, relative to the card area, if it is drawn.
    #[must_use]
    pub fn card_top(&self, index: usize) -> Option<usize> {
        (self.start()..self.total)
            .contains(&index)
            .then(|| (index - self.start()) * STACKED)
    }

    /// Returns the card drawn at `rel_y` rows below the top of the card area.
    #[must_use]
    pub fn card_at(&self, rel_y: usize) -> Option<usize> {
        if self.total == 0 {
            return None;
        }
        let stacked = self.stacked_rows();
        if rel_y < stacked {
            Some(self.start() + rel_y / STACKED)
        } else if rel_y < stacked + FULL {
            Some(self.total - 1)
        } else {
            None
        }
    }

    /// Returns the insertion slot for a pointer `rel_y` rows below the top of
    /// the card area.
    ///
    /// The upper half of a card inserts before it, the lower half after it.
    /// Anything below the stack inserts at the end.
    #[must_use]
    pub fn insertion_slot(&self, rel_y: usize) -> usize {
        if self.total == 0 {
            return 0;
        }
        let stacked = self.stacked_rows();
        if rel_y < stacked {
            let index = self.start() + rel_y / STACKED;
            if rel_y % STACKED < STACKED / 2 {
                index
            } else {
                index + 1
            }
        } else if rel_y < stacked + FULL {
            if rel_y - stacked < FULL / 2 {
                self.total - 1
            } else {
                self.total
            }
        } else {
            self.total
        }
    }

    /// Row at which the drop indicator for `slot` is drawn.
    ///
    /// Slots before a drawn card use that card's top row; the end slot uses
    /// the row just below the full card. Slots among hidden cards map to the
    /// top of the stack.
    #[must_use]
    pub fn slot_row(&self, slot: usize) -> usize {
        if slot >= self.total {
            return self.stacked_rows() + if self.total == 0 { 0 } else { FULL };
        }
        self.card_top(slot).unwrap_or(0)
    }
}

/// Lays out the stack of the visible column at `column`.
fn stack_for(column: usize, viewport: &Viewport, lens: &[usize]) -> Option<StackLayout> {
    lens.get(column)
        .map(|&len| StackLayout::new(len, viewport.content_height()))
}

/// Returns the card under `pos`.
///
/// `lens` holds the card count of each visible column. Positions above the
/// card area, on an empty column, or below the stack yield `None`.
#[must_use]
pub fn card_hit(pos: Position, viewport: &Viewport, lens: &[usize]) -> Option<CardHit> {
    let rel_y = pos.y.checked_sub(CARD_AREA_TOP)?;
    let column = column_at(pos, viewport, lens.len())?;
    let index = stack_for(column, viewport, lens)?.card_at(usize::from(rel_y))?;
    Some(CardHit { column, index })
}

/// Returns where a card dropped at `pos` would land.
///
/// Positions above the card area or outside the board yield `None`.
#[must_use]
pub fn drop_target(pos: Position, viewport: &Viewport, lens: &[usize]) -> Option<DropTarget> {
    let rel_y = pos.y.checked_sub(CARD_AREA_TOP)?;
    let column = column_at(pos, viewport, lens.len())?;
    let slot = stack_for(column, viewport, lens)?.insertion_slot(usize::from(rel_y));
    Some(DropTarget { column, slot })
}
