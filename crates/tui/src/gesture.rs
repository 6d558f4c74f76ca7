//! Pointer gesture recognition.
//!
//! # Overview
//!
//! A [`Gesture`] turns a stream of press, motion, release and timer events
//! into one of a few outcomes: a click on a card, a cancelled press, a
//! completed drag with a source and a drop target, or an abandoned drag.
//!
//! ```text
//!          press on card            hold delay or movement
//!   Idle ─────────────────▶ Pending ───────────────────────▶ Dragging
//!    ▲                        │                                 │
//!    └──── release (click) ───┘                                 │
//!    └──────────────────────── release (drop / abandon) ────────┘
//! ```
//!
//! The gesture owns only transient pointer state. It reads the board
//! through the visible columns it is handed on each call and never mutates
//! it; applying a drop is left to the caller.
//!
//! Each press bumps an epoch. The hold timer carries the epoch it was
//! scheduled for, so a timer that fires after its press was released or
//! replaced is ignored.

use std::time::Instant;

use cardstack_config::InteractionConfig;
use cardstack_protocol::{CardId, Column};
use ratatui::layout::Position;
use tracing::debug;

use crate::geometry::{CardHit, DropTarget, card_hit, drop_target};
use crate::layout::Viewport;

/// A press on a card that has not turned into a drag yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPress {
    /// Where the button went down.
    pub origin: Position,
    /// When the button went down.
    pub pressed_at: Instant,
    /// The card under the press.
    pub hit: CardHit,
    /// Identity of that card.
    pub card_id: CardId,
    /// Epoch of this press.
    pub epoch: u64,
}

/// An active drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drag {
    /// Position the card was picked up from.
    pub source: CardHit,
    /// The card being dragged.
    pub card_id: CardId,
    /// Live drop target, if the pointer is over the board.
    pub target: Option<DropTarget>,
}

/// Current recognition phase.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// No button held, or the press missed every card.
    #[default]
    Idle,
    /// A card was pressed; waiting to see if it becomes a drag.
    Pending(PendingPress),
    /// A card is being dragged.
    Dragging(Drag),
}

/// What a press started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressStarted {
    /// The pressed card, which should become the selection.
    pub hit: CardHit,
    /// Epoch to hand back through [`Gesture::timer_elapsed`].
    pub epoch: u64,
    /// When the hold timer should fire.
    pub deadline: Instant,
}

/// Result of releasing the button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Nothing was in progress.
    Ignored,
    /// A press released before turning into a drag, still over a card.
    Click(CardHit),
    /// A press released before turning into a drag, away from any card.
    Cancelled,
    /// A drag released over the board.
    Dropped {
        /// Position the card was picked up from.
        source: CardHit,
        /// The dragged card.
        card_id: CardId,
        /// Where it was released.
        target: DropTarget,
    },
    /// A drag released outside the board.
    Abandoned,
}

/// Pointer gesture state machine.
///
/// # Examples
///
/// ```
/// use std::time::Instant;
/// use chrono::Utc;
/// use ratatui::layout::Position;
/// use cardstack_config::InteractionConfig;
/// use cardstack_protocol::sample::sample_board;
/// use cardstack_tui::gesture::{Gesture, GestureOutcome};
/// use cardstack_tui::layout::Viewport;
///
/// let board = sample_board(Utc::now());
/// let columns = board.visible_columns(false);
/// let viewport = Viewport::new(100, 24, false);
/// let mut gesture = Gesture::new(InteractionConfig::default());
///
/// // Press on the first TODO card, then release without moving.
/// let started = gesture
///     .press(Position::new(25, 3), Instant::now(), &viewport, &columns)
///     .unwrap();
/// assert_eq!((started.hit.column, started.hit.index), (1, 0));
///
/// let outcome = gesture.release(Position::new(25, 3), &viewport, &columns);
/// assert_eq!(outcome, GestureOutcome::Click(started.hit));
/// assert!(gesture.is_idle());
/// ```
#[derive(Debug, Clone)]
pub struct Gesture {
    phase: Phase,
    epoch: u64,
    config: InteractionConfig,
}

fn column_lens(columns: &[&Column]) -> Vec<usize> {
    columns.iter().map(|c| c.len()).collect()
}

fn displacement(from: Position, to: Position) -> (i32, i32) {
    (
        i32::from(to.x) - i32::from(from.x),
        i32::from(to.y) - i32::from(from.y),
    )
}

impl Gesture {
    /// Creates an idle gesture.
    #[must_use]
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            phase: Phase::Idle,
            epoch: 0,
            config,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns the epoch of the most recent press.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns `true` if nothing is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// Returns the active drag, if any.
    #[must_use]
    pub fn drag(&self) -> Option<&Drag> {
        match &self.phase {
            Phase::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    /// Handles the button going down at `pos`.
    ///
    /// Any press or drag in progress is discarded. If the press lands on a
    /// card the gesture becomes pending and the caller should select the
    /// card and arm the hold timer for the returned deadline. Otherwise the
    /// gesture stays idle.
    pub fn press(
        &mut self,
        pos: Position,
        at: Instant,
        viewport: &Viewport,
        columns: &[&Column],
    ) -> Option<PressStarted> {
        self.epoch += 1;
        self.phase = Phase::Idle;

        let hit = card_hit(pos, viewport, &column_lens(columns))?;
        let card_id = columns.get(hit.column)?.card_ids().get(hit.index)?.clone();
        debug!(column = hit.column, index = hit.index, epoch = self.epoch, "press on card");

        self.phase = Phase::Pending(PendingPress {
            origin: pos,
            pressed_at: at,
            hit,
            card_id,
            epoch: self.epoch,
        });
        Some(PressStarted {
            hit,
            epoch: self.epoch,
            deadline: at + self.config.drag_delay(),
        })
    }

    /// Handles the hold timer for `epoch` firing.
    ///
    /// Returns `true` if the pending press turned into a drag. Timers for an
    /// older press, or arriving after release, do nothing.
    pub fn timer_elapsed(&mut self, epoch: u64) -> bool {
        let current = matches!(&self.phase, Phase::Pending(press) if press.epoch == epoch);
        if current {
            debug!(epoch, "hold delay elapsed");
            self.escalate();
        }
        current
    }

    /// Handles pointer motion to `pos`.
    ///
    /// A pending press turns into a drag once the pointer has moved past the
    /// threshold. While dragging, the live drop target follows the pointer.
    pub fn motion(&mut self, pos: Position, viewport: &Viewport, columns: &[&Column]) {
        let moved_away = match &mut self.phase {
            Phase::Idle => false,
            Phase::Pending(press) => {
                let (dx, dy) = displacement(press.origin, pos);
                self.config.exceeds_threshold(dx, dy)
            }
            Phase::Dragging(drag) => {
                drag.target = drop_target(pos, viewport, &column_lens(columns));
                false
            }
        };
        if moved_away {
            debug!(x = pos.x, y = pos.y, "movement threshold exceeded");
            self.escalate();
        }
    }

    /// Handles the button going up at `pos`.
    ///
    /// The gesture is idle afterwards, whatever the outcome.
    pub fn release(
        &mut self,
        pos: Position,
        viewport: &Viewport,
        columns: &[&Column],
    ) -> GestureOutcome {
        let lens = column_lens(columns);
        let outcome = match std::mem::take(&mut self.phase) {
            Phase::Idle => GestureOutcome::Ignored,
            Phase::Pending(press) => {
                if card_hit(pos, viewport, &lens).is_some() {
                    GestureOutcome::Click(press.hit)
                } else {
                    GestureOutcome::Cancelled
                }
            }
            Phase::Dragging(drag) => match drop_target(pos, viewport, &lens) {
                Some(target) => GestureOutcome::Dropped {
                    source: drag.source,
                    card_id: drag.card_id,
                    target,
                },
                None => GestureOutcome::Abandoned,
            },
        };
        debug!(?outcome, "release");
        outcome
    }

    /// Discards any press or drag in progress.
    ///
    /// Returns `true` if something was discarded.
    pub fn cancel(&mut self) -> bool {
        let was_active = !self.is_idle();
        if was_active {
            debug!("gesture cancelled");
        }
        self.phase = Phase::Idle;
        was_active
    }

    /// Turns the pending press into a drag targeting its own position.
    fn escalate(&mut self) {
        if let Phase::Pending(press) = std::mem::take(&mut self.phase) {
            self.phase = Phase::Dragging(Drag {
                source: press.hit,
                card_id: press.card_id,
                target: Some(DropTarget {
                    column: press.hit.column,
                    slot: press.hit.index,
                }),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chrono::Utc;
    use cardstack_protocol::{Board, sample::sample_board};

    // 100 wide, 5 visible columns of 20 cells; content height 19.
    fn viewport() -> Viewport {
        Viewport::new(100, 24, false)
    }

    fn board() -> Board {
        sample_board(Utc::now())
    }

    fn todo_card(row: u16) -> Position {
        Position::new(25, row)
    }

    #[test]
    fn press_on_card_becomes_pending() {
        let board = board();
        let columns = board.visible_columns(false);
        let mut gesture = Gesture::new(InteractionConfig::default());
        let at = Instant::now();

        let started = gesture.press(todo_card(5), at, &viewport(), &columns).unwrap();

        assert_eq!(started.hit, CardHit { column: 1, index: 1 });
        assert_eq!(started.deadline, at + Duration::from_millis(150));
        assert_eq!(started.epoch, 1);
        let Phase::Pending(press) = gesture.phase() else {
            panic!("expected pending press");
        };
        assert_eq!(press.card_id, CardId::new("5"));
    }

    #[test]
    fn press_on_empty_column_stays_idle() {
        let board = Board::with_default_columns("Empty");
        let columns = board.visible_columns(false);
        let mut gesture = Gesture::new(InteractionConfig::default());

        assert!(
            gesture
                .press(Position::new(45, 4), Instant::now(), &viewport(), &columns)
                .is_none()
        );
        gesture.motion(Position::new(80, 10), &viewport(), &columns);
        assert!(gesture.is_idle());
        assert_eq!(
            gesture.release(Position::new(80, 10), &viewport(), &columns),
            GestureOutcome::Ignored
        );
        assert!(gesture.is_idle());

        // The epoch still advanced, and no timer escalates an idle gesture.
        assert_eq!(gesture.epoch(), 1);
        assert!(!gesture.timer_elapsed(1));
    }

    #[test]
    fn press_on_header_stays_idle() {
        let board = board();
        let columns = board.visible_columns(false);
        let mut gesture = Gesture::new(InteractionConfig::default());

        assert!(
            gesture
                .press(Position::new(25, 2), Instant::now(), &viewport(), &columns)
                .is_none()
        );
        assert!(gesture.is_idle());
    }

    #[test]
    fn quick_release_is_a_click() {
        let board = board();
        let columns = board.visible_columns(false);
        let mut gesture = Gesture::new(InteractionConfig::default());

        let started = gesture
            .press(todo_card(3), Instant::now(), &viewport(), &columns)
            .unwrap();
        let outcome = gesture.release(todo_card(3), &viewport(), &columns);

        assert_eq!(outcome, GestureOutcome::Click(started.hit));
    }

    #[test]
    fn small_jitter_is_still_a_click() {
        let board = board();
        let columns = board.visible_columns(false);
        let mut gesture = Gesture::new(InteractionConfig::default());

        gesture.press(todo_card(3), Instant::now(), &viewport(), &columns);
        gesture.motion(Position::new(26, 4), &viewport(), &columns);

        assert!(matches!(gesture.phase(), Phase::Pending(_)));
        assert!(matches!(
            gesture.release(Position::new(26, 4), &viewport(), &columns),
            GestureOutcome::Click(_)
        ));
    }

    #[test]
    fn click_released_on_another_card_keeps_pressed_card() {
        let board = board();
        let columns = board.visible_columns(false);
        let mut gesture = Gesture::new(InteractionConfig::default());

        let started = gesture
            .press(todo_card(3), Instant::now(), &viewport(), &columns)
            .unwrap();
        // No motion reported in between, so the press never escalated.
        let outcome = gesture.release(Position::new(45, 4), &viewport(), &columns);

        assert_eq!(started.hit, CardHit { column: 1, index: 0 });
        assert_eq!(outcome, GestureOutcome::Click(started.hit));
        assert!(gesture.is_idle());
    }

    #[test]
    fn release_away_from_cards_cancels() {
        let board = board();
        let columns = board.visible_columns(false);
        let mut gesture = Gesture::new(InteractionConfig::default());

        gesture.press(todo_card(3), Instant::now(), &viewport(), &columns);
        let outcome = gesture.release(Position::new(25, 1), &viewport(), &columns);

        assert_eq!(outcome, GestureOutcome::Cancelled);
    }

    #[test]
    fn hold_timer_escalates_to_drag_at_press_position() {
        let board = board();
        let columns = board.visible_columns(false);
        let mut gesture = Gesture::new(InteractionConfig::default());

        let started = gesture
            .press(todo_card(3), Instant::now(), &viewport(), &columns)
            .unwrap();
        assert!(gesture.timer_elapsed(started.epoch));

        let drag = gesture.drag().unwrap();
        assert_eq!(drag.source, started.hit);
        assert_eq!(drag.card_id, CardId::new("1"));
        assert_eq!(drag.target, Some(DropTarget { column: 1, slot: 0 }));
    }

    #[test]
    fn stale_timer_is_ignored() {
        let board = board();
        let columns = board.visible_columns(false);
        let mut gesture = Gesture::new(InteractionConfig::default());

        let first = gesture
            .press(todo_card(3), Instant::now(), &viewport(), &columns)
            .unwrap();
        gesture.release(todo_card(3), &viewport(), &columns);
        assert!(!gesture.timer_elapsed(first.epoch));
        assert!(gesture.is_idle());

        let second = gesture
            .press(todo_card(3), Instant::now(), &viewport(), &columns)
            .unwrap();
        assert!(!gesture.timer_elapsed(first.epoch));
        assert!(gesture.timer_elapsed(second.epoch));
    }

    #[test]
    fn movement_past_threshold_escalates() {
        let board = board();
        let columns = board.visible_columns(false);
        let mut gesture = Gesture::new(InteractionConfig::default());

        gesture.press(todo_card(3), Instant::now(), &viewport(), &columns);
        gesture.motion(Position::new(28, 3), &viewport(), &columns);

        assert_eq!(
            gesture.drag().map(|d| d.target),
            Some(Some(DropTarget { column: 1, slot: 0 }))
        );
    }

    #[test]
    fn motion_while_dragging_tracks_target() {
        let board = board();
        let columns = board.visible_columns(false);
        let mut gesture = Gesture::new(InteractionConfig::default());

        let started = gesture
            .press(todo_card(3), Instant::now(), &viewport(), &columns)
            .unwrap();
        gesture.timer_elapsed(started.epoch);

        // DONE is the fifth visible column; one card, lower half of it.
        gesture.motion(Position::new(85, 6), &viewport(), &columns);
        assert_eq!(
            gesture.drag().and_then(|d| d.target),
            Some(DropTarget { column: 4, slot: 1 })
        );

        // Over the title bar there is no target.
        gesture.motion(Position::new(85, 0), &viewport(), &columns);
        assert_eq!(gesture.drag().and_then(|d| d.target), None);
    }

    #[test]
    fn release_while_dragging_drops_at_release_position() {
        let board = board();
        let columns = board.visible_columns(false);
        let mut gesture = Gesture::new(InteractionConfig::default());

        let started = gesture
            .press(todo_card(3), Instant::now(), &viewport(), &columns)
            .unwrap();
        gesture.timer_elapsed(started.epoch);
        gesture.motion(Position::new(85, 6), &viewport(), &columns);

        let outcome = gesture.release(Position::new(5, 3), &viewport(), &columns);
        assert_eq!(
            outcome,
            GestureOutcome::Dropped {
                source: CardHit { column: 1, index: 0 },
                card_id: CardId::new("1"),
                target: DropTarget { column: 0, slot: 0 },
            }
        );
        assert!(gesture.is_idle());
    }

    #[test]
    fn release_outside_board_abandons_drag() {
        let board = board();
        let columns = board.visible_columns(false);
        let mut gesture = Gesture::new(InteractionConfig::default());

        let started = gesture
            .press(todo_card(3), Instant::now(), &viewport(), &columns)
            .unwrap();
        gesture.timer_elapsed(started.epoch);

        let outcome = gesture.release(Position::new(5, 0), &viewport(), &columns);
        assert_eq!(outcome, GestureOutcome::Abandoned);
    }

    #[test]
    fn cancel_discards_pending_and_drag() {
        let board = board();
        let columns = board.visible_columns(false);
        let mut gesture = Gesture::new(InteractionConfig::default());

        assert!(!gesture.cancel());

        let started = gesture
            .press(todo_card(3), Instant::now(), &viewport(), &columns)
            .unwrap();
        assert!(gesture.cancel());
        assert!(!gesture.timer_elapsed(started.epoch));

        let started = gesture
            .press(todo_card(3), Instant::now(), &viewport(), &columns)
            .unwrap();
        gesture.timer_elapsed(started.epoch);
        assert!(gesture.cancel());
        assert_eq!(
            gesture.release(todo_card(3), &viewport(), &columns),
            GestureOutcome::Ignored
        );
    }

    #[test]
    fn new_press_replaces_active_drag() {
        let board = board();
        let columns = board.visible_columns(false);
        let mut gesture = Gesture::new(InteractionConfig::default());

        let first = gesture
            .press(todo_card(3), Instant::now(), &viewport(), &columns)
            .unwrap();
        gesture.timer_elapsed(first.epoch);

        let second = gesture
            .press(Position::new(5, 3), Instant::now(), &viewport(), &columns)
            .unwrap();
        assert_eq!(second.hit, CardHit { column: 0, index: 0 });
        assert!(matches!(gesture.phase(), Phase::Pending(_)));
    }

    #[test]
    fn custom_threshold_is_respected() {
        let board = board();
        let columns = board.visible_columns(false);
        let config = InteractionConfig {
            drag_delay_ms: 500,
            drag_threshold: 25,
        };
        let mut gesture = Gesture::new(config);

        let at = Instant::now();
        let started = gesture.press(todo_card(3), at, &viewport(), &columns).unwrap();
        assert_eq!(started.deadline, at + Duration::from_millis(500));

        gesture.motion(Position::new(29, 3), &viewport(), &columns);
        assert!(gesture.drag().is_none());
        gesture.motion(Position::new(31, 3), &viewport(), &columns);
        assert!(gesture.drag().is_some());
    }
}
