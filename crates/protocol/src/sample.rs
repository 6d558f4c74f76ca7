//! Sample board used when no board exists yet.
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use cardstack_protocol::sample::sample_board;
//!
//! let board = sample_board(Utc::now());
//! assert_eq!(board.len(), 6);
//! assert!(board.check_invariants().is_ok());
//! ```

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::board::Board;
use crate::card::{Card, CardId};

/// Builds a card whose timestamps are offsets (in days) before `now`.
fn sample_card(
    id: &str,
    title: &str,
    column: &str,
    now: DateTime<Utc>,
    (created_days_ago, modified_days_ago): (i64, i64),
    due: Option<NaiveDate>,
) -> Card {
    let mut card = Card::with_id(
        CardId::new(id),
        title,
        column,
        now - Duration::days(created_days_ago),
    );
    card.touch(now - Duration::days(modified_days_ago));
    card.due_date = due;
    card
}

/// Generates a sample board with one or two cards in every working column.
///
/// The archive column is left empty.
#[must_use]
pub fn sample_board(now: DateTime<Utc>) -> Board {
    let january = |day| NaiveDate::from_ymd_opt(2025, 1, day);

    let cards = [
        sample_card("0", "New feature idea", "BACKLOG", now, (20, 15), None)
            .with_description("Consider adding dark mode support.")
            .with_tags(["enhancement"]),
        sample_card("1", "Fix login flow", "TODO", now, (10, 1), january(15))
            .with_description("Users can't authenticate via OAuth. Error 401 on token refresh.")
            .with_tags(["bug", "p1"])
            .with_assignee("@alice"),
        sample_card("5", "Write tests", "TODO", now, (9, 2), january(22))
            .with_description("Add unit tests for authentication module.")
            .with_tags(["test"])
            .with_assignee("@alice"),
        sample_card("2", "Add OAuth support", "PROGRESS", now, (8, 1), january(20))
            .with_description(
                "Implement OAuth 2.0 authentication flow with Google and GitHub providers.",
            )
            .with_tags(["feature"])
            .with_assignee("@bob"),
        sample_card("3", "Review PR #42", "REVIEW", now, (5, 1), january(18))
            .with_description("Code review for authentication refactor pull request.")
            .with_tags(["code-review"])
            .with_assignee("@charlie"),
        sample_card("4", "Setup database", "DONE", now, (15, 10), None)
            .with_description("Configure PostgreSQL database and run migrations.")
            .with_tags(["infra", "done"])
            .with_assignee("@dave"),
    ];

    let mut board = Board::with_default_columns("My Project");
    board.description = "A sample Kanban board".to_string();
    board.created_at = now - Duration::days(20);
    board.modified_at = now;
    for card in cards {
        if let Some(column) = board.columns.iter_mut().find(|c| c.name() == card.column) {
            column.cards.push(card.id.clone());
            board.cards.insert(card.id.clone(), card);
        }
    }
    board
}
