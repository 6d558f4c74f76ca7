//! Rendering tests for the board as a whole.
//!
//! These check that cards are drawn where the pointer geometry expects
//! them.

use chrono::Utc;
use ratatui::{buffer::Buffer, layout::Rect, style::Modifier};

use cardstack_protocol::{Board, CardId};

use super::{BoardFrame, render_board, render_title_bar};
use crate::geometry::DropTarget;
use crate::layout::Viewport;
use crate::test_utils::{buffer_row as row, buffer_to_string, fixed_board};

fn render(
    board: &Board,
    viewport: Viewport,
    drag: Option<(&CardId, Option<DropTarget>)>,
) -> Buffer {
    let columns = board.visible_columns(false);
    let mut buf = Buffer::empty(Rect::new(0, 0, viewport.width, viewport.height));
    let frame = BoardFrame {
        board,
        columns: &columns,
        selected_column: 0,
        selected_card: Some(0),
        drag,
    };
    render_board(&frame, &viewport, &mut buf);
    buf
}

#[test]
fn headers_show_counts() {
    let buf = render(&fixed_board(), Viewport::new(100, 24, false), None);
    let header = row(&buf, 2);

    for label in ["BACKLOG (1)", "TODO (2)", "PROGRESS (1)", "REVIEW (1)", "DONE (1)"] {
        assert!(header.contains(label), "missing {label} in {header:?}");
    }
    assert!(!header.contains("ARCHIVE"));
}

#[test]
fn stacked_cards_show_title_rows() {
    let buf = render(&fixed_board(), Viewport::new(100, 24, false), None);

    // TODO is the second 20-cell column: the first card's title sits on the
    // second row of the card area, the covering card starts two rows lower.
    assert!(row(&buf, 4).contains("Fix login flow"));
    assert!(row(&buf, 5).contains("┌"));
    assert!(row(&buf, 6).contains("Write tests"));
}

#[test]
fn single_column_layout() {
    let mut board = Board::new("Tiny", ["TODO"]).unwrap();
    board.create_card("TODO", "Ship it", "", Utc::now()).unwrap();
    let buf = render(&board, Viewport::new(20, 12, false), None);

    let lines: Vec<String> = (2..9).map(|y| row(&buf, y)).collect();
    assert_eq!(
        lines,
        [
            " TODO (1)",
            " ┌────────────────┐",
            " │Ship it         │",
            " │                │",
            " │                │",
            " └────────────────┘",
            "",
        ]
    );
}

#[test]
fn hidden_cards_are_counted_in_header() {
    let mut board = Board::with_default_columns("Busy");
    for n in 0..10 {
        board
            .create_card("TODO", &format!("Card {n}"), "", Utc::now())
            .unwrap();
    }
    // 15 content rows fit six cards, so four are hidden above.
    let buf = render(&board, Viewport::new(80, 20, false), None);

    assert!(row(&buf, 2).contains("TODO (10) ↑4"));
    assert!(row(&buf, 4).contains("Card 4"));
    assert!(!buffer_to_string(&buf).contains("Card 3"));
}

#[test]
fn empty_columns_show_placeholder() {
    let board = Board::with_default_columns("Empty");
    let buf = render(&board, Viewport::new(100, 24, false), None);

    assert!(row(&buf, 3).contains("No cards"));
}

#[test]
fn selected_card_uses_highlight_border() {
    let buf = render(&fixed_board(), Viewport::new(100, 24, false), None);

    let corner = buf.cell((1, 3)).expect("cell should exist");
    assert_eq!(corner.symbol(), "┌");
    assert_eq!(corner.fg, ratatui::style::Color::Cyan);
}

#[test]
fn drag_draws_ghost_and_drop_line() {
    let board = fixed_board();
    let dragged = CardId::new("1");
    // Drop after the only card in REVIEW (fourth column).
    let target = DropTarget { column: 3, slot: 1 };
    let buf = render(
        &board,
        Viewport::new(100, 24, false),
        Some((&dragged, Some(target))),
    );

    let title = buf.cell((22, 4)).expect("cell should exist");
    assert_eq!(title.symbol(), "F");
    assert!(title.modifier.contains(Modifier::DIM));

    // The end slot line sits right below the full card: 3 + 5.
    assert!(row(&buf, 8).contains(&"━".repeat(20)));
    // The card itself does not move.
    assert!(row(&buf, 4).contains("Review PR #42"));
}

#[test]
fn drop_line_without_target_is_not_drawn() {
    let board = fixed_board();
    let dragged = CardId::new("1");
    let buf = render(&board, Viewport::new(100, 24, false), Some((&dragged, None)));

    assert!(!buffer_to_string(&buf).contains('━'));
}

#[test]
fn detail_panel_narrows_columns() {
    let board = fixed_board();
    let buf = render(&board, Viewport::new(120, 24, true), None);

    // 80 cells of board width split five ways.
    assert!(row(&buf, 2).starts_with(" BACKLOG (1)"));
    assert_eq!(buf.cell((16, 2)).map(|cell| cell.symbol()), Some(" "));
    assert_eq!(buf.cell((17, 2)).map(|cell| cell.symbol()), Some("T"));
    assert!(row(&buf, 2).contains(" DONE (1)"));
}

#[test]
fn title_bar_shows_board_name() {
    let board = fixed_board();
    let area = Rect::new(0, 0, 40, 2);
    let mut buf = Buffer::empty(area);

    render_title_bar(&board, area, &mut buf);

    assert!(row(&buf, 0).starts_with(" My Project"));
    assert_eq!(row(&buf, 1), "─".repeat(40));
}
