//! Board rendering widget.
//!
//! Draws the title bar, the column headers and the card stacks. Every
//! position is derived from [`Viewport`] and [`StackLayout`], the same
//! values the pointer hit-testing uses, so a card is always hit where it is
//! drawn.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use cardstack_protocol::{Board, CardId, Column};

use super::card::{CardStyle, render_card, truncate_string};
use crate::geometry::{DropTarget, StackLayout, column_width};
use crate::layout::{CARD_AREA_TOP, FULL_CARD_HEIGHT, TITLE_HEIGHT, Viewport};

/// Everything needed to draw the board for one frame.
#[derive(Debug, Clone, Copy)]
pub struct BoardFrame<'a> {
    /// The board being drawn.
    pub board: &'a Board,
    /// The visible columns, in display order.
    pub columns: &'a [&'a Column],
    /// Index of the selected column.
    pub selected_column: usize,
    /// Index of the selected card in that column.
    pub selected_card: Option<usize>,
    /// The card being dragged and its current drop target.
    pub drag: Option<(&'a CardId, Option<DropTarget>)>,
}

/// Renders the title bar: board name on the first row, a separator below.
pub fn render_title_bar(board: &Board, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }
    let mut spans = vec![Span::styled(
        format!(" {}", board.name),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if !board.description.is_empty() {
        spans.push(Span::styled(
            format!("  {}", board.description),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Paragraph::new(Line::from(spans)).render(Rect { height: 1, ..area }, buf);

    if area.height > 1 {
        render_separator(area.x, area.y + 1, area.width, buf);
    }
}

/// Draws a horizontal rule.
pub(crate) fn render_separator(x: u16, y: u16, width: u16, buf: &mut Buffer) {
    buf.set_string(
        x,
        y,
        "─".repeat(usize::from(width)),
        Style::default().fg(Color::DarkGray),
    );
}

/// Renders the column headers and card stacks into the board area of
/// `viewport`.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use cardstack_protocol::sample::sample_board;
/// use cardstack_tui::layout::Viewport;
/// use cardstack_tui::widgets::{BoardFrame, render_board};
///
/// let board = sample_board(Utc::now());
/// let columns = board.visible_columns(false);
/// let viewport = Viewport::new(100, 24, false);
/// let mut buf = Buffer::empty(Rect::new(0, 0, 100, 24));
///
/// let frame = BoardFrame {
///     board: &board,
///     columns: &columns,
///     selected_column: 0,
///     selected_card: Some(0),
///     drag: None,
/// };
/// render_board(&frame, &viewport, &mut buf);
/// ```
pub fn render_board(frame: &BoardFrame<'_>, viewport: &Viewport, buf: &mut Buffer) {
    let width = column_width(viewport, frame.columns.len());
    if width == 0 {
        return;
    }
    let content_height = viewport.content_height();

    for (index, column) in frame.columns.iter().enumerate() {
        let Ok(offset) = u16::try_from(index) else {
            break;
        };
        let x = offset * width;
        let stack = StackLayout::new(column.len(), content_height);
        let selected = index == frame.selected_column;

        let header = Rect::new(x, TITLE_HEIGHT, width, 1);
        render_header(column, &stack, selected, header, buf);
        let area = Rect::new(x, CARD_AREA_TOP, width, content_height);
        render_stack(frame, column, &stack, selected, area, buf);

        match frame.drag {
            Some((_, Some(target))) if target.column == index => {
                render_drop_line(&stack, target.slot, area, buf);
            }
            _ => {}
        }
    }
}

fn render_header(
    column: &Column,
    stack: &StackLayout,
    selected: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    let style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    };

    let mut text = format!(" {} ({})", column.name(), column.len());
    if stack.start() > 0 {
        text.push_str(&format!(" ↑{}", stack.start()));
    }
    buf.set_string(
        area.x,
        area.y,
        truncate_string(&text, usize::from(area.width)),
        style,
    );
}

/// Draws the visible cards from the top of the stack down, each at full
/// height, so every card covers all but the top rows of the one above.
fn render_stack(
    frame: &BoardFrame<'_>,
    column: &Column,
    stack: &StackLayout,
    selected: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    if column.is_empty() {
        if area.height > 0 && area.width > 2 {
            buf.set_string(
                area.x + 1,
                area.y,
                truncate_string("No cards", usize::from(area.width - 2)),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            );
        }
        return;
    }

    let dragged = frame.drag.map(|(id, _)| id);
    for (index, card_id) in column.card_ids().iter().enumerate() {
        let Some(top) = stack.card_top(index) else {
            continue;
        };
        let Some(card) = frame.board.card(card_id) else {
            continue;
        };
        let Ok(top) = u16::try_from(top) else {
            break;
        };
        if top >= area.height {
            break;
        }

        let style = if dragged == Some(card_id) {
            CardStyle::Ghost
        } else if selected && frame.selected_card == Some(index) {
            CardStyle::Selected
        } else {
            CardStyle::Normal
        };
        let card_area = Rect::new(
            area.x + 1,
            area.y + top,
            area.width.saturating_sub(2),
            FULL_CARD_HEIGHT.min(area.height - top),
        );
        render_card(card, style, card_area, buf);
    }
}

fn render_drop_line(stack: &StackLayout, slot: usize, area: Rect, buf: &mut Buffer) {
    let Ok(row) = u16::try_from(stack.slot_row(slot)) else {
        return;
    };
    if row >= area.height {
        return;
    }
    buf.set_string(
        area.x,
        area.y + row,
        "━".repeat(usize::from(area.width)),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
}
