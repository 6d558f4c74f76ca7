//! Card rendering widget.
//!
//! A card is drawn in [`FULL_CARD_HEIGHT`](crate::layout::FULL_CARD_HEIGHT)
//! rows:
//!
//! ```text
//! ┌──────────────────┐
//! │Fix login flow    │
//! │#auth @alice      │
//! │Users get a 401...│
//! └──────────────────┘
//! ```
//!
//! Cards covered by the next card in their stack only show the top border
//! and the title row; the caller handles that by drawing over them.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use cardstack_protocol::Card;

/// How a card is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardStyle {
    /// Plain card.
    #[default]
    Normal,
    /// The selected card.
    Selected,
    /// The card being dragged, left dimmed at its source position.
    Ghost,
}

impl CardStyle {
    const fn border(self) -> Style {
        match self {
            Self::Normal => Style::new().fg(Color::DarkGray),
            Self::Selected => Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            Self::Ghost => Style::new().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        }
    }

    const fn title(self) -> Style {
        match self {
            Self::Normal => Style::new().fg(Color::White),
            Self::Selected => Style::new().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
            Self::Ghost => Style::new().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        }
    }

    const fn detail(self) -> Style {
        match self {
            Self::Ghost => Style::new().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            _ => Style::new().fg(Color::Gray),
        }
    }
}

/// Renders a card into `area`.
///
/// Areas narrower than 4 cells or shorter than 2 rows are skipped.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use cardstack_protocol::Card;
/// use cardstack_tui::widgets::{CardStyle, render_card};
///
/// let card = Card::new("Write tests", "TODO");
/// let area = Rect::new(0, 0, 20, 5);
/// let mut buf = Buffer::empty(area);
///
/// render_card(&card, CardStyle::Selected, area, &mut buf);
/// ```
pub fn render_card(card: &Card, style: CardStyle, area: Rect, buf: &mut Buffer) {
    if area.width < 4 || area.height < 2 {
        return;
    }

    let inner_width = usize::from(area.width.saturating_sub(2));
    let lines = vec![
        Line::from(Span::styled(
            truncate_string(&card.title, inner_width),
            style.title(),
        )),
        Line::from(Span::styled(
            truncate_string(&meta_line(card), inner_width),
            style.detail(),
        )),
        Line::from(Span::styled(
            truncate_string(first_line(&card.description), inner_width),
            style.detail(),
        )),
    ];

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style.border()),
        )
        .render(area, buf);
}

/// Tags and assignee, e.g. `#bug #ui @alice`.
fn meta_line(card: &Card) -> String {
    let mut parts: Vec<String> = card.tags.iter().map(|tag| format!("#{tag}")).collect();
    if let Some(assignee) = &card.assignee {
        parts.push(format!("@{assignee}"));
    }
    parts.join(" ")
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

/// Truncates a string to fit within a given width, adding ellipsis if needed.
pub(crate) fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        let truncated: String = s.chars().take(max_width - 3).collect();
        format!("{truncated}...")
    } else {
        s.chars().take(max_width).collect()
    }
}
