//! Card detail side panel.
//!
//! Shows everything about the selected card: title, column, description,
//! tags, assignee, due date, link and timestamps. The panel takes the right
//! third of the screen when enabled.

use chrono::{DateTime, NaiveDate, Utc};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use cardstack_protocol::Card;

/// Date format used for timestamps, e.g. `Jan 2, 2006`.
const DATE_FORMAT: &str = "%b %-d, %Y";

/// Returns a color for a tag based on its name (deterministic).
///
/// # Examples
///
/// ```
/// use cardstack_tui::widgets::label_color;
///
/// assert_eq!(label_color("bug"), label_color("bug"));
/// ```
#[must_use]
pub fn label_color(label: &str) -> Color {
    let hash: u32 = label
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_add(u32::from(b)));
    match hash % 6 {
        0 => Color::LightBlue,
        1 => Color::LightGreen,
        2 => Color::LightYellow,
        3 => Color::LightMagenta,
        4 => Color::LightCyan,
        _ => Color::LightRed,
    }
}

/// Formats a timestamp for the panel.
#[must_use]
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format(DATE_FORMAT).to_string()
}

/// Renders the detail panel for `card`, or a placeholder when no card is
/// selected.
///
/// `today` decides whether the due date is shown as overdue.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use cardstack_protocol::Card;
/// use cardstack_tui::widgets::render_detail_panel;
///
/// let card = Card::new("Write tests", "TODO").with_description("Cover the drag path");
/// let area = Rect::new(0, 0, 40, 20);
/// let mut buf = Buffer::empty(area);
///
/// render_detail_panel(Some(&card), Utc::now().date_naive(), area, &mut buf);
/// ```
pub fn render_detail_panel(card: Option<&Card>, today: NaiveDate, area: Rect, buf: &mut Buffer) {
    if area.width < 4 || area.height < 3 {
        return;
    }

    let block = Block::default()
        .title(Span::styled(
            " Details ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(card) = card else {
        Paragraph::new(Line::from(Span::styled(
            "No card selected",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )))
        .alignment(Alignment::Center)
        .block(block)
        .render(area, buf);
        return;
    };

    Paragraph::new(build_detail_lines(card, today))
        .block(block)
        .wrap(Wrap { trim: false })
        .render(area, buf);
}

fn build_detail_lines(card: &Card, today: NaiveDate) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(Color::DarkGray);
    let text_style = Style::default().fg(Color::White);

    let mut lines = vec![
        Line::from(Span::styled(
            card.title.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Column: ", label_style),
            Span::styled(card.column.clone(), text_style),
        ]),
        Line::from(""),
        Line::from(Span::styled("Description", header_style)),
    ];

    if card.description.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            "No description",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    } else {
        lines.extend(
            card.description
                .lines()
                .map(|line| Line::from(Span::styled(line.to_string(), text_style))),
        );
    }

    if !card.tags.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Tags", header_style)));
        let mut spans = Vec::with_capacity(card.tags.len() * 2);
        for tag in &card.tags {
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!("#{tag}"),
                Style::default().fg(label_color(tag)),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    if let Some(assignee) = &card.assignee {
        lines.push(Line::from(vec![
            Span::styled("Assigned: ", label_style),
            Span::styled(assignee.clone(), text_style),
        ]));
    }
    if let Some(due) = card.due_date {
        let due_style = if card.is_overdue(today) {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            text_style
        };
        lines.push(Line::from(vec![
            Span::styled("Due: ", label_style),
            Span::styled(due.format(DATE_FORMAT).to_string(), due_style),
        ]));
    }
    if let Some(url) = &card.url {
        lines.push(Line::from(vec![
            Span::styled("Link: ", label_style),
            Span::styled(
                url.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("Created: ", label_style),
        Span::styled(format_date(card.created_at), text_style),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Modified: ", label_style),
        Span::styled(format_date(card.modified_at), text_style),
    ]));

    lines
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::test_utils::buffer_to_string;

    fn fixed_card() -> Card {
        let at = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
        let mut card = Card::new("Fix login flow", "TODO")
            .with_description("Users get a 401")
            .with_tags(["auth", "bug"])
            .with_assignee("alice")
            .with_due_date(NaiveDate::from_ymd_opt(2006, 1, 10).unwrap())
            .with_url("https://example.com/issues/1");
        card.created_at = at;
        card.modified_at = at;
        card
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2006, 1, 5).unwrap()
    }

    #[test]
    fn format_date_matches_short_month_style() {
        let at = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
        assert_eq!(format_date(at), "Jan 2, 2006");
    }

    #[test]
    fn label_color_is_deterministic() {
        assert_eq!(label_color("bug"), label_color("bug"));
    }

    #[test]
    fn placeholder_when_nothing_selected() {
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);

        render_detail_panel(None, today(), area, &mut buf);

        assert!(buffer_to_string(&buf).contains("No card selected"));
    }

    #[test]
    fn shows_all_card_fields() {
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);

        render_detail_panel(Some(&fixed_card()), today(), area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("Details"));
        assert!(content.contains("Fix login flow"));
        assert!(content.contains("Column: TODO"));
        assert!(content.contains("Users get a 401"));
        assert!(content.contains("#auth #bug"));
        assert!(content.contains("Assigned: alice"));
        assert!(content.contains("Due: Jan 10, 2006"));
        assert!(content.contains("Created: Jan 2, 2006"));
        assert!(content.contains("Modified: Jan 2, 2006"));
    }

    #[test]
    fn overdue_date_is_red() {
        let lines = build_detail_lines(&fixed_card(), NaiveDate::from_ymd_opt(2006, 2, 1).unwrap());
        let due = lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .find(|span| span.content == "Jan 10, 2006")
            .expect("due date span");
        assert_eq!(due.style.fg, Some(Color::Red));
    }

    #[test]
    fn empty_description_has_placeholder() {
        let lines = build_detail_lines(&Card::new("Bare", "TODO"), today());
        assert!(
            lines
                .iter()
                .flat_map(|line| line.spans.iter())
                .any(|span| span.content == "No description")
        );
    }

    #[test]
    fn tiny_area_is_skipped() {
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        render_detail_panel(Some(&fixed_card()), today(), area, &mut buf);
        assert_eq!(buffer_to_string(&buf), "\n\n");
    }
}
