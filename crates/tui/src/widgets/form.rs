//! Card form overlay.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::help::centered_rect;
use crate::form::{CardForm, FormField};

const FORM_WIDTH: u16 = 60;
const FORM_HEIGHT: u16 = 14;

/// Renders the create/edit form centered in `area`.
///
/// The focused field shows a block cursor after its text.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use cardstack_tui::form::CardForm;
/// use cardstack_tui::widgets::render_form;
///
/// let form = CardForm::create("TODO");
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_form(&form, area, &mut buf);
/// ```
pub fn render_form(form: &CardForm, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(FORM_WIDTH, FORM_HEIGHT, area);
    Clear.render(popup, buf);

    let title = if form.is_edit() {
        " Edit Card "
    } else {
        " New Card "
    };
    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = vec![Line::from("")];
    lines.extend(field_lines(
        "Title",
        form.title(),
        form.focus() == FormField::Title,
    ));
    lines.push(Line::from(""));
    lines.extend(field_lines(
        "Description",
        form.description(),
        form.focus() == FormField::Description,
    ));
    lines.push(Line::from(""));
    if let Some(error) = form.error() {
        lines.push(Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(Span::styled(
        " Enter: Save | Tab: Switch field | Esc: Cancel",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));

    Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .render(popup, buf);
}

fn field_lines(label: &'static str, value: &str, focused: bool) -> [Line<'static>; 2] {
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![Span::styled(
        format!(" {value}"),
        Style::default().fg(Color::White),
    )];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    [
        Line::from(Span::styled(format!(" {label}"), label_style)),
        Line::from(spans),
    ]
}
