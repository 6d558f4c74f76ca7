//! Status bar rendering widget.
//!
//! The footer is a separator row followed by either the last status message
//! or the key hints for the current view.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::board::render_separator;
use crate::state::{StatusMessage, View};

/// What the status bar needs to know about the application.
#[derive(Debug, Clone, Copy)]
pub struct StatusContext<'a> {
    /// The current screen.
    pub view: View,
    /// Whether the archive column is shown.
    pub show_archive: bool,
    /// Whether there is more than one project to switch to.
    pub has_projects: bool,
    /// A status message replacing the hints, if any.
    pub status: Option<&'a StatusMessage>,
}

/// Renders the status bar into the bottom two rows of `area`.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use cardstack_tui::View;
/// use cardstack_tui::widgets::{StatusContext, render_status_bar};
///
/// let area = Rect::new(0, 0, 80, 2);
/// let mut buf = Buffer::empty(area);
/// let context = StatusContext {
///     view: View::Board,
///     show_archive: false,
///     has_projects: false,
///     status: None,
/// };
///
/// render_status_bar(&context, area, &mut buf);
/// ```
pub fn render_status_bar(context: &StatusContext<'_>, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }
    if area.height > 1 {
        render_separator(area.x, area.y, area.width, buf);
    }
    let line_area = Rect {
        y: area.y + area.height - 1,
        height: 1,
        ..area
    };

    let line = match context.status {
        Some(status) => {
            let color = if status.is_error {
                Color::Red
            } else {
                Color::Cyan
            };
            Line::from(Span::styled(
                format!(" {}", status.text),
                Style::default().fg(color),
            ))
        }
        None => hint_line(context),
    };
    Paragraph::new(line).render(line_area, buf);
}

fn hint_line(context: &StatusContext<'_>) -> Line<'static> {
    let key_style = Style::default().fg(Color::Yellow);
    let text_style = Style::default().fg(Color::White);

    let archive = if context.show_archive {
        ": Archive (visible)"
    } else {
        ": Archive (hidden)"
    };
    let mut hints: Vec<(&'static str, &'static str)> = match context.view {
        View::Board => vec![
            ("←/→", ": Columns"),
            ("↑/↓", ": Cards"),
            ("Tab", ": Details"),
            ("a", archive),
        ],
        View::Projects => vec![("↑/↓", ": Select"), ("Enter", ": Open")],
    };
    if context.view == View::Board && context.has_projects {
        hints.push(("p", ": Projects"));
    }
    hints.push(("?", ": Help"));
    hints.push(("q", ": Quit"));

    let mut spans = vec![Span::raw(" ")];
    for (index, (key, text)) in hints.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(" | ", text_style));
        }
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(text, text_style));
    }
    Line::from(spans)
}
