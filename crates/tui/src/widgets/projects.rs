//! Project list screen.

use std::path::Path;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use cardstack_store::Project;

use super::card::truncate_string;

/// Renders the list of discovered projects, highlighting `selected`.
///
/// Paths are shown relative to `base`.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use cardstack_store::Project;
/// use cardstack_tui::widgets::render_project_list;
///
/// let projects = vec![Project {
///     name: "api".into(),
///     path: PathBuf::from("/work/api/.cardstack.yaml"),
///     dir: PathBuf::from("/work/api"),
/// }];
/// let area = Rect::new(0, 0, 80, 10);
/// let mut buf = Buffer::empty(area);
///
/// render_project_list(&projects, 0, Path::new("/work"), area, &mut buf);
/// ```
pub fn render_project_list(
    projects: &[Project],
    selected: usize,
    base: &Path,
    area: Rect,
    buf: &mut Buffer,
) {
    if area.width < 4 || area.height < 3 {
        return;
    }

    let block = Block::default()
        .title(Span::styled(
            " Projects ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    block.render(area, buf);

    let width = usize::from(inner.width);
    let mut lines = vec![Line::from("")];
    if projects.is_empty() {
        lines.push(Line::from(Span::styled(
            "   No projects found",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    for (index, project) in projects.iter().enumerate() {
        let is_selected = index == selected;
        let (marker, name_style) = if is_selected {
            (
                " ▶ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("   ", Style::default().fg(Color::White))
        };
        let name = truncate_string(&project.name, width.saturating_sub(3));
        let path_budget = width.saturating_sub(3 + name.chars().count() + 3);
        lines.push(Line::from(vec![
            Span::styled(marker, name_style),
            Span::styled(name, name_style),
            Span::styled(
                format!("  {}", truncate_string(&project.display_path(base), path_budget)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "   Press Enter to open the selected project",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));

    Paragraph::new(lines).render(inner, buf);
}
