//! Shared helpers for rendering tests.

use chrono::{TimeZone, Utc};
use ratatui::{Frame, Terminal, backend::TestBackend, buffer::Buffer};

use cardstack_protocol::{Board, sample::sample_board};

/// The sample board stamped at a fixed instant, so rendered dates never
/// depend on the clock.
pub(crate) fn fixed_board() -> Board {
    sample_board(Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap())
}

/// Row `y` of `buf` without trailing spaces.
pub(crate) fn buffer_row(buf: &Buffer, y: u16) -> String {
    let row: String = (0..buf.area.width)
        .filter_map(|x| buf.cell((buf.area.x + x, buf.area.y + y)))
        .map(|cell| cell.symbol())
        .collect();
    row.trim_end_matches(' ').to_string()
}

/// The whole buffer, one trimmed row per line.
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    (0..buf.area.height)
        .map(|y| buffer_row(buf, y) + "\n")
        .collect()
}

/// Draws a single frame on a `width`×`height` test terminal and returns
/// what ended up on screen.
pub(crate) fn draw(width: u16, height: u16, render: impl FnOnce(&mut Frame)) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(render).unwrap();
    terminal.backend().buffer().clone()
}

#[test]
fn rows_drop_trailing_blanks_only() {
    let buf = draw(12, 2, |frame| {
        frame.buffer_mut().set_string(
            2,
            1,
            "a  b",
            ratatui::style::Style::default(),
        );
    });

    assert_eq!(buffer_row(&buf, 0), "");
    assert_eq!(buffer_row(&buf, 1), "  a  b");
    assert_eq!(buffer_to_string(&buf), "\n  a  b\n");
}
