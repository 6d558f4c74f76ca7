//! Centralized layout measurements for the TUI.
//!
//! The screen is split into fixed bands from top to bottom:
//!
//! ```text
//! row 0          title
//! row 1          separator
//! row 2          column headers
//! rows 3..h-2    card area (content height)
//! row h-2        separator
//! row h-1        status line
//! ```
//!
//! Pointer hit-testing and rendering both derive their positions from these
//! constants and from [`Viewport`], so the two never disagree.

/// Rows used by the title bar (title and separator).
pub const TITLE_HEIGHT: u16 = 2;

/// Rows used by the column headers.
pub const HEADER_HEIGHT: u16 = 1;

/// First row of the card area.
pub const CARD_AREA_TOP: u16 = TITLE_HEIGHT + HEADER_HEIGHT;

/// Rows used by the status bar (separator and status line).
pub const FOOTER_HEIGHT: u16 = 2;

/// Height of a fully rendered card, borders included.
pub const FULL_CARD_HEIGHT: u16 = 5;

/// Visible height of a card covered by the next one in its stack.
pub const STACKED_CARD_HEIGHT: u16 = 2;

/// Minimum terminal width for useful rendering.
pub const MIN_WIDTH: u16 = 80;

/// Minimum terminal height for useful rendering.
pub const MIN_HEIGHT: u16 = 20;

/// Terminal dimensions and the layout derived from them.
///
/// # Examples
///
/// ```
/// use cardstack_tui::layout::Viewport;
///
/// let viewport = Viewport::new(120, 30, true);
/// assert_eq!(viewport.detail_width(), 40);
/// assert_eq!(viewport.board_width(), 80);
/// assert_eq!(viewport.content_height(), 25);
///
/// let wide = Viewport::new(120, 30, false);
/// assert_eq!(wide.board_width(), 120);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Terminal width in cells.
    pub width: u16,
    /// Terminal height in cells.
    pub height: u16,
    /// Whether the detail side panel takes part of the width.
    pub show_details: bool,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub const fn new(width: u16, height: u16, show_details: bool) -> Self {
        Self {
            width,
            height,
            show_details,
        }
    }

    /// Width of the detail panel, or zero when it is hidden.
    #[must_use]
    pub const fn detail_width(&self) -> u16 {
        if self.show_details { self.width / 3 } else { 0 }
    }

    /// Width available to the columns.
    #[must_use]
    pub const fn board_width(&self) -> u16 {
        self.width - self.detail_width()
    }

    /// Rows available to card stacks.
    #[must_use]
    pub const fn content_height(&self) -> u16 {
        self.height
            .saturating_sub(CARD_AREA_TOP)
            .saturating_sub(FOOTER_HEIGHT)
    }

    /// Returns `true` if the terminal is below the minimum size.
    #[must_use]
    pub const fn is_too_small(&self) -> bool {
        self.width < MIN_WIDTH || self.height < MIN_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_area_starts_below_headers() {
        assert_eq!(CARD_AREA_TOP, 3);
    }

    #[test]
    fn content_height_leaves_room_for_bars() {
        let viewport = Viewport::new(80, 20, false);
        assert_eq!(viewport.content_height(), 15);
    }

    #[test]
    fn content_height_saturates_on_tiny_terminals() {
        let viewport = Viewport::new(10, 4, false);
        assert_eq!(viewport.content_height(), 0);
    }

    #[test]
    fn detail_panel_takes_a_third() {
        let viewport = Viewport::new(100, 24, true);
        assert_eq!(viewport.detail_width(), 33);
        assert_eq!(viewport.board_width(), 67);
    }

    #[test]
    fn too_small_checks_both_dimensions() {
        assert!(Viewport::new(79, 40, false).is_too_small());
        assert!(Viewport::new(200, 19, false).is_too_small());
        assert!(!Viewport::new(80, 20, false).is_too_small());
    }
}
