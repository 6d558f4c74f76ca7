//! Application state management.
//!
//! [`AppState`] holds the board and everything the user has chosen about how
//! to look at it: the selection, which panels are shown, and the current
//! view. Transient pointer state lives in [`Gesture`](crate::gesture::Gesture)
//! instead.
//!
//! Selection is tracked by position in the *visible* columns, so it is
//! clamped whenever the set of visible columns or their contents change.

use std::path::PathBuf;

use cardstack_config::DisplayConfig;
use cardstack_protocol::{Board, Card, CardId, Column};
use cardstack_store::Project;

/// Which screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// The board with its columns.
    #[default]
    Board,
    /// The list of discovered projects.
    Projects,
}

/// A message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Text to show.
    pub text: String,
    /// Whether the message reports a failure.
    pub is_error: bool,
}

/// The application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The board being displayed.
    pub board: Board,
    /// Current screen.
    pub view: View,
    /// Index of the selected column among the visible columns.
    pub selected_column: usize,
    /// Index of the selected card in that column, if any.
    pub selected_card: Option<usize>,
    /// Whether the detail panel is shown.
    pub show_details: bool,
    /// Whether the archive column is shown.
    pub show_archive: bool,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// Last status message.
    pub status: Option<StatusMessage>,
    /// Discovered projects, for the project list.
    pub projects: Vec<Project>,
    /// Index of the highlighted project.
    pub selected_project: usize,
    /// Directory project paths are shown relative to.
    pub project_base: PathBuf,
}

impl AppState {
    /// Creates a state showing `board` with the first card of the first
    /// column selected.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use cardstack_protocol::sample::sample_board;
    /// use cardstack_tui::AppState;
    ///
    /// let state = AppState::new(sample_board(Utc::now()));
    /// assert_eq!(state.selected_column, 0);
    /// assert_eq!(state.selected_card, Some(0));
    /// assert_eq!(state.selected_card().unwrap().title, "New feature idea");
    /// ```
    #[must_use]
    pub fn new(board: Board) -> Self {
        let mut state = Self {
            board,
            view: View::Board,
            selected_column: 0,
            selected_card: None,
            show_details: true,
            show_archive: false,
            help_visible: false,
            status: None,
            projects: Vec::new(),
            selected_project: 0,
            project_base: PathBuf::new(),
        };
        state.clamp_selection();
        state
    }

    /// Applies display preferences from the configuration.
    #[must_use]
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.show_details = display.show_details;
        self.show_archive = display.show_archive;
        self.clamp_selection();
        self
    }

    /// Returns the columns currently shown.
    #[must_use]
    pub fn visible_columns(&self) -> Vec<&Column> {
        self.board.visible_columns(self.show_archive)
    }

    /// Returns the number of columns currently shown.
    #[must_use]
    pub fn visible_column_count(&self) -> usize {
        self.visible_columns().len()
    }

    /// Returns the selected column.
    #[must_use]
    pub fn selected_column(&self) -> Option<&Column> {
        self.visible_columns().get(self.selected_column).copied()
    }

    /// Returns the name of the selected column.
    #[must_use]
    pub fn selected_column_name(&self) -> Option<&str> {
        self.selected_column().map(Column::name)
    }

    /// Returns the selected card's identifier.
    #[must_use]
    pub fn selected_card_id(&self) -> Option<&CardId> {
        let column = self.selected_column()?;
        column.card_ids().get(self.selected_card?)
    }

    /// Returns the selected card.
    #[must_use]
    pub fn selected_card(&self) -> Option<&Card> {
        self.selected_card_id().and_then(|id| self.board.card(id))
    }

    fn selected_column_len(&self) -> usize {
        self.selected_column().map_or(0, Column::len)
    }

    /// Keeps the selection inside the visible columns and their cards.
    ///
    /// An empty column has no selected card; a column with cards always has
    /// one.
    pub fn clamp_selection(&mut self) {
        let count = self.visible_column_count();
        self.selected_column = self.selected_column.min(count.saturating_sub(1));
        let len = self.selected_column_len();
        self.selected_card = match self.selected_card {
            _ if len == 0 => None,
            Some(index) => Some(index.min(len - 1)),
            None => Some(0),
        };
    }

    /// Selects a card by visible column and index.
    pub fn select(&mut self, column: usize, index: usize) {
        self.selected_column = column;
        self.selected_card = Some(index);
        self.clamp_selection();
    }

    /// Selects the card with the given identifier, if it is visible.
    ///
    /// Returns `true` if the card was found.
    pub fn select_card(&mut self, id: &CardId) -> bool {
        let found = self
            .visible_columns()
            .iter()
            .enumerate()
            .find_map(|(c, column)| column.position(id).map(|i| (c, i)));
        if let Some((column, index)) = found {
            self.select(column, index);
        }
        found.is_some()
    }

    /// Moves to the previous column, selecting its first card.
    pub fn navigate_left(&mut self) {
        if self.selected_column > 0 {
            self.selected_column -= 1;
            self.selected_card = Some(0);
            self.clamp_selection();
        }
    }

    /// Moves to the next column, selecting its first card.
    pub fn navigate_right(&mut self) {
        if self.selected_column + 1 < self.visible_column_count() {
            self.selected_column += 1;
            self.selected_card = Some(0);
            self.clamp_selection();
        }
    }

    /// Selects the previous card in the column.
    pub fn navigate_up(&mut self) {
        if let Some(index) = self.selected_card {
            self.selected_card = Some(index.saturating_sub(1));
        }
        self.clamp_selection();
    }

    /// Selects the next card in the column.
    pub fn navigate_down(&mut self) {
        if let Some(index) = self.selected_card {
            self.selected_card = Some(index + 1);
        }
        self.clamp_selection();
    }

    /// Jumps to the first visible column.
    pub fn first_column(&mut self) {
        self.selected_column = 0;
        self.selected_card = Some(0);
        self.clamp_selection();
    }

    /// Jumps to the last visible column.
    pub fn last_column(&mut self) {
        self.selected_column = self.visible_column_count().saturating_sub(1);
        self.selected_card = Some(0);
        self.clamp_selection();
    }

    /// Clears the card selection, keeping the column.
    pub fn clear_selection(&mut self) {
        self.selected_card = None;
    }

    /// Shows or hides the detail panel.
    pub fn toggle_details(&mut self) {
        self.show_details = !self.show_details;
    }

    /// Shows or hides the archive column.
    ///
    /// The selection follows the selected card when it stays visible and is
    /// clamped otherwise.
    pub fn toggle_archive(&mut self) {
        let selected = self.selected_card_id().cloned();
        self.show_archive = !self.show_archive;
        if !selected.is_some_and(|id| self.select_card(&id)) {
            self.clamp_selection();
        }
    }

    /// Toggles the help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Dismisses the help overlay if it is visible.
    ///
    /// Returns `true` if help was visible and has been dismissed.
    #[must_use]
    pub fn dismiss_help(&mut self) -> bool {
        std::mem::take(&mut self.help_visible)
    }

    /// Replaces the board, keeping the selection where possible.
    pub fn replace_board(&mut self, board: Board) {
        let selected = self.selected_card_id().cloned();
        self.board = board;
        if !selected.is_some_and(|id| self.select_card(&id)) {
            self.clamp_selection();
        }
    }

    /// Shows an informational status message.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    /// Shows an error status message.
    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    /// Highlights the previous project.
    pub fn project_up(&mut self) {
        self.selected_project = self.selected_project.saturating_sub(1);
    }

    /// Highlights the next project.
    pub fn project_down(&mut self) {
        if self.selected_project + 1 < self.projects.len() {
            self.selected_project += 1;
        }
    }

    /// Returns the highlighted project.
    #[must_use]
    pub fn selected_project(&self) -> Option<&Project> {
        self.projects.get(self.selected_project)
    }
}
