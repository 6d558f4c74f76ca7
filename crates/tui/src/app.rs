//! Main application struct and run loop.
//!
//! [`App`] owns the [`AppState`], the pointer [`Gesture`], the open card
//! form and the persistence backend. Every terminal event becomes a
//! [`Message`] handled by [`App::update`]; changes that must reach the
//! backend are queued as [`SyncOp`]s and executed by [`App::sync`] before
//! the next event is read.

use std::time::Instant;

use chrono::Utc;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
};
use tracing::{debug, info, warn};

use cardstack_config::Config;
use cardstack_protocol::{Backend, BackendError, Board, CardId, CardMove, Message};
use cardstack_store::{LocalBackend, Project};

use crate::{
    AppState, View,
    event::event_to_message,
    form::{CardForm, FormMode, FormSubmission},
    geometry::{CardHit, DropTarget},
    gesture::{Gesture, GestureOutcome},
    layout::{FOOTER_HEIGHT, MIN_HEIGHT, MIN_WIDTH, TITLE_HEIGHT, Viewport},
    terminal::{AppTerminal, next_event},
    widgets::{
        BoardFrame, StatusContext, render_board, render_detail_panel, render_form,
        render_help_overlay, render_project_list, render_status_bar, render_title_bar,
    },
};

/// A change to hand to the backend after the current event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOp {
    /// Push a card's new column to a remote backend.
    Move {
        /// The moved card.
        card_id: CardId,
        /// Its new column.
        column: String,
    },
    /// Announce a newly created card.
    Create {
        /// The new card.
        card_id: CardId,
    },
    /// Push edited card fields.
    Update {
        /// The edited card.
        card_id: CardId,
    },
    /// Remove a card.
    Delete {
        /// The removed card.
        card_id: CardId,
    },
    /// Write the whole board.
    Save,
    /// Replace the board with the backend's copy.
    Load,
}

impl SyncOp {
    fn label(&self) -> &'static str {
        match self {
            Self::Move { .. } => "Move",
            Self::Create { .. } => "Create",
            Self::Update { .. } => "Update",
            Self::Delete { .. } => "Delete",
            Self::Save => "Save",
            Self::Load => "Load",
        }
    }
}

/// The main application struct.
///
/// Manages the application state and provides the main event loop.
#[derive(Debug)]
pub struct App {
    state: AppState,
    gesture: Gesture,
    form: Option<CardForm>,
    backend: Option<Box<dyn Backend>>,
    pending: Vec<SyncOp>,
    /// Hold timer of the current press: deadline and press epoch.
    drag_timer: Option<(Instant, u64)>,
    /// Last known terminal size.
    size: (u16, u16),
    should_quit: bool,
}

impl App {
    /// Creates an application showing `board`.
    ///
    /// Changes are written through `backend`; without one they stay in
    /// memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use cardstack_config::Config;
    /// use cardstack_protocol::sample::sample_board;
    /// use cardstack_tui::App;
    ///
    /// let app = App::new(sample_board(Utc::now()), None, &Config::default());
    /// assert_eq!(app.state().board.name, "My Project");
    /// ```
    #[must_use]
    pub fn new(board: Board, backend: Option<Box<dyn Backend>>, config: &Config) -> Self {
        Self {
            state: AppState::new(board).with_display(config.display),
            gesture: Gesture::new(config.interaction),
            form: None,
            backend,
            pending: Vec::new(),
            drag_timer: None,
            size: (0, 0),
            should_quit: false,
        }
    }

    /// Sets the discovered projects, shown relative to `base`.
    ///
    /// With more than one project the application starts in the project
    /// list.
    #[must_use]
    pub fn with_projects(
        mut self,
        projects: Vec<Project>,
        base: impl Into<std::path::PathBuf>,
    ) -> Self {
        if projects.len() > 1 {
            self.state.view = View::Projects;
        }
        self.state.projects = projects;
        self.state.project_base = base.into();
        self
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns the pointer gesture.
    #[must_use]
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Returns the open card form, if any.
    #[must_use]
    pub fn form(&self) -> Option<&CardForm> {
        self.form.as_ref()
    }

    /// Returns the operations waiting for [`App::sync`].
    #[must_use]
    pub fn pending(&self) -> &[SyncOp] {
        &self.pending
    }

    /// Returns `true` once the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.size.0, self.size.1, self.state.show_details)
    }

    fn is_remote(&self) -> bool {
        self.backend.as_ref().is_some_and(|backend| backend.is_remote())
    }

    /// Updates the application state based on a message.
    ///
    /// Keyboard messages, resizes and view switches first cancel any press
    /// or drag in progress; an `Escape` that cancelled a drag does nothing
    /// else. While the form is open only form messages are handled. While
    /// help is visible any other key dismisses it.
    pub fn update(&mut self, msg: Message) {
        if msg.interrupts_gesture() {
            self.drag_timer = None;
            if self.gesture.cancel() && msg == Message::Escape {
                return;
            }
        }

        match msg {
            Message::Quit => {
                self.should_quit = true;
                return;
            }
            Message::Resize { width, height } => {
                self.size = (width, height);
                return;
            }
            _ => {}
        }

        if self.form.is_some() {
            if msg.is_form() {
                self.handle_form(msg);
            }
            return;
        }

        if msg.interrupts_gesture() {
            self.state.status = None;
        }

        if self.state.help_visible {
            match msg {
                Message::ToggleHelp | Message::Escape => self.state.toggle_help(),
                Message::PointerMove { .. }
                | Message::PointerUp { .. }
                | Message::DragTimerElapsed { .. } => {}
                _ => {
                    let _ = self.state.dismiss_help();
                }
            }
            return;
        }

        match self.state.view {
            View::Projects => self.update_projects(msg),
            View::Board => self.update_board(msg),
        }
    }

    fn update_projects(&mut self, msg: Message) {
        match msg {
            Message::NavigateUp => self.state.project_up(),
            Message::NavigateDown => self.state.project_down(),
            Message::Select => self.open_selected_project(),
            Message::ToggleHelp => self.state.toggle_help(),
            _ => {}
        }
    }

    fn update_board(&mut self, msg: Message) {
        match msg {
            Message::Escape => self.state.clear_selection(),
            Message::NavigateLeft => self.state.navigate_left(),
            Message::NavigateRight => self.state.navigate_right(),
            Message::NavigateUp => self.state.navigate_up(),
            Message::NavigateDown => self.state.navigate_down(),
            Message::FirstColumn => self.state.first_column(),
            Message::LastColumn => self.state.last_column(),
            Message::MoveCardLeft
            | Message::MoveCardRight
            | Message::MoveCardUp
            | Message::MoveCardDown => self.move_selected(&msg),
            Message::Select | Message::EditCard => self.open_edit_form(),
            Message::NewCard => self.open_create_form(),
            Message::DeleteCard => self.delete_selected(),
            Message::OpenUrl => self.open_selected_url(),
            Message::ToggleDetails => self.state.toggle_details(),
            Message::ToggleArchive => self.state.toggle_archive(),
            Message::ToggleHelp => self.state.toggle_help(),
            Message::Reload => self.pending.push(SyncOp::Load),
            Message::OpenProjects => {
                if self.state.projects.len() > 1 {
                    self.state.view = View::Projects;
                }
            }
            // Nothing is drawn to press on or drop onto.
            Message::PointerDown { .. } | Message::PointerMove { .. } | Message::PointerUp { .. }
                if self.viewport().is_too_small() =>
            {
                self.gesture.cancel();
                self.drag_timer = None;
            }
            Message::PointerDown { column, row } => self.pointer_down(Position::new(column, row)),
            Message::PointerMove { column, row } => self.pointer_move(Position::new(column, row)),
            Message::PointerUp { column, row } => self.pointer_up(Position::new(column, row)),
            Message::DragTimerElapsed { epoch } => {
                let _ = self.gesture.timer_elapsed(epoch);
            }
            _ => {}
        }
    }

    fn pointer_down(&mut self, pos: Position) {
        let viewport = self.viewport();
        let columns = self.state.visible_columns();
        let started = self.gesture.press(pos, Instant::now(), &viewport, &columns);
        match started {
            Some(started) => {
                self.state.select(started.hit.column, started.hit.index);
                self.drag_timer = Some((started.deadline, started.epoch));
            }
            None => self.drag_timer = None,
        }
    }

    fn pointer_move(&mut self, pos: Position) {
        let viewport = self.viewport();
        let columns = self.state.visible_columns();
        self.gesture.motion(pos, &viewport, &columns);
    }

    fn pointer_up(&mut self, pos: Position) {
        self.drag_timer = None;
        let viewport = self.viewport();
        let columns = self.state.visible_columns();
        let outcome = self.gesture.release(pos, &viewport, &columns);
        match outcome {
            GestureOutcome::Click(hit) => self.state.select(hit.column, hit.index),
            GestureOutcome::Dropped {
                source,
                card_id,
                target,
            } => self.apply_drop(source, &card_id, target),
            GestureOutcome::Ignored | GestureOutcome::Cancelled | GestureOutcome::Abandoned => {}
        }
    }

    /// Applies a finished drag, unless the card at the source position is no
    /// longer the one that was picked up.
    fn apply_drop(&mut self, source: CardHit, card_id: &CardId, target: DropTarget) {
        let columns = self.state.visible_columns();
        let Some(from) = columns.get(source.column) else {
            return;
        };
        if from.card_ids().get(source.index) != Some(card_id) {
            warn!(card = %card_id, "dragged card moved away from its source, drop abandoned");
            return;
        }
        let Some(to) = columns.get(target.column) else {
            return;
        };
        let request = CardMove::new(from.name(), source.index, to.name(), target.slot);
        self.apply_move(&request);
    }

    fn move_selected(&mut self, msg: &Message) {
        let Some(index) = self.state.selected_card else {
            return;
        };
        let columns = self.state.visible_columns();
        let current = self.state.selected_column;
        let Some(column) = columns.get(current) else {
            return;
        };
        let name = column.name();

        let request = match msg {
            Message::MoveCardUp if index > 0 => CardMove::new(name, index, name, index - 1),
            Message::MoveCardDown if index + 1 < column.len() => {
                CardMove::new(name, index, name, index + 2)
            }
            Message::MoveCardLeft if current > 0 => {
                CardMove::new(name, index, columns[current - 1].name(), index)
            }
            Message::MoveCardRight if current + 1 < columns.len() => {
                CardMove::new(name, index, columns[current + 1].name(), index)
            }
            _ => return,
        };
        self.apply_move(&request);
    }

    /// Runs the reorder engine, follows the card with the selection and
    /// queues persistence.
    fn apply_move(&mut self, request: &CardMove) {
        let Some(placement) = self.state.board.move_card(request, Utc::now()) else {
            debug!(?request, "move had no effect");
            return;
        };
        info!(
            card = %placement.card_id,
            column = %placement.column,
            index = placement.index,
            "card moved"
        );
        self.state.select_card(&placement.card_id);

        if placement.column_changed && self.is_remote() {
            self.pending.push(SyncOp::Move {
                card_id: placement.card_id,
                column: placement.column,
            });
        }
        self.pending.push(SyncOp::Save);
    }

    fn open_create_form(&mut self) {
        if let Some(column) = self.state.selected_column_name() {
            self.form = Some(CardForm::create(column));
        }
    }

    fn open_edit_form(&mut self) {
        if let Some(card) = self.state.selected_card() {
            self.form = Some(CardForm::edit(card));
        }
    }

    fn handle_form(&mut self, msg: Message) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match msg {
            Message::FormInput { ch } => form.input(ch),
            Message::FormBackspace => form.backspace(),
            Message::FormNextField => form.next_field(),
            Message::FormCancel => self.form = None,
            Message::FormSubmit => {
                if let Some(submission) = form.submit() {
                    self.form = None;
                    self.apply_submission(submission);
                }
            }
            _ => {}
        }
    }

    fn apply_submission(&mut self, submission: FormSubmission) {
        let now = Utc::now();
        let FormSubmission {
            mode,
            title,
            description,
        } = submission;
        match mode {
            FormMode::Create { column } => {
                match self.state.board.create_card(&column, &title, &description, now) {
                    Ok(card_id) => {
                        info!(card = %card_id, %column, "card created");
                        self.state.select_card(&card_id);
                        self.pending.push(SyncOp::Create { card_id });
                        self.pending.push(SyncOp::Save);
                    }
                    Err(err) => self.state.set_error(format!("Could not create card: {err}")),
                }
            }
            FormMode::Edit { card_id } => {
                match self.state.board.update_card(&card_id, &title, &description, now) {
                    Ok(()) => {
                        info!(card = %card_id, "card updated");
                        self.pending.push(SyncOp::Update { card_id });
                        self.pending.push(SyncOp::Save);
                    }
                    Err(err) => self.state.set_error(format!("Could not update card: {err}")),
                }
            }
        }
    }

    fn delete_selected(&mut self) {
        let Some(card_id) = self.state.selected_card_id().cloned() else {
            return;
        };
        match self.state.board.remove_card(&card_id) {
            Ok(card) => {
                info!(card = %card_id, "card deleted");
                self.state.clamp_selection();
                self.state.set_status(format!("Deleted \"{}\"", card.title));
                self.pending.push(SyncOp::Delete { card_id });
                self.pending.push(SyncOp::Save);
            }
            Err(err) => self.state.set_error(format!("Could not delete card: {err}")),
        }
    }

    fn open_selected_url(&mut self) {
        let Some(card) = self.state.selected_card() else {
            return;
        };
        let Some(url) = card.url.clone() else {
            self.state.set_status("Card has no link");
            return;
        };
        if let Err(err) = open::that_detached(&url) {
            warn!(%url, error = %err, "failed to open link");
            self.state.set_error(format!("Could not open {url}: {err}"));
        }
    }

    fn open_selected_project(&mut self) {
        let Some(project) = self.state.selected_project().cloned() else {
            return;
        };
        info!(path = %project.path.display(), "opening project");
        self.backend = Some(Box::new(LocalBackend::new(project.path)));
        self.state.view = View::Board;
        self.state.selected_column = 0;
        self.state.selected_card = None;
        self.pending.push(SyncOp::Load);
    }

    /// Executes queued operations against the backend, in order.
    ///
    /// Failures are logged and shown in the status bar; later operations
    /// still run. Without a backend the queue is discarded.
    pub async fn sync(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let ops = std::mem::take(&mut self.pending);
        let Some(backend) = self.backend.as_deref() else {
            debug!(count = ops.len(), "no backend, dropping sync operations");
            return;
        };
        for op in &ops {
            if let Err(err) = execute(backend, &mut self.state, op).await {
                warn!(?op, error = %err, backend = %backend.describe(), "sync operation failed");
                self.state.set_error(format!("{} failed: {err}", op.label()));
            }
        }
    }

    /// Returns the timer message if the hold deadline has passed.
    fn due_timer(&mut self, now: Instant) -> Option<Message> {
        let (deadline, epoch) = self.drag_timer?;
        if now < deadline {
            return None;
        }
        self.drag_timer = None;
        Some(Message::DragTimerElapsed { epoch })
    }

    /// Renders the current state into `frame`.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.size = (area.width, area.height);
        let viewport = self.viewport();

        if viewport.is_too_small() {
            Self::render_terminal_too_small(frame, area);
            return;
        }

        let buf = frame.buffer_mut();
        match self.state.view {
            View::Projects => {
                let list = Rect::new(0, 0, area.width, area.height - FOOTER_HEIGHT);
                render_project_list(
                    &self.state.projects,
                    self.state.selected_project,
                    &self.state.project_base,
                    list,
                    buf,
                );
            }
            View::Board => self.render_board_screen(&viewport, buf),
        }

        let footer = Rect::new(0, area.height - FOOTER_HEIGHT, area.width, FOOTER_HEIGHT);
        let context = StatusContext {
            view: self.state.view,
            show_archive: self.state.show_archive,
            has_projects: self.state.projects.len() > 1,
            status: self.state.status.as_ref(),
        };
        render_status_bar(&context, footer, buf);

        if let Some(form) = &self.form {
            render_form(form, area, buf);
        }
        if self.state.help_visible {
            render_help_overlay(area, buf);
        }
    }

    fn render_board_screen(&self, viewport: &Viewport, buf: &mut Buffer) {
        render_title_bar(
            &self.state.board,
            Rect::new(0, 0, viewport.width, TITLE_HEIGHT),
            buf,
        );

        let columns = self.state.visible_columns();
        let frame = BoardFrame {
            board: &self.state.board,
            columns: &columns,
            selected_column: self.state.selected_column,
            selected_card: self.state.selected_card,
            drag: self.gesture.drag().map(|drag| (&drag.card_id, drag.target)),
        };
        render_board(&frame, viewport, buf);

        if viewport.show_details {
            let detail = Rect::new(
                viewport.board_width(),
                TITLE_HEIGHT,
                viewport.detail_width(),
                viewport.height - TITLE_HEIGHT - FOOTER_HEIGHT,
            );
            render_detail_panel(
                self.state.selected_card(),
                Utc::now().date_naive(),
                detail,
                buf,
            );
        }
    }

    /// Renders a message indicating the terminal is too small.
    fn render_terminal_too_small(frame: &mut Frame, area: Rect) {
        let message = format!(
            "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );

        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });

        let vertical_offset = area.height.saturating_sub(2) / 2;
        let centered_area = Rect {
            x: area.x,
            y: area.y + vertical_offset,
            width: area.width,
            height: area.height.saturating_sub(vertical_offset),
        };

        frame.render_widget(paragraph, centered_area);
    }

    /// Runs the main application loop.
    ///
    /// Each iteration draws, waits for one event (or the hold timer),
    /// updates the state and then hands queued changes to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chrono::Utc;
    /// use cardstack_config::Config;
    /// use cardstack_protocol::sample::sample_board;
    /// use cardstack_tui::{App, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(sample_board(Utc::now()), None, &Config::default());
    ///     app.run(&mut terminal).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        loop {
            terminal.draw(|frame| self.view(frame))?;

            let event = next_event(self.drag_timer.map(|(deadline, _)| deadline))?;
            if let Some(msg) = event.and_then(|ev| event_to_message(&ev, self.form.is_some())) {
                self.update(msg);
            }
            if let Some(msg) = self.due_timer(Instant::now()) {
                self.update(msg);
            }

            self.sync().await;

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }
}

/// Executes one operation. `Load` replaces the board; `Create` adopts the
/// identifier the backend assigned, if any.
async fn execute(
    backend: &dyn Backend,
    state: &mut AppState,
    op: &SyncOp,
) -> Result<(), BackendError> {
    match op {
        SyncOp::Move { card_id, column } => backend.move_card(card_id, column).await,
        SyncOp::Create { card_id } => {
            let Some(card) = state.board.card(card_id).cloned() else {
                return Ok(());
            };
            if let Some(new_id) = backend.create_card(&card).await? {
                debug!(old = %card_id, new = %new_id, "backend assigned card id");
                if let Err(err) = state.board.rekey_card(card_id, new_id) {
                    warn!(card = %card_id, error = %err, "could not adopt backend card id");
                }
            }
            Ok(())
        }
        SyncOp::Update { card_id } => match state.board.card(card_id) {
            Some(card) => backend.update_card(card).await,
            None => Ok(()),
        },
        SyncOp::Delete { card_id } => backend.delete_card(card_id).await,
        SyncOp::Save => {
            backend.save_board(&state.board).await?;
            debug!(backend = %backend.describe(), "board saved");
            Ok(())
        }
        SyncOp::Load => {
            let board = backend.load_board().await?;
            info!(backend = %backend.describe(), cards = board.len(), "board loaded");
            state.replace_board(board);
            Ok(())
        }
    }
}
