//! Terminal session for the board.
//!
//! The board runs in raw mode on the alternate screen with mouse capture
//! enabled, so presses, drags and releases reach the gesture tracker.
//! [`next_event`] waits for input but never past a pending hold deadline,
//! which is how a stationary press turns into a drag on time.

use std::{
    io::{self, Stdout, Write},
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

/// The terminal type used by the application.
pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Longest wait for input when no hold timer is armed.
pub const IDLE_POLL: Duration = Duration::from_millis(100);

/// Error type for terminal operations.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// Raw mode, the alternate screen or mouse capture could not be enabled.
    #[error("could not enter the board screen: {0}")]
    Enter(#[source] io::Error),

    /// The terminal could not be handed back to the shell.
    #[error("could not leave the board screen: {0}")]
    Leave(#[source] io::Error),

    /// Reading keyboard or mouse input failed.
    #[error("could not read terminal input: {0}")]
    Input(#[source] io::Error),
}

fn enter_board_screen(out: &mut impl Write) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, EnableMouseCapture)
}

/// Raw mode goes first so the shell stays usable even if the escape
/// sequences cannot be written.
fn leave_board_screen(out: &mut impl Write) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, DisableMouseCapture, LeaveAlternateScreen)
}

/// Switches the terminal to the board screen.
///
/// # Errors
///
/// Returns [`TerminalError::Enter`] if the terminal rejects any step.
///
/// # Examples
///
/// ```no_run
/// use cardstack_tui::terminal;
///
/// let mut terminal = terminal::setup_terminal()?;
/// terminal::restore_terminal(&mut terminal)?;
/// # Ok::<(), terminal::TerminalError>(())
/// ```
pub fn setup_terminal() -> Result<AppTerminal, TerminalError> {
    let mut stdout = io::stdout();
    enter_board_screen(&mut stdout).map_err(TerminalError::Enter)?;
    Terminal::new(CrosstermBackend::new(stdout)).map_err(TerminalError::Enter)
}

/// Undoes [`setup_terminal`] and shows the cursor again.
///
/// # Errors
///
/// Returns [`TerminalError::Leave`] if the terminal rejects any step.
pub fn restore_terminal(terminal: &mut AppTerminal) -> Result<(), TerminalError> {
    leave_board_screen(terminal.backend_mut()).map_err(TerminalError::Leave)?;
    terminal.show_cursor().map_err(TerminalError::Leave)
}

/// Installs a panic hook that leaves the board screen before running the
/// previously installed hook, so the panic message is readable.
///
/// Call it once, before [`setup_terminal`].
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = leave_board_screen(&mut io::stdout());
        previous(info);
    }));
}

/// How long to wait for input at `now` without sleeping past `deadline`.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use cardstack_tui::terminal::{IDLE_POLL, poll_timeout};
///
/// let now = Instant::now();
/// assert_eq!(poll_timeout(None, now), IDLE_POLL);
/// assert_eq!(
///     poll_timeout(Some(now + Duration::from_millis(40)), now),
///     Duration::from_millis(40)
/// );
/// ```
#[must_use]
pub fn poll_timeout(deadline: Option<Instant>, now: Instant) -> Duration {
    deadline.map_or(IDLE_POLL, |deadline| {
        deadline.saturating_duration_since(now).min(IDLE_POLL)
    })
}

/// Waits for the next terminal event, returning `None` once the hold
/// `deadline` (or [`IDLE_POLL`]) passes without input.
///
/// # Errors
///
/// Returns [`TerminalError::Input`] if polling or reading fails.
pub fn next_event(deadline: Option<Instant>) -> Result<Option<Event>, TerminalError> {
    let timeout = poll_timeout(deadline, Instant::now());
    if !event::poll(timeout).map_err(TerminalError::Input)? {
        return Ok(None);
    }
    event::read().map(Some).map_err(TerminalError::Input)
}
