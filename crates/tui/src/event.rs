//! Event handling and key mappings.
//!
//! Conversion from terminal events to application messages. Board keys
//! and form keys are mapped separately: while the card form is open every
//! printable key is text input.

use cardstack_protocol::Message;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

/// Converts an event (keyboard, mouse or resize) to an application message.
///
/// `form_open` selects the form key map.
#[must_use]
pub fn event_to_message(event: &Event, form_open: bool) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Release => None,
        Event::Key(key) if form_open => key_to_form_message(*key),
        Event::Key(key) => key_to_message(*key),
        Event::Mouse(mouse) => mouse_to_message(mouse),
        Event::Resize(width, height) => Some(Message::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

/// Converts a mouse event to a pointer message.
///
/// Only the left button takes part in gestures. Motion without a button is
/// still reported so a pending press can detect displacement.
#[must_use]
fn mouse_to_message(mouse: &MouseEvent) -> Option<Message> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::PointerDown { column, row }),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            Some(Message::PointerMove { column, row })
        }
        MouseEventKind::Up(MouseButton::Left) => Some(Message::PointerUp { column, row }),
        _ => None,
    }
}

/// Converts a terminal key event to an application message.
///
/// Returns `Some(Message)` if the key event maps to an action,
/// or `None` if the key is not bound.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `q`, `Ctrl+C` | Quit |
/// | `Left`/`h`, `Right`/`l` | Previous / next column |
/// | `Up`/`k`, `Down`/`j` | Previous / next card |
/// | `Home`/`g`, `End`/`G` | First / last column |
/// | `Shift+Left`/`H`, `Shift+Right`/`L` | Move card to previous / next column |
/// | `Shift+Up`/`K`, `Shift+Down`/`J` | Move card up / down |
/// | `Tab` | Toggle detail panel |
/// | `a` | Toggle archive column |
/// | `n` | New card |
/// | `Enter` | Select (edit card, open project) |
/// | `e` | Edit card |
/// | `d`, `Delete` | Delete card |
/// | `o` | Open card URL |
/// | `r` | Reload |
/// | `p` | Project list |
/// | `?` | Toggle help |
/// | `Esc` | Escape (close overlay, cancel drag, clear selection) |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Message::Quit);
    }

    if key.modifiers.contains(KeyModifiers::SHIFT) {
        match key.code {
            KeyCode::Left => return Some(Message::MoveCardLeft),
            KeyCode::Right => return Some(Message::MoveCardRight),
            KeyCode::Up => return Some(Message::MoveCardUp),
            KeyCode::Down => return Some(Message::MoveCardDown),
            _ => {}
        }
    }

    match key.code {
        KeyCode::Char('q') => Some(Message::Quit),
        KeyCode::Esc => Some(Message::Escape),

        KeyCode::Left | KeyCode::Char('h') => Some(Message::NavigateLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Message::NavigateRight),
        KeyCode::Up | KeyCode::Char('k') => Some(Message::NavigateUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Message::NavigateDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Message::FirstColumn),
        KeyCode::End | KeyCode::Char('G') => Some(Message::LastColumn),

        KeyCode::Char('H') => Some(Message::MoveCardLeft),
        KeyCode::Char('L') => Some(Message::MoveCardRight),
        KeyCode::Char('K') => Some(Message::MoveCardUp),
        KeyCode::Char('J') => Some(Message::MoveCardDown),

        KeyCode::Tab => Some(Message::ToggleDetails),
        KeyCode::Char('a') => Some(Message::ToggleArchive),
        KeyCode::Char('n') => Some(Message::NewCard),
        KeyCode::Enter => Some(Message::Select),
        KeyCode::Char('e') => Some(Message::EditCard),
        KeyCode::Char('d') | KeyCode::Delete => Some(Message::DeleteCard),
        KeyCode::Char('o') => Some(Message::OpenUrl),
        KeyCode::Char('r') => Some(Message::Reload),
        KeyCode::Char('p') => Some(Message::OpenProjects),
        KeyCode::Char('?') => Some(Message::ToggleHelp),

        _ => None,
    }
}

/// Converts a key event to a card form message.
///
/// # Key Bindings (Form Mode)
///
/// | Key | Action |
/// |-----|--------|
/// | `Enter` | Submit |
/// | `Esc` | Cancel |
/// | `Tab` | Switch field |
/// | `Backspace` | Delete last character |
/// | Any char | Input |
#[must_use]
pub fn key_to_form_message(key: KeyEvent) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Message::Quit);
    }

    match key.code {
        KeyCode::Enter => Some(Message::FormSubmit),
        KeyCode::Esc => Some(Message::FormCancel),
        KeyCode::Tab | KeyCode::BackTab => Some(Message::FormNextField),
        KeyCode::Backspace => Some(Message::FormBackspace),
        KeyCode::Char(ch) => Some(Message::FormInput { ch }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn make_key_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn make_mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn quit_keys() {
        assert_eq!(
            key_to_message(make_key_with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            )),
            Some(Message::Quit)
        );
        assert_eq!(
            key_to_message(make_key(KeyCode::Char('q'))),
            Some(Message::Quit)
        );
    }

    #[test]
    fn other_control_chords_are_unbound() {
        assert_eq!(
            key_to_message(make_key_with_modifiers(
                KeyCode::Char('d'),
                KeyModifiers::CONTROL
            )),
            None
        );
    }

    #[test]
    fn navigation_keys() {
        let cases = [
            (KeyCode::Left, Message::NavigateLeft),
            (KeyCode::Char('h'), Message::NavigateLeft),
            (KeyCode::Right, Message::NavigateRight),
            (KeyCode::Char('l'), Message::NavigateRight),
            (KeyCode::Up, Message::NavigateUp),
            (KeyCode::Char('k'), Message::NavigateUp),
            (KeyCode::Down, Message::NavigateDown),
            (KeyCode::Char('j'), Message::NavigateDown),
            (KeyCode::Home, Message::FirstColumn),
            (KeyCode::Char('g'), Message::FirstColumn),
            (KeyCode::End, Message::LastColumn),
            (KeyCode::Char('G'), Message::LastColumn),
        ];
        for (code, expected) in cases {
            assert_eq!(key_to_message(make_key(code)), Some(expected), "{code:?}");
        }
    }

    #[test]
    fn shifted_arrows_move_cards() {
        let shifted = |code| key_to_message(make_key_with_modifiers(code, KeyModifiers::SHIFT));
        assert_eq!(shifted(KeyCode::Left), Some(Message::MoveCardLeft));
        assert_eq!(shifted(KeyCode::Right), Some(Message::MoveCardRight));
        assert_eq!(shifted(KeyCode::Up), Some(Message::MoveCardUp));
        assert_eq!(shifted(KeyCode::Down), Some(Message::MoveCardDown));
    }

    #[test]
    fn uppercase_vim_keys_move_cards() {
        // Terminals report Shift+h as 'H' with the SHIFT modifier set.
        assert_eq!(
            key_to_message(make_key_with_modifiers(
                KeyCode::Char('H'),
                KeyModifiers::SHIFT
            )),
            Some(Message::MoveCardLeft)
        );
        assert_eq!(
            key_to_message(make_key(KeyCode::Char('L'))),
            Some(Message::MoveCardRight)
        );
        assert_eq!(
            key_to_message(make_key(KeyCode::Char('K'))),
            Some(Message::MoveCardUp)
        );
        assert_eq!(
            key_to_message(make_key(KeyCode::Char('J'))),
            Some(Message::MoveCardDown)
        );
    }

    #[test]
    fn action_keys() {
        let cases = [
            (KeyCode::Tab, Message::ToggleDetails),
            (KeyCode::Char('a'), Message::ToggleArchive),
            (KeyCode::Char('n'), Message::NewCard),
            (KeyCode::Enter, Message::Select),
            (KeyCode::Char('e'), Message::EditCard),
            (KeyCode::Char('d'), Message::DeleteCard),
            (KeyCode::Delete, Message::DeleteCard),
            (KeyCode::Char('o'), Message::OpenUrl),
            (KeyCode::Char('r'), Message::Reload),
            (KeyCode::Char('p'), Message::OpenProjects),
            (KeyCode::Char('?'), Message::ToggleHelp),
            (KeyCode::Esc, Message::Escape),
        ];
        for (code, expected) in cases {
            assert_eq!(key_to_message(make_key(code)), Some(expected), "{code:?}");
        }
    }

    #[test]
    fn unmapped_keys_return_none() {
        assert_eq!(key_to_message(make_key(KeyCode::Char('x'))), None);
        assert_eq!(key_to_message(make_key(KeyCode::F(1))), None);
    }

    #[test]
    fn form_keys() {
        assert_eq!(
            key_to_form_message(make_key(KeyCode::Enter)),
            Some(Message::FormSubmit)
        );
        assert_eq!(
            key_to_form_message(make_key(KeyCode::Esc)),
            Some(Message::FormCancel)
        );
        assert_eq!(
            key_to_form_message(make_key(KeyCode::Tab)),
            Some(Message::FormNextField)
        );
        assert_eq!(
            key_to_form_message(make_key(KeyCode::Backspace)),
            Some(Message::FormBackspace)
        );
        assert_eq!(
            key_to_form_message(make_key(KeyCode::Char('q'))),
            Some(Message::FormInput { ch: 'q' })
        );
        assert_eq!(
            key_to_form_message(make_key_with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            )),
            Some(Message::Quit)
        );
    }

    #[test]
    fn form_mode_is_selected_by_flag() {
        let event = Event::Key(make_key(KeyCode::Char('n')));
        assert_eq!(event_to_message(&event, false), Some(Message::NewCard));
        assert_eq!(
            event_to_message(&event, true),
            Some(Message::FormInput { ch: 'n' })
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = make_key(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(event_to_message(&Event::Key(key), false), None);
    }

    #[test]
    fn mouse_events_map_to_pointer_messages() {
        assert_eq!(
            mouse_to_message(&make_mouse(MouseEventKind::Down(MouseButton::Left), 10, 5)),
            Some(Message::PointerDown { column: 10, row: 5 })
        );
        assert_eq!(
            mouse_to_message(&make_mouse(MouseEventKind::Drag(MouseButton::Left), 11, 6)),
            Some(Message::PointerMove { column: 11, row: 6 })
        );
        assert_eq!(
            mouse_to_message(&make_mouse(MouseEventKind::Moved, 12, 7)),
            Some(Message::PointerMove { column: 12, row: 7 })
        );
        assert_eq!(
            mouse_to_message(&make_mouse(MouseEventKind::Up(MouseButton::Left), 13, 8)),
            Some(Message::PointerUp { column: 13, row: 8 })
        );
    }

    #[test]
    fn other_buttons_are_ignored() {
        assert_eq!(
            mouse_to_message(&make_mouse(MouseEventKind::Down(MouseButton::Right), 1, 1)),
            None
        );
        assert_eq!(
            mouse_to_message(&make_mouse(MouseEventKind::ScrollDown, 1, 1)),
            None
        );
    }

    #[test]
    fn resize_events_are_forwarded() {
        assert_eq!(
            event_to_message(&Event::Resize(120, 40), false),
            Some(Message::Resize {
                width: 120,
                height: 40
            })
        );
    }

    #[test]
    fn focus_events_are_ignored() {
        assert_eq!(event_to_message(&Event::FocusGained, false), None);
    }
}
