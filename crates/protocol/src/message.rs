//! TUI message types for event handling.
//!
//! This module defines the message enum used for communication between
//! the TUI input handler and the application state.

use serde::{Deserialize, Serialize};

/// Messages that represent user actions and scheduled wake-ups in the TUI.
///
/// These messages are produced by the input handler (and the drag timer)
/// and consumed by the application to update its state.
///
/// # Examples
///
/// ```
/// use cardstack_protocol::Message;
///
/// let msg = Message::PointerDown { column: 10, row: 4 };
/// assert!(msg.is_pointer());
/// assert!(!msg.interrupts_gesture());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Move selection to the previous visible column.
    NavigateLeft,
    /// Move selection to the next visible column.
    NavigateRight,
    /// Move selection up within the current column.
    NavigateUp,
    /// Move selection down within the current column.
    NavigateDown,
    /// Jump to the first visible column.
    FirstColumn,
    /// Jump to the last visible column.
    LastColumn,

    /// Move the selected card to the previous visible column.
    MoveCardLeft,
    /// Move the selected card to the next visible column.
    MoveCardRight,
    /// Move the selected card one position up.
    MoveCardUp,
    /// Move the selected card one position down.
    MoveCardDown,

    /// Activate the highlighted item (edit a card, open a project).
    Select,
    /// Create a card in the selected column.
    NewCard,
    /// Edit the selected card.
    EditCard,
    /// Delete the selected card.
    DeleteCard,
    /// Open the selected card's URL in the browser.
    OpenUrl,

    /// Show or hide the detail side panel.
    ToggleDetails,
    /// Show or hide the archive column.
    ToggleArchive,
    /// Toggle help overlay.
    ToggleHelp,
    /// Reload the board from its backend.
    Reload,
    /// Return to the project list.
    OpenProjects,
    /// Escape: close overlay, cancel a drag, or clear selection (contextual).
    Escape,
    /// Quit the application.
    Quit,

    /// Left pointer button pressed at coordinates (column, row).
    PointerDown {
        /// Column (x coordinate) of the press.
        column: u16,
        /// Row (y coordinate) of the press.
        row: u16,
    },
    /// Pointer moved (with or without the button held).
    PointerMove {
        /// Column (x coordinate) of the pointer.
        column: u16,
        /// Row (y coordinate) of the pointer.
        row: u16,
    },
    /// Left pointer button released.
    PointerUp {
        /// Column (x coordinate) of the release.
        column: u16,
        /// Row (y coordinate) of the release.
        row: u16,
    },
    /// The drag-escalation timer scheduled for a press has fired.
    DragTimerElapsed {
        /// The press generation the timer was scheduled for.
        epoch: u64,
    },
    /// The terminal was resized.
    Resize {
        /// New width in cells.
        width: u16,
        /// New height in cells.
        height: u16,
    },

    // --- Card form messages ---
    /// Input a character into the focused form field.
    FormInput {
        /// The character that was input.
        ch: char,
    },
    /// Delete the last character of the focused form field.
    FormBackspace,
    /// Switch focus to the other form field.
    FormNextField,
    /// Submit the form.
    FormSubmit,
    /// Discard the form.
    FormCancel,
}

impl Message {
    /// Returns `true` if this message is a navigation action.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardstack_protocol::Message;
    ///
    /// assert!(Message::NavigateLeft.is_navigation());
    /// assert!(Message::LastColumn.is_navigation());
    /// assert!(!Message::MoveCardLeft.is_navigation());
    /// ```
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NavigateLeft
                | Self::NavigateRight
                | Self::NavigateUp
                | Self::NavigateDown
                | Self::FirstColumn
                | Self::LastColumn
        )
    }

    /// Returns `true` if this message moves the selected card.
    #[must_use]
    pub fn is_card_move(&self) -> bool {
        matches!(
            self,
            Self::MoveCardLeft | Self::MoveCardRight | Self::MoveCardUp | Self::MoveCardDown
        )
    }

    /// Returns `true` if this message should terminate the application.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardstack_protocol::Message;
    ///
    /// assert!(Message::Quit.is_terminating());
    /// assert!(!Message::Escape.is_terminating());
    /// ```
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Returns `true` if this message comes from the pointer.
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::PointerDown { .. } | Self::PointerMove { .. } | Self::PointerUp { .. }
        )
    }

    /// Returns `true` if this message is a card form action.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardstack_protocol::Message;
    ///
    /// assert!(Message::FormSubmit.is_form());
    /// assert!(Message::FormInput { ch: 'x' }.is_form());
    /// assert!(!Message::NewCard.is_form());
    /// ```
    #[must_use]
    pub fn is_form(&self) -> bool {
        matches!(
            self,
            Self::FormInput { .. }
                | Self::FormBackspace
                | Self::FormNextField
                | Self::FormSubmit
                | Self::FormCancel
        )
    }

    /// Returns `true` if this message cancels a pending press or active drag.
    ///
    /// Everything except pointer events and the drag timer itself interrupts
    /// a gesture: keyboard commands, resizes, and view switches.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardstack_protocol::Message;
    ///
    /// assert!(Message::NavigateDown.interrupts_gesture());
    /// assert!(Message::Resize { width: 80, height: 24 }.interrupts_gesture());
    /// assert!(!Message::DragTimerElapsed { epoch: 1 }.interrupts_gesture());
    /// assert!(!Message::PointerUp { column: 0, row: 0 }.interrupts_gesture());
    /// ```
    #[must_use]
    pub fn interrupts_gesture(&self) -> bool {
        !self.is_pointer() && !matches!(self, Self::DragTimerElapsed { .. })
    }
}
