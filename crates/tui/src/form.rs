//! The card create/edit form.
//!
//! A [`CardForm`] holds two text fields and knows whether it creates a card
//! in a column or edits an existing one. It does not touch the board:
//! [`CardForm::submit`] hands back a [`FormSubmission`] for the application
//! to apply.

use cardstack_protocol::{Card, CardId};

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Maximum description length, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// What submitting the form does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// Append a new card to the named column.
    Create {
        /// Column receiving the card.
        column: String,
    },
    /// Change an existing card.
    Edit {
        /// The card being edited.
        card_id: CardId,
    },
}

/// The field receiving input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    /// The card title.
    #[default]
    Title,
    /// The card description.
    Description,
}

/// A validated form ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    /// Create or edit.
    pub mode: FormMode,
    /// Trimmed, non-empty title.
    pub title: String,
    /// Trimmed description.
    pub description: String,
}

/// Form state.
///
/// # Examples
///
/// ```
/// use cardstack_tui::form::{CardForm, FormMode};
///
/// let mut form = CardForm::create("TODO");
/// for ch in "Ship it".chars() {
///     form.input(ch);
/// }
/// form.next_field();
/// form.input('!');
///
/// let submission = form.submit().unwrap();
/// assert_eq!(submission.title, "Ship it");
/// assert_eq!(submission.description, "!");
/// assert_eq!(submission.mode, FormMode::Create { column: "TODO".into() });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardForm {
    mode: FormMode,
    title: String,
    description: String,
    focus: FormField,
    error: Option<String>,
}

impl CardForm {
    /// Opens an empty form creating a card in `column`.
    #[must_use]
    pub fn create(column: impl Into<String>) -> Self {
        Self {
            mode: FormMode::Create {
                column: column.into(),
            },
            title: String::new(),
            description: String::new(),
            focus: FormField::Title,
            error: None,
        }
    }

    /// Opens a form prefilled from `card`.
    #[must_use]
    pub fn edit(card: &Card) -> Self {
        Self {
            mode: FormMode::Edit {
                card_id: card.id.clone(),
            },
            title: card.title.chars().take(TITLE_MAX_CHARS).collect(),
            description: card.description.chars().take(DESCRIPTION_MAX_CHARS).collect(),
            focus: FormField::Title,
            error: None,
        }
    }

    /// Returns what submitting does.
    #[must_use]
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Returns `true` when editing an existing card.
    #[must_use]
    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    /// Current title text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current description text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The focused field.
    #[must_use]
    pub fn focus(&self) -> FormField {
        self.focus
    }

    /// Validation error from the last submit, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn focused_mut(&mut self) -> (&mut String, usize) {
        match self.focus {
            FormField::Title => (&mut self.title, TITLE_MAX_CHARS),
            FormField::Description => (&mut self.description, DESCRIPTION_MAX_CHARS),
        }
    }

    /// Appends a character to the focused field, unless it is full.
    ///
    /// Control characters are ignored.
    pub fn input(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let (field, max) = self.focused_mut();
        if field.chars().count() < max {
            field.push(ch);
        }
        self.error = None;
    }

    /// Deletes the last character of the focused field.
    pub fn backspace(&mut self) {
        self.focused_mut().0.pop();
        self.error = None;
    }

    /// Moves focus to the other field.
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Title,
        };
    }

    /// Validates the form.
    ///
    /// Returns `None` and records an error when the title is blank.
    pub fn submit(&mut self) -> Option<FormSubmission> {
        let title = self.title.trim();
        if title.is_empty() {
            self.error = Some("Title is required".to_string());
            self.focus = FormField::Title;
            return None;
        }
        Some(FormSubmission {
            mode: self.mode.clone(),
            title: title.to_string(),
            description: self.description.trim().to_string(),
        })
    }
}
