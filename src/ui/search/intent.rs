use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum SearchFormIntent {
    /// Replace both fields, e.g. from command line arguments.
    Prefill { patient_id: String, after: String },
    /// Type a character into the focused field.
    Insert(char),
    /// Delete the last character of the focused field.
    Backspace,
    /// Empty the focused field.
    ClearField,
    FocusNext,
    FocusPrev,
}

impl Intent for SearchFormIntent {}
