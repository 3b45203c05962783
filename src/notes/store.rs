//! The loaded note set and the rules for moving through it.

use super::model::Note;

/// Currently loaded notes, the active position, and the patient label.
///
/// `position` is `None` when nothing is selected; otherwise it is always a
/// valid index into `notes`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteSetStore {
    notes: Vec<Note>,
    position: Option<usize>,
    patient_label: Option<String>,
}

impl NoteSetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the empty state.
    pub fn reset(&mut self) {
        self.notes.clear();
        self.position = None;
        self.patient_label = None;
    }

    /// Replace the whole note set. Selects the first note when there is one.
    pub fn load(&mut self, notes: Vec<Note>, patient_label: impl Into<String>) {
        self.position = if notes.is_empty() { None } else { Some(0) };
        self.notes = notes;
        self.patient_label = Some(patient_label.into());
    }

    /// Step to the next note. No-op at the last note or when empty.
    pub fn advance(&mut self) {
        if self.can_go_next() {
            self.position = self.position.map(|pos| pos + 1);
        }
    }

    /// Step to the previous note. No-op at the first note or when empty.
    pub fn retreat(&mut self) {
        if self.can_go_prev() {
            self.position = self.position.map(|pos| pos - 1);
        }
    }

    pub fn can_go_prev(&self) -> bool {
        matches!(self.position, Some(pos) if pos > 0)
    }

    pub fn can_go_next(&self) -> bool {
        matches!(self.position, Some(pos) if pos + 1 < self.notes.len())
    }

    pub fn current(&self) -> Option<&Note> {
        self.position.and_then(|pos| self.notes.get(pos))
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn patient_label(&self) -> Option<&str> {
        self.patient_label.as_deref()
    }
}
