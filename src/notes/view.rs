//! Projection of browser state onto display data.

use super::model::{DisplayTimeZone, Note};
use super::sanitize::{display_text, inline_text};
use super::store::NoteSetStore;

/// Where the browser is in its search/load cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BrowserPhase {
    /// Nothing searched yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// Notes are loaded and one is selected.
    Browsing,
    /// The lookup succeeded but returned no notes.
    NoResults,
    /// The lookup failed.
    Failed { message: String },
    /// The search input was invalid; nothing was sent.
    Rejected { message: String },
}

impl BrowserPhase {
    /// Text shown in place of a note body.
    pub fn placeholder(&self) -> String {
        match self {
            BrowserPhase::Idle => {
                "Enter a patient identifier and a date, then press Enter to search.".to_string()
            }
            BrowserPhase::Loading => "Loading...".to_string(),
            BrowserPhase::Browsing => "No note selected.".to_string(),
            BrowserPhase::NoResults => "No notes found.".to_string(),
            BrowserPhase::Failed { message } => format!("Request failed: {message}"),
            BrowserPhase::Rejected { message } => format!("Invalid search: {message}"),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, BrowserPhase::Failed { .. } | BrowserPhase::Rejected { .. })
    }
}

/// How note timestamps are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateDisplay {
    pub format: String,
    pub timezone: DisplayTimeZone,
}

impl Default for DateDisplay {
    fn default() -> Self {
        Self {
            format: "%Y-%m-%d %H:%M".to_string(),
            timezone: DisplayTimeZone::Local,
        }
    }
}

/// Display fields of a single note, already sanitized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDisplay {
    pub body: String,
    pub note_type: String,
    pub date: String,
}

impl NoteDisplay {
    pub fn of(note: &Note, dates: &DateDisplay) -> Self {
        Self {
            body: display_text(&note.text, note.content_type.as_deref()),
            note_type: inline_text(&note.note_type),
            date: note.timestamp.display(&dates.format, dates.timezone),
        }
    }
}

/// Everything a view needs to draw the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    pub phase: BrowserPhase,
    pub patient_label: Option<String>,
    pub body: String,
    pub note_type: String,
    pub note_date: String,
    /// `(index, total)` of the note on display.
    pub position: Option<(usize, usize)>,
    pub can_go_prev: bool,
    pub can_go_next: bool,
}

impl ViewModel {
    pub fn project(store: &NoteSetStore, phase: &BrowserPhase, dates: &DateDisplay) -> Self {
        let patient_label = store.patient_label().map(inline_text);
        let (display, position) = match (store.current(), store.position()) {
            (Some(note), Some(pos)) => (NoteDisplay::of(note, dates), Some((pos, store.len()))),
            _ => (
                NoteDisplay {
                    body: phase.placeholder(),
                    ..NoteDisplay::default()
                },
                None,
            ),
        };

        Self {
            phase: phase.clone(),
            patient_label,
            body: display.body,
            note_type: display.note_type,
            note_date: display.date,
            position,
            can_go_prev: store.can_go_prev(),
            can_go_next: store.can_go_next(),
        }
    }
}
