use crate::notes::{BrowserPhase, ViewModel};
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_BUSY, STATUS_ERROR, STATUS_OK,
};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, view: &ViewModel) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let (status, color) = phase_status(&view.phase);
        let patient = view
            .patient_label
            .clone()
            .unwrap_or_else(|| "No patient".to_string());

        let line = Line::from(vec![
            Span::styled(
                "  Notes",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(patient, text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(status, Style::default().fg(color)),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

fn phase_status(phase: &BrowserPhase) -> (&'static str, Color) {
    match phase {
        BrowserPhase::Idle => ("Ready", HEADER_SEPARATOR),
        BrowserPhase::Loading => ("Loading", STATUS_BUSY),
        BrowserPhase::Browsing => ("Loaded", STATUS_OK),
        BrowserPhase::NoResults => ("No notes", STATUS_BUSY),
        BrowserPhase::Failed { .. } => ("Error", STATUS_ERROR),
        BrowserPhase::Rejected { .. } => ("Invalid search", STATUS_ERROR),
    }
}
