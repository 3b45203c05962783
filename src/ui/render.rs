use crate::notes::ViewModel;
use crate::ui::app::{App, Focus};
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::layout_regions;
use crate::ui::search::{FormField, SearchFormState};
use crate::ui::theme::{ACCENT, FOCUS_BORDER, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const PATIENT_LABEL: &str = " Patient (MRN or fhir:<id>): ";
const AFTER_LABEL: &str = " Notes after (YYYY-MM-DD):   ";

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let regions = layout_regions(frame.area());
    let view = app.view();

    frame.render_widget(Header::new().widget(view), regions.header);
    draw_form(frame, regions.form, app.form(), app.focus() == Focus::Form);
    frame.render_widget(Clear, regions.body);
    draw_note(frame, regions.body, view, app.scroll(), app.focus() == Focus::Notes);
    frame.render_widget(
        Footer::new().widget(regions.footer, app.focus(), view.can_go_prev, view.can_go_next),
        regions.footer,
    );
}

fn border_style(focused: bool) -> Style {
    Style::default().fg(if focused { FOCUS_BORDER } else { GLOBAL_BORDER })
}

fn draw_form(frame: &mut Frame<'_>, area: Rect, form: &SearchFormState, focused: bool) {
    let field_line = |label: &'static str, value: &str, field: FormField| {
        let active = focused && form.focused == field;
        let value_style = if active {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(HEADER_TEXT)
        };
        Line::from(vec![
            Span::styled(label, Style::default().fg(MUTED_TEXT)),
            Span::styled(value.to_string(), value_style),
        ])
    };
    let lines = vec![
        field_line(PATIENT_LABEL, &form.patient_id, FormField::PatientId),
        field_line(AFTER_LABEL, &form.after, FormField::After),
    ];
    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(border_style(focused));
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if focused && area.width > 2 && area.height > 2 {
        let (label, row) = match form.focused {
            FormField::PatientId => (PATIENT_LABEL, 0),
            FormField::After => (AFTER_LABEL, 1),
        };
        let offset = label.chars().count() + form.focused_value().chars().count();
        let max_x = area.x + area.width.saturating_sub(2);
        let x = (area.x + 1).saturating_add(offset as u16).min(max_x);
        let y = area.y + 1 + row;
        if y < area.y + area.height.saturating_sub(1) {
            frame.set_cursor_position((x, y));
        }
    }
}

fn draw_note(frame: &mut Frame<'_>, area: Rect, view: &ViewModel, scroll: u16, focused: bool) {
    let title = match view.position {
        Some((index, total)) => {
            let note_type = if view.note_type.is_empty() {
                "Note"
            } else {
                view.note_type.as_str()
            };
            format!(" {} │ {} │ {}/{} ", note_type, view.note_date, index + 1, total)
        }
        None => " Note ".to_string(),
    };
    let body_style = if view.phase.is_error() {
        Style::default().fg(STATUS_ERROR)
    } else if view.position.is_none() {
        Style::default().fg(MUTED_TEXT)
    } else {
        Style::default().fg(HEADER_TEXT)
    };

    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(border_style(focused));
    let widget = note_paragraph(&view.body)
        .style(body_style)
        .scroll((scroll, 0))
        .block(block);
    frame.render_widget(widget, area);
}

fn note_paragraph(body: &str) -> Paragraph<'_> {
    Paragraph::new(body).wrap(Wrap { trim: false })
}

/// Largest scroll offset for `body` drawn in the bordered note pane `area`.
pub fn max_scroll(body: &str, area: Rect) -> u16 {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    if inner.width == 0 {
        return 0;
    }
    let rows = note_paragraph(body).line_count(inner.width);
    u16::try_from(rows.saturating_sub(usize::from(inner.height))).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::{
        DateDisplay, DisplayTimeZone, Note, NoteSetController, NotesResponse, RequestDispatcher,
        SearchRequest, Timestamp,
    };
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    struct Discard;

    impl RequestDispatcher for Discard {
        fn dispatch(&self, _request: SearchRequest) {}
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn draws_current_note_and_position() {
        let dates = DateDisplay {
            format: "%Y-%m-%d".to_string(),
            timezone: DisplayTimeZone::Utc,
        };
        let mut controller = NoteSetController::new(Box::new(Discard), dates);
        let seq = controller.on_search("12345", "2024-01-01").unwrap();
        controller.on_response(
            seq,
            Ok(NotesResponse {
                names: vec![Some("Jane Doe".to_string())],
                notes: vec![
                    Note::new("<p>Stable overnight</p>", "Progress", Timestamp::Millis(0)),
                    Note::new("Discharged", "Discharge", Timestamp::Millis(0)),
                ],
            }),
        );
        let app = App::new(controller);

        let text = screen_text(&app);
        assert!(text.contains("Patient Name: Jane Doe"));
        assert!(text.contains("Progress │ 1970-01-01 │ 1/2"));
        assert!(text.contains("Stable overnight"));
        assert!(!text.contains("<p>"));
    }

    #[test]
    fn max_scroll_counts_wrapped_rows() {
        let area = Rect::new(0, 0, 12, 5);
        // 10 columns wide, 3 rows tall inside the border
        assert_eq!(max_scroll("short", area), 0);
        assert!(max_scroll(&"word ".repeat(20), area) >= 6);
        assert_eq!(max_scroll("one\ntwo\nthree\nfour", area), 1);
        assert_eq!(max_scroll("anything", Rect::default()), 0);
    }

    #[test]
    fn idle_screen_shows_prompt() {
        let app = App::new(NoteSetController::new(Box::new(Discard), DateDisplay::default()));
        let text = screen_text(&app);
        assert!(text.contains("Enter a patient identifier"));
        assert!(text.contains("No patient"));
    }
}
