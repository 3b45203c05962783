use crate::ui::app::{App, Focus};
use crate::ui::search::SearchFormIntent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Lines moved by PageUp/PageDown in the note body.
const PAGE_LINES: i32 = 10;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    match app.focus() {
        Focus::Form => handle_form_key(app, key),
        Focus::Notes => handle_notes_key(app, key),
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    if is_ctrl_char(key, 'u') {
        app.dispatch_form(SearchFormIntent::ClearField);
        return;
    }

    match key.code {
        KeyCode::Enter => {
            app.submit_search();
        }
        KeyCode::Esc => app.set_focus(Focus::Notes),
        KeyCode::Tab | KeyCode::Down => app.dispatch_form(SearchFormIntent::FocusNext),
        KeyCode::BackTab | KeyCode::Up => app.dispatch_form(SearchFormIntent::FocusPrev),
        KeyCode::Backspace => app.dispatch_form(SearchFormIntent::Backspace),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.dispatch_form(SearchFormIntent::Insert(ch));
        }
        _ => {}
    }
}

fn handle_notes_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Char('/') | KeyCode::Tab | KeyCode::Esc => app.set_focus(Focus::Form),
        KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h') => app.prev_note(),
        KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') => app.next_note(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1),
        KeyCode::PageUp => app.scroll_by(-PAGE_LINES),
        KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_by(PAGE_LINES),
        KeyCode::Char('r') => {
            app.retry();
        }
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}
