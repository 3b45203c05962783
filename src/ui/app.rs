use crate::notes::{FetchCompletion, NoteSetController, RequestSeq, ResponseDisposition, ViewModel};
use crate::ui::mvi::Reducer;
use crate::ui::render::max_scroll;
use crate::ui::search::{SearchFormIntent, SearchFormReducer, SearchFormState};
use ratatui::layout::Rect;

/// Which pane receives key input.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Focus {
    #[default]
    Form,
    Notes,
}

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App {
    should_quit: bool,
    focus: Focus,
    /// Search form inputs (MVI pattern).
    form: SearchFormState,
    controller: NoteSetController,
    /// Vertical scroll of the note body, reset whenever the note changes.
    scroll: u16,
    /// Note pane area of the last frame, borders included.
    body_area: Rect,
}

impl App {
    pub fn new(controller: NoteSetController) -> Self {
        Self {
            should_quit: false,
            focus: Focus::Form,
            form: SearchFormState::default(),
            controller,
            scroll: 0,
            body_area: Rect::default(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn form(&self) -> &SearchFormState {
        &self.form
    }

    pub fn view(&self) -> &ViewModel {
        self.controller.view()
    }

    pub fn controller(&self) -> &NoteSetController {
        &self.controller
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn dispatch_form(&mut self, intent: SearchFormIntent) {
        dispatch_mvi!(self, form, SearchFormReducer, intent);
    }

    /// Submit the form. Focus moves to the notes pane when the search was
    /// issued and stays on the form when the input was rejected.
    pub fn submit_search(&mut self) -> Option<RequestSeq> {
        let result = self
            .controller
            .on_search(&self.form.patient_id, &self.form.after);
        self.scroll = 0;
        match result {
            Ok(seq) => {
                self.focus = Focus::Notes;
                Some(seq)
            }
            Err(_) => None,
        }
    }

    pub fn retry(&mut self) -> Option<RequestSeq> {
        self.scroll = 0;
        self.controller.on_retry()
    }

    pub fn prev_note(&mut self) {
        if self.controller.on_prev() {
            self.scroll = 0;
        }
    }

    pub fn next_note(&mut self) {
        if self.controller.on_next() {
            self.scroll = 0;
        }
    }

    pub fn set_body_area(&mut self, area: Rect) {
        self.body_area = area;
    }

    /// Scroll the note body, clamped so the last wrapped row can reach
    /// the bottom of the pane and no further.
    pub fn scroll_by(&mut self, delta: i32) {
        let max = max_scroll(&self.view().body, self.body_area);
        let next = i32::from(self.scroll).saturating_add(delta).max(0);
        self.scroll = u16::try_from(next).unwrap_or(u16::MAX).min(max);
    }

    pub fn on_fetch_complete(&mut self, completion: FetchCompletion) -> ResponseDisposition {
        let disposition = self
            .controller
            .on_response(completion.seq, completion.result);
        if disposition != ResponseDisposition::Stale {
            self.scroll = 0;
        }
        disposition
    }
}
