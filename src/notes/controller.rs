//! Event handling for the note browser.
//!
//! The controller turns user events (search, previous, next) and request
//! completions into [`NoteSetStore`] transitions and keeps the
//! [`ViewModel`] in sync. It never blocks: requests are handed to a
//! [`RequestDispatcher`] and their results come back through
//! [`NoteSetController::on_response`].
//!
//! Each request carries a [`RequestSeq`]. Only the completion whose
//! sequence matches the request currently in flight is applied, so a slow
//! answer to a superseded search cannot overwrite a newer one.

use std::fmt;

use super::model::NotesResponse;
use super::query::{SearchError, SearchQuery};
use super::store::NoteSetStore;
use super::view::{BrowserPhase, DateDisplay, ViewModel};
use crate::client::FetchError;

/// Monotonically increasing request tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A lookup the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: RequestSeq,
    pub query: SearchQuery,
}

/// Result of a dispatched request, tagged with its sequence.
#[derive(Debug)]
pub struct FetchCompletion {
    pub seq: RequestSeq,
    pub result: Result<NotesResponse, FetchError>,
}

/// Issues requests on behalf of the controller.
///
/// Implementations must not call back into the controller synchronously;
/// the completion is delivered later through `on_response`.
pub trait RequestDispatcher {
    fn dispatch(&self, request: SearchRequest);
}

/// What happened to a completion passed to `on_response`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseDisposition {
    Loaded { count: usize },
    Empty,
    Failed,
    Stale,
}

pub struct NoteSetController {
    store: NoteSetStore,
    dispatcher: Box<dyn RequestDispatcher>,
    dates: DateDisplay,
    phase: BrowserPhase,
    view: ViewModel,
    latest: u64,
    in_flight: Option<RequestSeq>,
    last_query: Option<SearchQuery>,
}

impl NoteSetController {
    pub fn new(dispatcher: Box<dyn RequestDispatcher>, dates: DateDisplay) -> Self {
        let store = NoteSetStore::new();
        let phase = BrowserPhase::Idle;
        let view = ViewModel::project(&store, &phase, &dates);
        Self {
            store,
            dispatcher,
            dates,
            phase,
            view,
            latest: 0,
            in_flight: None,
            last_query: None,
        }
    }

    /// Start a new search.
    ///
    /// Invalid input is rejected before anything is reset or sent.
    pub fn on_search(&mut self, patient_id: &str, after: &str) -> Result<RequestSeq, SearchError> {
        match SearchQuery::parse(patient_id, after) {
            Ok(query) => Ok(self.issue(query)),
            Err(err) => {
                tracing::debug!("Search rejected: {}", err);
                self.phase = BrowserPhase::Rejected {
                    message: err.to_string(),
                };
                self.render_current();
                Err(err)
            }
        }
    }

    /// Re-issue the last valid search. `None` if there was none.
    pub fn on_retry(&mut self) -> Option<RequestSeq> {
        let query = self.last_query.clone()?;
        Some(self.issue(query))
    }

    fn issue(&mut self, query: SearchQuery) -> RequestSeq {
        self.store.reset();
        self.phase = BrowserPhase::Loading;
        self.render_current();

        self.latest += 1;
        let seq = RequestSeq(self.latest);
        self.in_flight = Some(seq);
        self.last_query = Some(query.clone());
        tracing::info!(
            seq = seq.value(),
            param = query.patient.param_name(),
            after = %query.after,
            "Issuing notes search"
        );
        self.dispatcher.dispatch(SearchRequest { seq, query });
        seq
    }

    /// Apply the completion of a dispatched request.
    pub fn on_response(
        &mut self,
        seq: RequestSeq,
        result: Result<NotesResponse, FetchError>,
    ) -> ResponseDisposition {
        if self.in_flight != Some(seq) {
            tracing::debug!(
                seq = seq.value(),
                latest = self.latest,
                "Discarding stale notes response"
            );
            return ResponseDisposition::Stale;
        }
        self.in_flight = None;

        let disposition = match result {
            Ok(response) => {
                let label = response.patient_label();
                let count = response.notes.len();
                self.store.load(response.notes, label);
                if count > 0 {
                    self.phase = BrowserPhase::Browsing;
                    ResponseDisposition::Loaded { count }
                } else {
                    self.phase = BrowserPhase::NoResults;
                    ResponseDisposition::Empty
                }
            }
            Err(err) => {
                self.phase = BrowserPhase::Failed {
                    message: err.user_message(),
                };
                ResponseDisposition::Failed
            }
        };
        tracing::info!(seq = seq.value(), outcome = ?disposition, "Notes search settled");
        self.render_current();
        disposition
    }

    /// Show the previous note if there is one. Returns whether it moved.
    pub fn on_prev(&mut self) -> bool {
        let moved = self.store.can_go_prev();
        if moved {
            self.store.retreat();
        }
        self.render_current();
        moved
    }

    /// Show the next note if there is one. Returns whether it moved.
    pub fn on_next(&mut self) -> bool {
        let moved = self.store.can_go_next();
        if moved {
            self.store.advance();
        }
        self.render_current();
        moved
    }

    /// Recompute the view model from the current state.
    pub fn render_current(&mut self) -> &ViewModel {
        self.view = ViewModel::project(&self.store, &self.phase, &self.dates);
        &self.view
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn store(&self) -> &NoteSetStore {
        &self.store
    }

    pub fn phase(&self) -> &BrowserPhase {
        &self.phase
    }

    pub fn dates(&self) -> &DateDisplay {
        &self.dates
    }

    pub fn latest_seq(&self) -> Option<RequestSeq> {
        (self.latest > 0).then_some(RequestSeq(self.latest))
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }
}
