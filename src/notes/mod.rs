//! Note browsing core: the note set, its controller, and the view
//! projection.
//!
//! ```text
//! key event ──→ NoteSetController ──→ NoteSetStore
//!                   │        ↑                │
//!        dispatch   ↓        │ on_response    ↓
//!            RequestDispatcher         ViewModel ──→ draw
//! ```

pub mod controller;
pub mod model;
pub mod query;
pub mod sanitize;
pub mod store;
pub mod view;

pub use controller::{
    FetchCompletion, NoteSetController, RequestDispatcher, RequestSeq, ResponseDisposition,
    SearchRequest,
};
pub use model::{DisplayTimeZone, Note, NotesResponse, Timestamp};
pub use query::{PatientRef, SearchError, SearchQuery};
pub use store::NoteSetStore;
pub use view::{BrowserPhase, DateDisplay, NoteDisplay, ViewModel};
