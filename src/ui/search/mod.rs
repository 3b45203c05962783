//! Search form feature module.
//!
//! Holds the patient identifier and date inputs while they are edited.
//!
//! - `state.rs` - Field contents and focus
//! - `intent.rs` - Edits (insert, delete, focus moves, prefill)
//! - `reducer.rs` - State transitions (pure, no side effects)

mod intent;
mod reducer;
mod state;

pub use intent::SearchFormIntent;
pub use reducer::SearchFormReducer;
pub use state::{FormField, SearchFormState};
