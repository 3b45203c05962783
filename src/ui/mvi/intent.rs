//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects (key presses, form edits).
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
