//! Terminal browser for a patient's clinical notes.
//!
//! Looks up notes by patient identifier and date on a remote endpoint and
//! pages through them one at a time.

pub mod args;
pub mod client;
pub mod config;
pub mod dump;
pub mod logging;
pub mod notes;
pub mod ui;
