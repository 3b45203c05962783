//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use note_browser::client::{ClientSettings, NotesClient};
use note_browser::notes::{DateDisplay, DisplayTimeZone};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Client for `endpoint` with a short request timeout.
pub fn client(endpoint: &str, timeout: Duration) -> NotesClient {
    NotesClient::new(&ClientSettings {
        endpoint: endpoint.to_string(),
        request_timeout: timeout,
        connect_timeout: Duration::from_secs(2),
    })
    .expect("Failed to build notes client")
}

/// Dates rendered as plain UTC days, independent of the host time zone.
pub fn utc_dates() -> DateDisplay {
    DateDisplay {
        format: "%Y-%m-%d".to_string(),
        timezone: DisplayTimeZone::Utc,
    }
}

/// Write `content` to a config.toml in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
