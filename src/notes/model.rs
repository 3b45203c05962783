//! Wire types returned by the notes endpoint.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Write;

/// Time zone used when turning a note timestamp into a display date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayTimeZone {
    #[default]
    Local,
    Utc,
}

/// Note instant as sent by the endpoint.
///
/// The endpoint emits epoch milliseconds; ISO strings are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    /// Fractional or out-of-range milliseconds.
    Number(serde_json::Number),
    Text(String),
}

impl Timestamp {
    /// Resolve to a UTC instant, if the value names one.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            Timestamp::Number(number) => number
                .as_f64()
                .filter(|ms| ms.is_finite() && ms.abs() < i64::MAX as f64)
                .and_then(|ms| DateTime::from_timestamp_millis(ms as i64)),
            Timestamp::Text(text) => {
                let text = text.trim();
                if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                    return Some(parsed.with_timezone(&Utc));
                }
                text.parse::<i64>()
                    .ok()
                    .and_then(DateTime::from_timestamp_millis)
            }
        }
    }

    /// Format for display. Date-only strings are shown as dates and
    /// unrecognized strings are shown as received.
    pub fn display(&self, format: &str, zone: DisplayTimeZone) -> String {
        let Some(instant) = self.to_utc() else {
            return match self {
                Timestamp::Text(text) => match NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d") {
                    Ok(date) => date.format("%Y-%m-%d").to_string(),
                    Err(_) => text.clone(),
                },
                Timestamp::Millis(ms) => ms.to_string(),
                Timestamp::Number(number) => number.to_string(),
            };
        };

        let mut out = String::new();
        let written = match zone {
            DisplayTimeZone::Utc => write!(out, "{}", instant.format(format)),
            DisplayTimeZone::Local => write!(out, "{}", instant.with_timezone(&Local).format(format)),
        };
        if written.is_err() {
            // chrono reports bad format strings only while writing
            return instant.to_rfc3339();
        }
        out
    }
}

/// One clinical document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub note_type: String,
    pub timestamp: Timestamp,
    /// MIME type of `text`, when the endpoint reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl Note {
    pub fn new(text: impl Into<String>, note_type: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            text: text.into(),
            note_type: note_type.into(),
            timestamp,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Successful response body of a notes lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesResponse {
    /// Patient names; entries can be null when the record has no text form.
    #[serde(default)]
    pub names: Vec<Option<String>>,
    pub notes: Vec<Note>,
}

impl NotesResponse {
    /// Label shown next to the notes, built from the first patient name.
    pub fn patient_label(&self) -> String {
        let name = self
            .names
            .first()
            .and_then(|name| name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("unknown");
        format!("Patient Name: {name}")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
