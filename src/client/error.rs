//! Errors of the notes lookup.

use thiserror::Error;

/// Failure outcomes of one notes request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Endpoint URL could not be parsed
    #[error("Invalid notes endpoint '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Connection or transfer failure
    #[error("Connection failed to '{endpoint}': {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Endpoint answered with a status other than 200
    #[error("Notes endpoint returned HTTP {status}")]
    Status { status: u16 },

    /// Body did not have the expected shape
    #[error("Malformed notes response: {source}")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },

    /// Request exceeded the configured timeout
    #[error("Request timeout after {seconds}s")]
    Timeout { seconds: u64 },
}

impl FetchError {
    /// Short machine-readable kind, used in logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            FetchError::InvalidEndpoint { .. } => "invalid_endpoint",
            FetchError::ClientBuild(_) => "client_build",
            FetchError::Transport { .. } => "transport_error",
            FetchError::Status { .. } => "status_error",
            FetchError::Malformed { .. } => "malformed_response",
            FetchError::Timeout { .. } => "timeout",
        }
    }

    /// Message shown to the user in place of the note.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::InvalidEndpoint { .. } | FetchError::ClientBuild(_) => {
                "The notes service is not configured correctly".to_string()
            }
            FetchError::Transport { .. } => "Could not reach the notes service".to_string(),
            FetchError::Status { status } => format!("The notes service answered HTTP {status}"),
            FetchError::Malformed { .. } => {
                "The notes service sent a response that could not be read".to_string()
            }
            FetchError::Timeout { seconds } => {
                format!("The notes service did not answer within {seconds}s")
            }
        }
    }
}
