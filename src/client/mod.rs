//! HTTP access to the notes endpoint.

pub mod dispatch;
pub mod error;

pub use dispatch::TokioDispatcher;
pub use error::FetchError;

use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tokio::time::timeout;

use crate::config::Config;
use crate::notes::{NotesResponse, SearchQuery};

/// Connection settings for [`NotesClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub endpoint: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl From<&Config> for ClientSettings {
    fn from(config: &Config) -> Self {
        Self {
            endpoint: config.endpoint.url.clone(),
            request_timeout: Duration::from_secs(config.request.timeout_seconds as u64),
            connect_timeout: Duration::from_secs(config.request.connect_timeout_seconds as u64),
        }
    }
}

/// Client for `GET <endpoint>?mrn=<id>&after=<YYYY-MM-DD>`.
pub struct NotesClient {
    client: Client,
    endpoint: Url,
    request_timeout: Duration,
}

impl NotesClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, FetchError> {
        let endpoint =
            Url::parse(&settings.endpoint).map_err(|e| FetchError::InvalidEndpoint {
                url: settings.endpoint.clone(),
                message: e.to_string(),
            })?;
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self {
            client,
            endpoint,
            request_timeout: settings.request_timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(&ClientSettings::from(config))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Full request URL for a query. Existing query parameters on the
    /// endpoint are preserved.
    pub fn request_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(query.query_pairs());
        url
    }

    /// Run one lookup, bounded by the request timeout.
    pub async fn fetch(&self, query: &SearchQuery) -> Result<NotesResponse, FetchError> {
        match timeout(self.request_timeout, self.do_fetch(query)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                seconds: self.request_timeout.as_secs(),
            }),
        }
    }

    async fn do_fetch(&self, query: &SearchQuery) -> Result<NotesResponse, FetchError> {
        let url = self.request_url(query);
        let transport = |source| FetchError::Transport {
            endpoint: self.endpoint.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        // Only 200 carries a notes body
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Malformed { source })
    }
}
