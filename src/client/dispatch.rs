//! Runs search requests on a tokio runtime and reports completions back.

use std::sync::Arc;
use tokio::runtime::Handle;

use super::NotesClient;
use crate::notes::{FetchCompletion, RequestDispatcher, SearchRequest};

type CompletionSink = Arc<dyn Fn(FetchCompletion) + Send + Sync + 'static>;

/// [`RequestDispatcher`] that spawns each request onto a runtime.
///
/// The completion is handed to `sink` on a runtime worker; the sink is
/// expected to forward it to the thread that owns the controller.
pub struct TokioDispatcher {
    handle: Handle,
    client: Arc<NotesClient>,
    sink: CompletionSink,
}

impl TokioDispatcher {
    pub fn new<F>(handle: Handle, client: Arc<NotesClient>, sink: F) -> Self
    where
        F: Fn(FetchCompletion) + Send + Sync + 'static,
    {
        Self {
            handle,
            client,
            sink: Arc::new(sink),
        }
    }
}

impl RequestDispatcher for TokioDispatcher {
    fn dispatch(&self, request: SearchRequest) {
        let client = Arc::clone(&self.client);
        let sink = Arc::clone(&self.sink);
        self.handle.spawn(async move {
            let result = client.fetch(&request.query).await;
            if let Err(err) = &result {
                tracing::warn!(
                    seq = request.seq.value(),
                    kind = err.error_type(),
                    "Notes request failed: {}",
                    err
                );
            }
            sink(FetchCompletion {
                seq: request.seq,
                result,
            });
        });
    }
}
