//! Remote data source over the transport seam.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::api::http::HttpClient;
use crate::api::mapper;
use crate::error::{LoadResult, RemoteError};
use crate::models::UsageRecord;
use crate::service::liveness::LivenessWatch;
use crate::service::DataSource;

/// Loads usage records from the fixed dataset endpoint.
///
/// One request per load, no retries; transport failures collapse to
/// `Connectivity` and everything else that goes wrong is `InvalidData`.
pub struct RemoteSource {
    url: String,
    client: Arc<dyn HttpClient>,
}

impl RemoteSource {
    pub fn new(url: impl Into<String>, client: Arc<dyn HttpClient>) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// Completion-style load for callers that hand out callbacks.
    ///
    /// The completion is skipped when `watch`'s token has been dropped by
    /// the time the response arrives; the request itself is not
    /// cancelled. Needs an ambient tokio runtime: the fetch runs on a
    /// spawned task and panics when no runtime is active.
    pub fn load_with<F>(&self, watch: LivenessWatch, completion: F)
    where
        F: FnOnce(LoadResult) + Send + 'static,
    {
        let url = self.url.clone();
        let client = Arc::clone(&self.client);

        tokio::spawn(async move {
            let result = fetch(&url, client.as_ref()).await;
            if !watch.is_live() {
                debug!("Caller is gone, dropping fetched result");
                return;
            }
            completion(result.map_err(Into::into));
        });
    }
}

async fn fetch(url: &str, client: &dyn HttpClient) -> Result<Vec<UsageRecord>, RemoteError> {
    let response = client.get(url).await.map_err(|e| {
        debug!(error = %e, "Request failed without a response");
        RemoteError::Connectivity
    })?;

    mapper::decode(&response)
}

#[async_trait]
impl DataSource for RemoteSource {
    async fn load(&self) -> LoadResult {
        Ok(fetch(&self.url, self.client.as_ref()).await?)
    }
}
