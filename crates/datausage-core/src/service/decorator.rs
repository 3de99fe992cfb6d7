//! Write-through caching for any data source.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::error::LoadResult;
use crate::service::{DataSource, RecordCache};

/// Decorates a source so every successful load refreshes the cache.
///
/// The save is fire-and-forget: it cannot delay the returned records and
/// its outcome never reaches the caller.
pub struct CacheDecorator {
    decoratee: Arc<dyn DataSource>,
    cache: Arc<dyn RecordCache>,
}

impl CacheDecorator {
    pub fn new(decoratee: Arc<dyn DataSource>, cache: Arc<dyn RecordCache>) -> Self {
        Self { decoratee, cache }
    }
}

#[async_trait]
impl DataSource for CacheDecorator {
    async fn load(&self) -> LoadResult {
        let records = self.decoratee.load().await?;

        let cache = Arc::clone(&self.cache);
        let to_save = records.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.save(&to_save).await {
                warn!(error = %e, "Failed to cache fetched records");
            }
        });

        Ok(records)
    }
}
