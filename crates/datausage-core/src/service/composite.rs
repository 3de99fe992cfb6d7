//! Primary-then-secondary fallback over two data sources.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::dispatch::Dispatcher;
use crate::error::LoadResult;
use crate::service::DataSource;

/// Serves from the primary source and falls back to the secondary when
/// the primary fails. On a double failure the secondary's error is the
/// one reported; the primary's is logged and discarded.
pub struct FallbackSource {
    primary: Arc<dyn DataSource>,
    secondary: Arc<dyn DataSource>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl FallbackSource {
    pub fn new(
        primary: Arc<dyn DataSource>,
        secondary: Arc<dyn DataSource>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        Self {
            primary,
            secondary,
            dispatcher,
        }
    }

    async fn load_with_fallback(
        primary: &dyn DataSource,
        secondary: &dyn DataSource,
    ) -> LoadResult {
        match primary.load().await {
            Ok(records) => Ok(records),
            Err(e) => {
                debug!(error = %e, "Primary source failed, falling back");
                secondary.load().await
            }
        }
    }

    /// Completion-style load. The final result is delivered through the
    /// injected dispatcher: run directly when completion happens on the
    /// dispatcher's own context, queued onto it otherwise. Needs an
    /// ambient tokio runtime: the fallback chain runs on a spawned task
    /// and panics when no runtime is active.
    pub fn load_with<F>(&self, completion: F)
    where
        F: FnOnce(LoadResult) + Send + 'static,
    {
        let primary = Arc::clone(&self.primary);
        let secondary = Arc::clone(&self.secondary);
        let dispatcher = Arc::clone(&self.dispatcher);

        tokio::spawn(async move {
            let result = Self::load_with_fallback(primary.as_ref(), secondary.as_ref()).await;
            dispatcher.dispatch_or_run(Box::new(move || completion(result)));
        });
    }
}

#[async_trait]
impl DataSource for FallbackSource {
    async fn load(&self) -> LoadResult {
        Self::load_with_fallback(self.primary.as_ref(), self.secondary.as_ref()).await
    }
}
