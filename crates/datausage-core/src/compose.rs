//! Production wiring of the service stack.
//!
//! The remote source is decorated with write-through caching and backed
//! by the local snapshot as fallback, so consumers see fresh data when
//! the network cooperates and the last good snapshot when it does not.

use std::sync::Arc;

use anyhow::Result;

use crate::api::{HttpClient, ReqwestClient, RemoteSource};
use crate::cache::{FileStore, LocalSource};
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::service::{CacheDecorator, FallbackSource};

/// Build the full service stack with the production transport.
pub fn usage_service(
    config: &Config,
    dispatcher: Arc<dyn Dispatcher>,
) -> Result<Arc<FallbackSource>> {
    let client = Arc::new(ReqwestClient::new()?);
    usage_service_with_client(config, client, dispatcher)
}

/// Same wiring with an injected transport, for callers that bring their
/// own HTTP layer.
pub fn usage_service_with_client(
    config: &Config,
    client: Arc<dyn HttpClient>,
    dispatcher: Arc<dyn Dispatcher>,
) -> Result<Arc<FallbackSource>> {
    let store = Arc::new(FileStore::new(config.snapshot_path()?)?);
    let local = Arc::new(LocalSource::new(store));

    let remote = RemoteSource::new(config.endpoint.clone(), client);
    let cached_remote = CacheDecorator::new(Arc::new(remote), local.clone());

    Ok(Arc::new(FallbackSource::new(
        Arc::new(cached_remote),
        local,
        dispatcher,
    )))
}
