//! Data-service composition layer.
//!
//! The two seams every source and cache implement:
//!
//! - `DataSource`: async load of usage records
//! - `RecordCache`: async replacement of the cached record set
//!
//! Plus the composed pieces: `CacheDecorator` (write-through saves),
//! `FallbackSource` (primary/secondary with dispatcher delivery) and the
//! liveness guard for completion callbacks.

pub mod composite;
pub mod decorator;
pub mod liveness;

pub use composite::FallbackSource;
pub use decorator::CacheDecorator;
pub use liveness::{LivenessToken, LivenessWatch};

use async_trait::async_trait;

use crate::error::{LoadResult, SaveResult};
use crate::models::UsageRecord;

/// A source of usage records.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn load(&self) -> LoadResult;
}

/// A sink that replaces the cached record set wholesale.
#[async_trait]
pub trait RecordCache: Send + Sync {
    async fn save(&self, records: &[UsageRecord]) -> SaveResult;
}
