//! Snapshot-backed local data source.

use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::store::{SnapshotStore, StoredRecord};
use crate::error::{LoadResult, SaveResult};
use crate::models::UsageRecord;
use crate::service::{DataSource, RecordCache};

/// Adapts a `SnapshotStore` to the load and save contracts.
pub struct LocalSource {
    store: Arc<dyn SnapshotStore>,
}

impl LocalSource {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DataSource for LocalSource {
    /// A missing snapshot is a successful empty load; read failures
    /// surface as store errors.
    async fn load(&self) -> LoadResult {
        let snapshot = self.store.retrieve().await?;

        Ok(snapshot
            .map(|s| {
                s.records
                    .into_iter()
                    .map(StoredRecord::into_record)
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl RecordCache for LocalSource {
    /// Replace the snapshot: delete first, insert only once the delete
    /// succeeded. Errors surface in the order the steps run.
    async fn save(&self, records: &[UsageRecord]) -> SaveResult {
        self.store.delete().await?;

        let stored = records.iter().map(StoredRecord::from_record).collect();
        self.store.insert(stored).await
    }
}
