use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::UsageRecord;

/// On-disk snapshot document. The whole cache is one document and every
/// save replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub records: Vec<StoredRecord>,
}

/// Wire shape of one stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: i64,
    #[serde(rename = "volumeOfMobileData")]
    pub volume: f64,
    pub quarter: String,
}

impl StoredRecord {
    pub fn from_record(record: &UsageRecord) -> Self {
        Self {
            id: record.id,
            volume: record.volume,
            quarter: record.quarter.clone(),
        }
    }

    pub fn into_record(self) -> UsageRecord {
        UsageRecord {
            id: self.id,
            volume: self.volume,
            quarter: self.quarter,
        }
    }
}

/// Persistence seam for the cached snapshot.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Replace the snapshot with the given records.
    async fn insert(&self, records: Vec<StoredRecord>) -> Result<(), StoreError>;

    /// Read the current snapshot. `None` means no snapshot exists, which
    /// is a valid empty-cache state, not an error.
    async fn retrieve(&self) -> Result<Option<Snapshot>, StoreError>;

    /// Remove the snapshot. Deleting a missing snapshot succeeds.
    async fn delete(&self) -> Result<(), StoreError>;
}
