use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::store::{Snapshot, SnapshotStore, StoredRecord};
use crate::error::StoreError;

/// JSON-file-backed snapshot store.
///
/// All operations go through one fair read-write gate: retrievals share
/// it and may overlap, mutations hold it exclusively. Fair acquisition
/// means queued operations run in the order they were submitted. File
/// I/O goes through `tokio::fs`, so a held gate never ties up a runtime
/// thread.
pub struct FileStore {
    path: PathBuf,
    gate: RwLock<()>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self {
            path,
            gate: RwLock::new(()),
        })
    }

    async fn read_snapshot(&self) -> Result<Option<Snapshot>, StoreError> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_slice(&contents)?))
    }
}

#[async_trait]
impl SnapshotStore for FileStore {
    async fn insert(&self, records: Vec<StoredRecord>) -> Result<(), StoreError> {
        let _exclusive = self.gate.write().await;

        let snapshot = Snapshot { records };
        let contents = serde_json::to_string_pretty(&snapshot)?;
        tokio::fs::write(&self.path, contents).await?;

        debug!(path = %self.path.display(), count = snapshot.records.len(), "Snapshot written");
        Ok(())
    }

    async fn retrieve(&self) -> Result<Option<Snapshot>, StoreError> {
        let _shared = self.gate.read().await;
        self.read_snapshot().await
    }

    async fn delete(&self) -> Result<(), StoreError> {
        let _exclusive = self.gate.write().await;

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Snapshot deleted");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
