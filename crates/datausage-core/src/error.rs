use thiserror::Error;

use crate::models::UsageRecord;

/// Failures raised while loading from the remote service.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Could not reach the remote service")]
    Connectivity,

    #[error("Remote service returned invalid data")]
    InvalidData,
}

/// Failures raised by the snapshot store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Snapshot file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot did not decode: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything a data source can fail with.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of loading usage records from any source.
pub type LoadResult = Result<Vec<UsageRecord>, ServiceError>;

/// Result of replacing the cached record set.
pub type SaveResult = Result<(), StoreError>;
