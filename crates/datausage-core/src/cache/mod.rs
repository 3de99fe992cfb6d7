//! Local persistence for the usage snapshot.
//!
//! - `SnapshotStore`: the persistence seam (insert / retrieve / delete)
//! - `FileStore`: JSON file implementation with a fair read-write gate
//! - `LocalSource`: adapts a store to the load and save contracts

pub mod file_store;
pub mod local;
pub mod store;

pub use file_store::FileStore;
pub use local::LocalSource;
pub use store::{Snapshot, SnapshotStore, StoredRecord};
