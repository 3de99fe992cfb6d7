//! Offline-first access to Singapore's quarterly mobile-data-usage
//! dataset.
//!
//! The crate fetches records from the data.gov.sg datastore endpoint,
//! keeps a local JSON snapshot as fallback, and aggregates raw quarterly
//! records into per-year summaries:
//!
//! - `api`: transport seam, payload decoding, the remote source
//! - `cache`: snapshot store, file implementation, the local source
//! - `service`: source/cache seams, write-through decorator, fallback
//!   composite, liveness guard
//! - `dispatch`: delivery-context plumbing for completion callbacks
//! - `models`: domain records and the year aggregation
//! - `compose`: production wiring of the whole stack

pub mod api;
pub mod cache;
pub mod compose;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod service;

pub use compose::{usage_service, usage_service_with_client};
pub use config::Config;
pub use error::{LoadResult, RemoteError, SaveResult, ServiceError, StoreError};
pub use models::{aggregate_by_year, AnnualUsage, UsageRecord};
pub use service::{DataSource, RecordCache};
