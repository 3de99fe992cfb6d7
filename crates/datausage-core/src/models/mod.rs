//! Domain models for the usage dataset.
//!
//! - `UsageRecord`: one quarter's decoded reading
//! - `AnnualUsage` and `aggregate_by_year`: per-year summaries with a
//!   volume total and a decreasing-usage flag

pub mod annual;
pub mod record;

pub use annual::{aggregate_by_year, AnnualUsage};
pub use record::UsageRecord;
