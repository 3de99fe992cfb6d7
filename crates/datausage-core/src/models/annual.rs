use std::collections::HashMap;

use crate::models::UsageRecord;

/// Usage summary for one calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualUsage {
    pub year: String,
    /// Member records, ascending by id.
    pub records: Vec<UsageRecord>,
    /// Total volume across the member records.
    pub volume: f64,
    /// Whether any record shows less volume than the one before it.
    pub is_decreasing: bool,
}

impl AnnualUsage {
    /// Build a year summary from that year's records.
    ///
    /// Records are sorted by id first, so the total and the trend flag
    /// are deterministic functions of the member set.
    pub fn new(year: impl Into<String>, mut records: Vec<UsageRecord>) -> Self {
        records.sort_by_key(|r| r.id);

        let volume: f64 = records.iter().map(|r| r.volume).sum();
        let is_decreasing = records
            .windows(2)
            .any(|pair| pair[1].volume < pair[0].volume);

        Self {
            year: year.into(),
            records,
            volume,
            is_decreasing,
        }
    }
}

/// Year token of a quarter label such as "2019-Q3".
/// A label without a separator groups under the whole label.
fn year_of(quarter: &str) -> &str {
    match quarter.split_once('-') {
        Some((year, _)) => year,
        None => quarter,
    }
}

/// Group records into per-year summaries, ascending by year.
///
/// The trend flag compares adjacent records in id order. When ids are
/// not assigned chronologically that is an id-order property, not a
/// calendar trend.
pub fn aggregate_by_year(records: &[UsageRecord]) -> Vec<AnnualUsage> {
    let mut groups: HashMap<String, Vec<UsageRecord>> = HashMap::new();
    for record in records {
        groups
            .entry(year_of(&record.quarter).to_string())
            .or_default()
            .push(record.clone());
    }

    let mut years: Vec<AnnualUsage> = groups
        .into_iter()
        .map(|(year, records)| AnnualUsage::new(year, records))
        .collect();
    years.sort_by(|a, b| a.year.cmp(&b.year));
    years
}
