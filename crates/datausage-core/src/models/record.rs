/// One quarter's mobile data usage reading.
///
/// Decoded from the remote payload or the local snapshot; never mutated
/// after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRecord {
    pub id: i64,
    pub volume: f64,
    pub quarter: String,
}

impl UsageRecord {
    pub fn new(id: i64, volume: f64, quarter: impl Into<String>) -> Self {
        Self {
            id,
            volume,
            quarter: quarter.into(),
        }
    }
}
