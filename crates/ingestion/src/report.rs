use crate::error::IngestError;
use chrono::{DateTime, Utc};

/// The outcome of one asset's fetch-and-persist attempt.
#[derive(Debug)]
pub struct AssetOutcome {
    pub asset: String,
    pub result: Result<(), IngestError>,
}

/// Per-asset record of one full pass across the tracked asset set.
#[derive(Debug)]
pub struct IngestionReport {
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<AssetOutcome>,
}

impl IngestionReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}
