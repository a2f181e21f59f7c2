use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::request::PredictionRequest;
use super::result::PredictionResult;

/// Default number of past predictions kept in browser storage.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// One persisted past prediction: what was asked, what came back, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the prediction completed (serialized as ISO-8601).
    pub date: DateTime<Utc>,
    pub data: PredictionRequest,
    pub result: PredictionResult,
}

impl HistoryEntry {
    pub fn new(data: PredictionRequest, result: PredictionResult) -> Self {
        Self::at(Utc::now(), data, result)
    }

    pub fn at(date: DateTime<Utc>, data: PredictionRequest, result: PredictionResult) -> Self {
        Self { date, data, result }
    }
}

/// Prepend `entry` and drop everything past `capacity`.
///
/// Eviction is by insertion position, not by `date`: the tail of the list
/// goes first and the relative order of the survivors is unchanged.
pub fn push_capped(history: &mut Vec<HistoryEntry>, entry: HistoryEntry, capacity: usize) {
    history.insert(0, entry);
    history.truncate(capacity);
}
