use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::result::Estimate;

/// One prediction as logged by the service itself (`GET /history`).
///
/// The service stores a reduced copy of each request: only the fields
/// below survive, and numeric inputs stay as the strings the page sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerHistoryRecord {
    /// Local time on the service host, without offset.
    pub timestamp: NaiveDateTime,
    pub year: String,
    pub kms: String,
    pub fuel: String,
    pub transmission: String,
    pub price: f64,
    pub price_formatted: String,
}

/// Body of `GET /history`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ServerHistoryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub history: Vec<ServerHistoryRecord>,
}

/// Minimal per-car payload accepted by `POST /compare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparedCar {
    pub price: String,
    pub price_value: f64,
}

impl From<&Estimate> for ComparedCar {
    fn from(estimate: &Estimate) -> Self {
        Self {
            price: estimate.price.clone(),
            price_value: estimate.price_value,
        }
    }
}

/// Summary returned by `POST /compare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub best_value: ComparedCar,
    pub highest_price: ComparedCar,
    pub average_price: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct CompareRequest<'a> {
    pub predictions: &'a [ComparedCar],
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompareResponse {
    pub success: bool,
    #[serde(default)]
    pub comparison: Option<Comparison>,
    #[serde(default)]
    pub error: Option<String>,
}
