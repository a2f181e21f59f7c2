use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Message shown when the service rejects a request without saying why.
pub const UNSPECIFIED_REJECTION: &str = "Prediction failed";

/// Severity of a market insight. Drives the `alert-<kind>` styling.
///
/// Kinds the page does not know about are kept verbatim so they still
/// round-trip through stored history unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InsightKind {
    Success,
    Warning,
    Info,
    Danger,
    Other(String),
}

impl InsightKind {
    pub fn as_str(&self) -> &str {
        match self {
            InsightKind::Success => "success",
            InsightKind::Warning => "warning",
            InsightKind::Info => "info",
            InsightKind::Danger => "danger",
            InsightKind::Other(s) => s,
        }
    }

    /// CSS classes of the rendered alert box.
    pub fn alert_class(&self) -> String {
        format!("alert alert-{}", self.as_str())
    }
}

impl From<String> for InsightKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "success" => InsightKind::Success,
            "warning" => InsightKind::Warning,
            "info" => InsightKind::Info,
            "danger" => InsightKind::Danger,
            _ => InsightKind::Other(s),
        }
    }
}

impl From<InsightKind> for String {
    fn from(kind: InsightKind) -> Self {
        kind.as_str().to_string()
    }
}

/// One line of market commentary returned with an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub text: String,
}

/// A successful valuation.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// Display string, already formatted by the service (e.g. "₹ 5.25 Lakh").
    pub price: String,
    /// Raw numeric estimate used for categorisation.
    pub price_value: f64,
    /// Ordered insights; may be empty.
    pub insights: Vec<Insight>,
    /// Vehicle age in years.
    pub car_age: f64,
    /// Depreciation in percent.
    pub depreciation: f64,
}

impl Estimate {
    /// Text for the "Car Age" field, e.g. "5 years".
    pub fn car_age_text(&self) -> String {
        format!("{} years", self.car_age)
    }

    /// Text for the "Depreciation" field, e.g. "50%".
    pub fn depreciation_text(&self) -> String {
        format!("{}%", self.depreciation)
    }
}

/// Response of the prediction endpoint.
///
/// On the wire this is a flat JSON object whose `success` boolean
/// decides which of the remaining fields are meaningful; see [`WireResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireResult", into = "WireResult")]
pub enum PredictionResult {
    Success(Estimate),
    Failure { error: String },
}

impl PredictionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, PredictionResult::Success(_))
    }

    pub fn estimate(&self) -> Option<&Estimate> {
        match self {
            PredictionResult::Success(estimate) => Some(estimate),
            PredictionResult::Failure { .. } => None,
        }
    }
}

// ── Wire shape ──────────────────────────────────────────────────────

/// Flat JSON shape shared by both outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Vec<Insight>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_age: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depreciation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn required<T>(value: Option<T>, name: &str) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::MalformedResponse(format!("success response without `{name}`")))
}

impl TryFrom<WireResult> for PredictionResult {
    type Error = CoreError;

    fn try_from(wire: WireResult) -> Result<Self, Self::Error> {
        if !wire.success {
            return Ok(PredictionResult::Failure {
                error: wire.error.unwrap_or_else(|| UNSPECIFIED_REJECTION.to_string()),
            });
        }

        Ok(PredictionResult::Success(Estimate {
            price: required(wire.price, "price")?,
            price_value: required(wire.price_value, "price_value")?,
            insights: wire.insights.unwrap_or_default(),
            car_age: required(wire.car_age, "car_age")?,
            depreciation: required(wire.depreciation, "depreciation")?,
        }))
    }
}

impl From<PredictionResult> for WireResult {
    fn from(result: PredictionResult) -> Self {
        match result {
            PredictionResult::Success(e) => WireResult {
                success: true,
                price: Some(e.price),
                price_value: Some(e.price_value),
                insights: Some(e.insights),
                car_age: Some(e.car_age),
                depreciation: Some(e.depreciation),
                error: None,
            },
            PredictionResult::Failure { error } => WireResult {
                success: false,
                price: None,
                price_value: None,
                insights: None,
                car_age: None,
                depreciation: None,
                error: Some(error),
            },
        }
    }
}
