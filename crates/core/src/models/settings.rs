use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::CoreError;

use super::history::DEFAULT_HISTORY_CAPACITY;
use super::report::REPORT_FILENAME;

/// Controller configuration.
///
/// Every field has a default matching the page as deployed; the browser
/// crate only fills in `base_url` from the page origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Origin of the prediction service, e.g. "https://carvalue.ai".
    /// Empty means "same origin", which only works where relative URLs do.
    pub base_url: String,

    pub predict_path: String,
    pub history_path: String,
    pub compare_path: String,

    /// Maximum number of entries kept in `prediction_history`.
    pub history_capacity: usize,

    pub notification_display_ms: u64,
    pub notification_fade_ms: u64,

    pub report_filename: String,

    /// Year used for vehicle age arithmetic in the advice helpers.
    pub reference_year: i32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            predict_path: "/predict".to_string(),
            history_path: "/history".to_string(),
            compare_path: "/compare".to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            notification_display_ms: 3000,
            notification_fade_ms: 300,
            report_filename: REPORT_FILENAME.to_string(),
            reference_year: 2024,
        }
    }
}

impl ControllerSettings {
    /// Default settings pointed at `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.history_capacity == 0 {
            return Err(CoreError::InvalidInput(
                "history_capacity must be at least 1".into(),
            ));
        }
        if !self.base_url.is_empty() {
            reqwest::Url::parse(&self.base_url).map_err(|e| {
                CoreError::InvalidInput(format!("base_url '{}' is not a URL: {e}", self.base_url))
            })?;
        }
        Ok(())
    }

    /// Absolute (or origin-relative, if `base_url` is empty) endpoint URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn notification_display(&self) -> Duration {
        Duration::from_millis(self.notification_display_ms)
    }

    pub fn notification_fade(&self) -> Duration {
        Duration::from_millis(self.notification_fade_ms)
    }
}
