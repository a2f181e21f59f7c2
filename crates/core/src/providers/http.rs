use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::request::PredictionRequest;
use crate::models::result::PredictionResult;
use crate::models::server::{
    CompareRequest, CompareResponse, ComparedCar, Comparison, ServerHistoryRecord,
    ServerHistoryResponse,
};
use crate::models::settings::ControllerSettings;
use super::traits::PredictionProvider;

/// Message the service uses when asked to compare fewer than two cars.
pub const COMPARE_MIN_MESSAGE: &str = "Need at least 2 cars to compare";

/// JSON-over-HTTP client for the valuation service.
///
/// - `POST {predict_path}` with the ten form fields as strings.
/// - `GET {history_path}` for the service-side log.
/// - `POST {compare_path}` with `{ "predictions": [...] }`.
///
/// No timeout and no retry: a request is attempted once and awaited until
/// the transport settles. Non-2xx statuses are not errors here, the
/// service reports rejections in the JSON body (`success: false`).
pub struct HttpPredictionProvider {
    client: Client,
    predict_url: String,
    history_url: String,
    compare_url: String,
}

impl HttpPredictionProvider {
    pub fn new(settings: &ControllerSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(client: Client, settings: &ControllerSettings) -> Self {
        Self {
            client,
            predict_url: settings.endpoint(&settings.predict_path),
            history_url: settings.endpoint(&settings.history_path),
            compare_url: settings.endpoint(&settings.compare_path),
        }
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }
}

impl Default for HttpPredictionProvider {
    fn default() -> Self {
        Self::new(&ControllerSettings::default())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PredictionProvider for HttpPredictionProvider {
    fn name(&self) -> &str {
        "CarValue HTTP"
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, CoreError> {
        debug!(url = %self.predict_url, "posting prediction request");

        let result: PredictionResult = self
            .client
            .post(&self.predict_url)
            .json(request)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| {
                CoreError::MalformedResponse(format!("Failed to parse prediction response: {e}"))
            })?;

        Ok(result)
    }

    async fn server_history(&self) -> Result<Vec<ServerHistoryRecord>, CoreError> {
        let resp: ServerHistoryResponse = self
            .client
            .get(&self.history_url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| {
                CoreError::MalformedResponse(format!("Failed to parse history response: {e}"))
            })?;

        if !resp.success {
            return Err(CoreError::Api {
                endpoint: self.history_url.clone(),
                message: "history unavailable".into(),
            });
        }
        Ok(resp.history)
    }

    async fn compare(&self, cars: &[ComparedCar]) -> Result<Comparison, CoreError> {
        if cars.len() < 2 {
            return Err(CoreError::InvalidInput(COMPARE_MIN_MESSAGE.into()));
        }

        let resp: CompareResponse = self
            .client
            .post(&self.compare_url)
            .json(&CompareRequest { predictions: cars })
            .send()
            .await?
            .json()
            .await
            .map_err(|e| {
                CoreError::MalformedResponse(format!("Failed to parse compare response: {e}"))
            })?;

        match (resp.success, resp.comparison) {
            (true, Some(comparison)) => Ok(comparison),
            (true, None) => Err(CoreError::MalformedResponse(
                "success response without `comparison`".into(),
            )),
            (false, _) => Err(CoreError::Api {
                endpoint: self.compare_url.clone(),
                message: resp.error.unwrap_or_else(|| "comparison failed".into()),
            }),
        }
    }
}
