use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::request::PredictionRequest;
use crate::models::result::PredictionResult;
use crate::models::server::{ComparedCar, Comparison, ServerHistoryRecord};

/// Trait abstraction over the remote valuation service.
///
/// The controller only ever talks to this trait, so tests substitute a
/// scripted fake and the browser build plugs in the HTTP client.
///
/// A returned `Ok(PredictionResult::Failure { .. })` is the service
/// declining the request; `Err(_)` means the call itself failed
/// (network, unreadable body).
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PredictionProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Request a valuation for the given form payload.
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, CoreError>;

    /// The service's own log of recent predictions.
    async fn server_history(&self) -> Result<Vec<ServerHistoryRecord>, CoreError>;

    /// Ask the service to compare two or more estimates.
    async fn compare(&self, cars: &[ComparedCar]) -> Result<Comparison, CoreError>;
}
