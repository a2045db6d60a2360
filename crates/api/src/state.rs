use std::sync::Arc;

use turbine_core::error::PredictionError;
use turbine_core::model::ModelHandle;

use crate::config::ServerConfig;
use crate::stats::UsageStats;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (bearer tokens, timeouts, CORS).
    pub config: Arc<ServerConfig>,
    /// The loaded classifier, or `None` when the service runs degraded.
    pub model: Option<ModelHandle>,
    /// Usage counters since process start.
    pub stats: Arc<UsageStats>,
}

impl AppState {
    pub fn new(config: ServerConfig, model: Option<ModelHandle>) -> Self {
        Self {
            config: Arc::new(config),
            model,
            stats: Arc::new(UsageStats::new()),
        }
    }

    /// The loaded model, or [`PredictionError::ModelUnavailable`].
    pub fn require_model(&self) -> Result<&ModelHandle, PredictionError> {
        self.model.as_ref().ok_or(PredictionError::ModelUnavailable)
    }
}
