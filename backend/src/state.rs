//! Application state management
//!
//! Shared state passed to all request handlers via Axum's state extraction.
//! Everything here is built once at startup and cheap to clone.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::WellnessStore;
use crate::services::{FitnessProvider, WellnessService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// Wellness document workflow
    pub wellness: WellnessService,
    /// Prometheus exporter, absent when no recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state
    ///
    /// The store and fitness provider are injected so tests can swap in
    /// in-memory versions.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn WellnessStore>,
        fitness: Option<Arc<dyn FitnessProvider>>,
    ) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry_secs);
        let wellness = WellnessService::new(store, fitness, config.wellness.targets);

        Self {
            config: Arc::new(config),
            jwt,
            wellness,
            metrics: None,
        }
    }

    /// Attach the Prometheus handle served at `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn wellness(&self) -> &WellnessService {
        &self.wellness
    }
}
