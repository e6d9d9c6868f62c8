//! Server state management.

use std::sync::Arc;

use precis_core::config::PrecisConfig;
use precis_core::model_cache::ModelCache;

use crate::factory::{create_service, create_service_with_cache};
use crate::service::SummaryService;
use crate::session::SessionStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PrecisConfig>,
    pub service: Arc<SummaryService>,
    pub sessions: SessionStore,
}

impl AppState {
    /// Create application state from configuration.
    pub fn new(config: PrecisConfig) -> Self {
        let service = create_service(&config);
        Self::with_service(config, service)
    }

    /// Create with a pre-built model cache.
    pub fn new_with_cache(config: PrecisConfig, cache: Arc<ModelCache>) -> Self {
        let service = create_service_with_cache(&config, cache);
        Self::with_service(config, service)
    }

    fn with_service(config: PrecisConfig, service: SummaryService) -> Self {
        let sessions =
            SessionStore::new(config.server.max_sessions, config.server.session_ttl());
        Self {
            config: Arc::new(config),
            service: Arc::new(service),
            sessions,
        }
    }

    /// Shared model cache.
    pub fn model_cache(&self) -> &Arc<ModelCache> {
        self.service.abstractive().cache()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PrecisConfig::default())
    }
}
