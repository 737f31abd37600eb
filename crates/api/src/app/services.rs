//! Process-wide wiring shared by every handler.

use std::sync::Arc;

use tracing::{info, warn};

use medswap_ai::{
    AnalysisCoordinator, AnalyzerConfig, DisabledGenerator, EfficiencyAnalyzer, GeminiClient,
    TextGenerator,
};
use medswap_core::DomainResult;
use medswap_inventory::InventoryStore;

use crate::config::ApiConfig;

pub struct AppServices {
    pub store: Arc<InventoryStore>,
    pub coordinator: Arc<AnalysisCoordinator>,
    pub expiry_window_days: u32,
}

impl AppServices {
    pub fn new(
        store: Arc<InventoryStore>,
        coordinator: Arc<AnalysisCoordinator>,
        expiry_window_days: u32,
    ) -> Self {
        Self {
            store,
            coordinator,
            expiry_window_days,
        }
    }

    /// Demo catalogue on the system clock, analysed through the configured service.
    pub fn from_config(config: &ApiConfig, analyzer: AnalyzerConfig) -> DomainResult<Self> {
        let store = Arc::new(InventoryStore::demo()?);
        let timeout = analyzer.timeout;
        let analyzer = EfficiencyAnalyzer::new(build_generator(analyzer)).with_timeout(timeout);

        Ok(Self::new(
            store,
            Arc::new(AnalysisCoordinator::new(analyzer)),
            config.expiry_window_days,
        ))
    }
}

/// Without a credential no request is ever attempted.
fn build_generator(config: AnalyzerConfig) -> Arc<dyn TextGenerator> {
    if config.api_key.is_none() {
        return Arc::new(DisabledGenerator);
    }

    let model = config.model.clone();
    match GeminiClient::new(config) {
        Ok(client) => {
            info!(%model, "analysis service configured");
            Arc::new(client)
        }
        Err(e) => {
            warn!(error = %e, "failed to build analysis client; analysis will use the fallback");
            Arc::new(DisabledGenerator)
        }
    }
}
