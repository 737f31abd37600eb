use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use medswap_inventory::InventoryItem;

use crate::config::DEFAULT_TIMEOUT;
use crate::generator::TextGenerator;
use crate::prompt::{GenerationRequest, parse_response};
use crate::result::{AiError, AnalysisResult};

/// Efficiency Analyzer: inventory snapshot in, risk summary out.
///
/// `analyze` always produces a result. Each call is a single attempt;
/// any failure (credential, transport, status, shape, timeout) yields
/// [`AnalysisResult::fallback`].
#[derive(Clone)]
pub struct EfficiencyAnalyzer {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl EfficiencyAnalyzer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn analyze(&self, items: &[InventoryItem]) -> AnalysisResult {
        match self.try_analyze(items).await {
            Ok(result) => {
                info!(
                    items = items.len(),
                    risk = ?result.risk_level,
                    recommendations = result.recommendations.len(),
                    "inventory analysis complete"
                );
                result
            }
            Err(e) => {
                warn!(items = items.len(), error = %e, "AI analysis failed; using fallback result");
                AnalysisResult::fallback()
            }
        }
    }

    /// The fallible core of [`analyze`](Self::analyze).
    pub async fn try_analyze(&self, items: &[InventoryItem]) -> Result<AnalysisResult, AiError> {
        let request = GenerationRequest::for_items(items)?;
        let text = tokio::time::timeout(self.timeout, self.generator.generate(&request))
            .await
            .map_err(|_| AiError::Timeout)??;
        parse_response(&text)
    }
}
