use async_trait::async_trait;

use crate::prompt::GenerationRequest;
use crate::result::AiError;

/// External text-generation service.
///
/// Implementations perform exactly one request-response exchange per call
/// and return the raw response text; validation happens in the analyzer.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError>;
}

/// Generator used when no credential is configured: every call fails, so
/// every analysis takes the fallback path without touching the network.
#[derive(Debug, Default, Copy, Clone)]
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, AiError> {
        Err(AiError::MissingApiKey)
    }
}
