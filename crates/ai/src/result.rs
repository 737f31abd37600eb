use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recommendations returned whenever analysis cannot be produced.
pub const FALLBACK_RECOMMENDATIONS: [&str; 2] = [
    "Ensure your API key is correctly configured.",
    "Manually review items expiring within 90 days.",
];

pub const FALLBACK_POTENTIAL_SAVINGS: &str = "$0.00";

/// Waste risk of the analysed inventory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// Analysis unavailable or the service answered outside the expected set.
    Unknown,
}

impl RiskLevel {
    /// Map the service's free-text value onto the known levels.
    ///
    /// Matching is case-insensitive; anything unrecognised becomes `Unknown`.
    pub fn coerce(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "medium" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            _ => RiskLevel::Unknown,
        }
    }
}

/// Whether a result came from the service or from the fallback path.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisOutcome {
    Generated,
    Fallback,
}

/// Risk summary for a snapshot of local inventory.
///
/// This is an insight for display, never persisted and never fed back into
/// the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub risk_level: RiskLevel,
    /// Display order is meaningful.
    pub recommendations: Vec<String>,
    /// Formatted currency string (e.g. "$1,250.00").
    pub potential_savings: String,
    pub outcome: AnalysisOutcome,
}

impl AnalysisResult {
    pub fn generated(
        risk_level: RiskLevel,
        recommendations: Vec<String>,
        potential_savings: impl Into<String>,
    ) -> Self {
        Self {
            risk_level,
            recommendations,
            potential_savings: potential_savings.into(),
            outcome: AnalysisOutcome::Generated,
        }
    }

    /// The deterministic result used for every failure.
    pub fn fallback() -> Self {
        Self {
            risk_level: RiskLevel::Unknown,
            recommendations: FALLBACK_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
            potential_savings: FALLBACK_POTENTIAL_SAVINGS.to_string(),
            outcome: AnalysisOutcome::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.outcome == AnalysisOutcome::Fallback
    }
}

/// Failures talking to the text-generation service.
///
/// These never reach callers of `EfficiencyAnalyzer::analyze`; they are
/// logged and replaced by [`AnalysisResult::fallback`].
#[derive(Debug, Error)]
pub enum AiError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("service returned an empty response")]
    EmptyResponse,

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("analysis timed out")]
    Timeout,

    #[error("internal error: {0}")]
    Internal(String),
}
