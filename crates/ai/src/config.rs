use std::time::Duration;

use tracing::warn;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the analysis service client.
#[derive(Clone)]
pub struct AnalyzerConfig {
    /// Credential; `None` routes every analysis through the fallback.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl core::fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AnalyzerConfig {
    /// Read configuration from the process environment.
    ///
    /// - `API_KEY` (or `GEMINI_API_KEY`)
    /// - `MEDSWAP_AI_ENDPOINT`, `MEDSWAP_AI_MODEL`
    /// - `MEDSWAP_AI_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::default();
        config.api_key = non_empty("API_KEY").or_else(|| non_empty("GEMINI_API_KEY"));

        if let Some(endpoint) = non_empty("MEDSWAP_AI_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Some(model) = non_empty("MEDSWAP_AI_MODEL") {
            config.model = model;
        }
        if let Some(raw) = non_empty("MEDSWAP_AI_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(value = %raw, "ignoring invalid MEDSWAP_AI_TIMEOUT_SECS"),
            }
        }

        if config.api_key.is_none() {
            warn!("API_KEY not set; inventory analysis will use the fallback result");
        }

        config
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
