//! Generative Language API client (`models/{model}:generateContent`).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::generator::TextGenerator;
use crate::prompt::GenerationRequest;
use crate::result::AiError;

const MAX_ERROR_BODY: usize = 512;

/// HTTP client for schema-constrained generation.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: AnalyzerConfig,
}

impl GeminiClient {
    pub fn new(config: AnalyzerConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(AiError::MissingApiKey)?;

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }]
            }],
            "generationConfig": {
                "responseMimeType": request.response_mime_type,
                "responseSchema": request.response_schema
            }
        });

        debug!(model = %self.config.model, "sending generateContent request");

        let resp = self
            .http
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout
                } else {
                    AiError::Transport(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let mut body = resp.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(AiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| AiError::MalformedResponse(e.to_string()))?;

        payload.text().ok_or(AiError::EmptyResponse)
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated. `None` when blank.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn extracts_first_candidate_text() {
        let resp = parse(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }));
        assert_eq!(resp.text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn blank_or_missing_text_is_none() {
        assert_eq!(parse(json!({})).text(), None);
        assert_eq!(parse(json!({ "candidates": [] })).text(), None);
        assert_eq!(parse(json!({ "candidates": [{ "finishReason": "SAFETY" }] })).text(), None);
        assert_eq!(
            parse(json!({ "candidates": [{ "content": { "parts": [{ "text": "  " }] } }] })).text(),
            None
        );
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        let client = GeminiClient::new(
            AnalyzerConfig::default()
                .with_endpoint("http://localhost:1234/v1beta/")
                .with_model("m"),
        )
        .unwrap();
        assert_eq!(client.url(), "http://localhost:1234/v1beta/models/m:generateContent");
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        // Unroutable endpoint: reaching the network would surface a transport error instead.
        let client = GeminiClient::new(AnalyzerConfig::default().with_endpoint("http://127.0.0.1:9"))
            .unwrap();
        let request = GenerationRequest::for_items(&[]).unwrap();
        let err = client.generate(&request).await.unwrap_err();
        assert!(matches!(err, AiError::MissingApiKey));
    }
}
