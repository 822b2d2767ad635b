//! Supplemental analyzer backed by the Gemini `generateContent` API.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use lekdet_core::analyzer::{build_prompt, parse_response};
use lekdet_core::models::config::AnalyzerConfig;
use lekdet_core::{AnalyzedNumber, AnalyzerError, SupplementalAnalyzer};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<ResponseCandidate>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResponseCandidate {
    content: ResponseContent,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .parts
            .iter()
            .find_map(|p| p.text.as_deref())
    }
}

/// HTTP analyzer; disabled when no API key is available.
pub struct GeminiAnalyzer {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl GeminiAnalyzer {
    pub fn from_config(config: &AnalyzerConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            debug!("{} is not set, analyzer disabled", config.api_key_env);
        }

        Ok(Self {
            client,
            url: format!(
                "{}/models/{}:generateContent",
                config.endpoint.trim_end_matches('/'),
                config.model
            ),
            api_key,
        })
    }
}

impl SupplementalAnalyzer for GeminiAnalyzer {
    fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn analyze(&self, title: &str, body: &str) -> Result<Vec<AnalyzedNumber>, AnalyzerError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AnalyzerError::Unavailable("no API key".to_string()))?;

        let prompt = build_prompt(title, body);
        let request = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: &prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalyzerError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzerError::Request(format!("HTTP {}", status)));
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AnalyzerError::MalformedResponse(e.to_string()))?;

        let text = reply
            .text()
            .ok_or_else(|| AnalyzerError::MalformedResponse("reply has no text".to_string()))?;
        debug!("Analyzer reply: {} bytes", text.len());

        parse_response(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_text() {
        let reply: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "[]"}], "role": "model"}}]}"#,
        )
        .unwrap();
        assert_eq!(reply.text(), Some("[]"));

        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text(), None);
    }

    #[test]
    fn test_disabled_without_key() {
        let config = AnalyzerConfig {
            api_key_env: "LEKDET_TEST_KEY_THAT_IS_NOT_SET".to_string(),
            ..AnalyzerConfig::default()
        };
        let analyzer = GeminiAnalyzer::from_config(&config).unwrap();

        assert!(!analyzer.is_enabled());
        assert!(analyzer.url.ends_with("/models/gemini-1.5-flash:generateContent"));
    }
}
