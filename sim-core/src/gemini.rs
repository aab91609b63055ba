//! Gemini analysis client.
//!
//! Sends one `generateContent` request instructing the model to answer
//! with nothing but a JSON object, then isolates and parses that object
//! from the raw response text.

use crate::error::{Result, SimError};
use crate::types::{IncidentReport, SearchHit};
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Default Google AI Studio base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gemma-3-4b-it";

// First `{` to last `}`, newlines included. A heuristic, not a
// balanced-bracket scanner: the prompt demands a single JSON object,
// so everything outside the outermost braces is model chatter.
static JSON_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid literal regex"));

/// Configuration for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key, passed as a query parameter.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Optional custom base URL.
    pub base_url: Option<String>,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), model: DEFAULT_MODEL.to_string(), base_url: None }
    }

    /// Set custom model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set custom base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Get the effective base URL.
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(GEMINI_API_BASE)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Gemini client for structuring search hits into an incident report.
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| SimError::Model(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn api_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.effective_base_url().trim_end_matches('/'),
            self.config.model,
            self.config.api_key,
        )
    }

    /// One structured-generation call; no retry, a malformed response
    /// aborts the run.
    pub async fn analyze(&self, hits: &[SearchHit]) -> Result<IncidentReport> {
        let prompt = build_prompt(hits)?;
        let request = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part { text: prompt }] }],
        };

        let response = self
            .client
            .post(self.api_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| SimError::Model(format!("Gemini request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SimError::Model(format!("Gemini API error ({status}): {error_text}")));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SimError::Model(format!("Failed to parse Gemini response: {e}")))?;

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| SimError::Model("empty model response".to_string()))?;

        let span = extract_json_span(text)?;
        Ok(serde_json::from_str(span)?)
    }
}

/// Build the strict-JSON prompt with the serialized hits embedded.
pub fn build_prompt(hits: &[SearchHit]) -> Result<String> {
    let datos = serde_json::to_string(hits)?;
    Ok(format!(
        "Responde SOLO JSON: {{'resumen_general': '...', 'incidentes_lista': \
         [{{'direccion': '...', 'descripcion': '...', 'gravedad': '...'}}]}} Datos: {datos}"
    ))
}

/// Isolate the first-to-last brace span from raw model text.
pub fn extract_json_span(text: &str) -> Result<&str> {
    JSON_SPAN
        .find(text)
        .map(|m| m.as_str())
        .ok_or(SimError::InvalidModelOutput)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_strips_surrounding_prose() {
        let text = r#"Sure! {"resumen_general":"ok","incidentes_lista":[]} thanks"#;
        let span = extract_json_span(text).unwrap();
        assert_eq!(span, r#"{"resumen_general":"ok","incidentes_lista":[]}"#);
        let report: IncidentReport = serde_json::from_str(span).unwrap();
        assert_eq!(report.summary, "ok");
        assert!(report.incidents.is_empty());
    }

    #[test]
    fn test_span_covers_multiline_objects() {
        let text = "```json\n{\n  \"a\": 1\n}\n```";
        assert_eq!(extract_json_span(text).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_no_braces_is_invalid_model_output() {
        let err = extract_json_span("lo siento, no puedo").unwrap_err();
        assert!(matches!(err, SimError::InvalidModelOutput));
    }

    #[test]
    fn test_prompt_embeds_serialized_hits() {
        let hits = vec![SearchHit { title: "a".into(), excerpt: "b".into() }];
        let prompt = build_prompt(&hits).unwrap();
        assert!(prompt.starts_with("Responde SOLO JSON:"));
        assert!(prompt.ends_with(r#"Datos: [{"t":"a","c":"b"}]"#));
    }

    #[test]
    fn test_api_url_shape() {
        let client =
            GeminiClient::new(GeminiConfig::new("KEY").with_base_url("http://localhost:1")).unwrap();
        assert_eq!(
            client.api_url(),
            "http://localhost:1/v1beta/models/gemma-3-4b-it:generateContent?key=KEY"
        );
    }
}
