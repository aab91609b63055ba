//! Tavily web-search client.

use crate::error::{Result, SimError};
use crate::types::SearchHit;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

/// Default Tavily API base URL.
pub const TAVILY_API_BASE: &str = "https://api.tavily.com";

/// Results requested per query.
pub const MAX_RESULTS: usize = 5;

/// Each result body is truncated to this many characters before it is
/// embedded into the model prompt.
pub const EXCERPT_CHARS: usize = 300;

/// Configuration for the Tavily API.
#[derive(Debug, Clone)]
pub struct TavilyConfig {
    /// Tavily API key.
    pub api_key: String,
    /// Optional custom base URL.
    pub base_url: Option<String>,
}

impl TavilyConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), base_url: None }
    }

    /// Set custom base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Get the effective base URL.
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(TAVILY_API_BASE)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    title: String,
    #[serde(default)]
    content: String,
}

/// Tavily client for keyword news search.
pub struct TavilyClient {
    client: Client,
    config: TavilyConfig,
}

impl TavilyClient {
    pub fn new(config: TavilyConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| SimError::Search(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn api_url(&self) -> String {
        format!("{}/search", self.config.effective_base_url().trim_end_matches('/'))
    }

    /// One keyword query for today's traffic incidents in `city`.
    pub async fn search(&self, city: &str) -> Result<Vec<SearchHit>> {
        let query = format!("tráfico {city} incidentes hoy");
        tracing::debug!(%query, "tavily search");

        let response = self
            .client
            .post(self.api_url())
            .json(&json!({
                "api_key": self.config.api_key,
                "query": query,
                "max_results": MAX_RESULTS,
            }))
            .send()
            .await
            .map_err(|e| SimError::Search(format!("Tavily request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SimError::Search(format!("Tavily API error ({status}): {error_text}")));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SimError::Search(format!("Failed to parse Tavily response: {e}")))?;

        Ok(parsed
            .results
            .into_iter()
            .map(|r| SearchHit {
                title: r.title,
                excerpt: truncate_chars(&r.content, EXCERPT_CHARS),
            })
            .collect())
    }
}

/// Truncate on a char boundary, never mid-codepoint.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
