//! SerpApi search adapter
//!
//! Thin client over the hosted Google-search API. Only the organic results
//! are consumed, in provider ranking order.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::REQUEST_TIMEOUT;
use crate::domain::errors::DomainError;
use crate::ports::services::{SearchHit, WebSearchService};

const BASE_URL: &str = "https://serpapi.com/search.json";
const DEFAULT_ENGINE: &str = "google";

/// Client for the SerpApi search service.
#[derive(Clone)]
pub struct SerpApiSearch {
    client: Client,
    api_key: String,
    engine: String,
}

impl SerpApiSearch {
    /// Creates a new client using the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            engine: DEFAULT_ENGINE.to_string(),
        }
    }

    /// Overrides the search engine if needed.
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }
}

#[async_trait]
impl WebSearchService for SerpApiSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, DomainError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation(
                "Search query cannot be empty".to_string(),
            ));
        }

        let response = self
            .client
            .get(BASE_URL)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("engine", self.engine.as_str()),
                ("q", trimmed),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|err| DomainError::Search(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Search(format!("{}: {}", status, body)));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| DomainError::Search(err.to_string()))?;

        Ok(extract_hits(&payload))
    }
}

/// Pull ranked organic results out of a SerpApi payload.
fn extract_hits(root: &Value) -> Vec<SearchHit> {
    let results = match root.get("organic_results").and_then(|r| r.as_array()) {
        Some(list) => list,
        None => return Vec::new(),
    };

    results
        .iter()
        .filter_map(|item| {
            let url = item.get("link").and_then(|v| v.as_str())?;
            let title = item
                .get("title")
                .and_then(|v| v.as_str())
                .unwrap_or(url)
                .to_string();
            Some(SearchHit {
                title,
                url: url.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_hits_preserves_provider_order() {
        let payload = json!({
            "organic_results": [
                { "title": "r/austin", "link": "https://www.reddit.com/r/Austin/" },
                { "title": "Austin guide", "link": "https://example.com/austin" }
            ]
        });

        let hits = extract_hits(&payload);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://www.reddit.com/r/Austin/");
        assert_eq!(hits[1].url, "https://example.com/austin");
    }

    #[test]
    fn test_extract_hits_handles_missing_results() {
        assert!(extract_hits(&json!({})).is_empty());
        assert!(extract_hits(&json!({ "organic_results": [] })).is_empty());
    }

    #[test]
    fn test_extract_hits_skips_entries_without_link() {
        let payload = json!({
            "organic_results": [
                { "title": "no link here" },
                { "link": "https://example.com" }
            ]
        });

        let hits = extract_hits(&payload);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "https://example.com");
    }
}
