//! Supabase store adapter
//!
//! Read-only client for the store's REST surface: the mood cache table,
//! the cities table and the nearest-larger-city RPC. This crate never
//! writes to the store.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::REQUEST_TIMEOUT;
use crate::domain::entities::{CachedMoodEntry, City};
use crate::domain::errors::DomainError;
use crate::ports::repositories::{GeoRepository, MoodCacheRepository};

/// Cache table name as provisioned in the store.
const CACHE_TABLE: &str = "townmood cache";
const CITIES_TABLE: &str = "cities";
const NEAREST_CITY_RPC: &str = "get_nearest_big_city";

/// Client for the hosted relational/geo store.
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseStore {
    /// Create a new store client from the project URL and access key.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn rest_url(&self, segment: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url,
            urlencoding::encode(segment)
        )
    }

    async fn get_rows(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Value, DomainError> {
        let response = self
            .client
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|err| DomainError::Store(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Store(format!("{}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|err| DomainError::Store(err.to_string()))
    }
}

#[async_trait]
impl MoodCacheRepository for SupabaseStore {
    async fn recent(&self, limit: usize) -> Result<Vec<CachedMoodEntry>, DomainError> {
        let rows = self
            .get_rows(
                &self.rest_url(CACHE_TABLE),
                &[
                    ("select", "*".to_string()),
                    ("order", "created_at.desc".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        serde_json::from_value(rows).map_err(|err| DomainError::Store(err.to_string()))
    }
}

#[async_trait]
impl GeoRepository for SupabaseStore {
    async fn find_city(&self, place: &str) -> Result<Option<City>, DomainError> {
        let rows = self
            .get_rows(
                &self.rest_url(CITIES_TABLE),
                &[
                    ("select", "place,lat,lng".to_string()),
                    ("place", format!("ilike.*{}*", place)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        let cities: Vec<City> =
            serde_json::from_value(rows).map_err(|err| DomainError::Store(err.to_string()))?;
        Ok(cities.into_iter().next())
    }

    async fn nearest_big_city(
        &self,
        lat: f64,
        lng: f64,
        radius_meters: u32,
    ) -> Result<Option<String>, DomainError> {
        let url = format!("{}/rest/v1/rpc/{}", self.base_url, NEAREST_CITY_RPC);
        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "current_lat": lat,
                "current_lon": lng,
                "radius_meters": radius_meters,
            }))
            .send()
            .await
            .map_err(|err| DomainError::Store(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Store(format!("{}: {}", status, body)));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| DomainError::Store(err.to_string()))?;

        Ok(extract_place(&payload))
    }
}

/// First place name out of an RPC result set, whether the function returns
/// a row set or a single row.
fn extract_place(payload: &Value) -> Option<String> {
    let row = match payload {
        Value::Array(rows) => rows.first()?,
        other => other,
    };

    row.get("place")
        .and_then(|v| v.as_str())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_place_from_row_set() {
        let payload = json!([
            { "place": "Houston", "population": 2300000 },
            { "place": "San Antonio" }
        ]);
        assert_eq!(extract_place(&payload), Some("Houston".to_string()));
    }

    #[test]
    fn test_extract_place_from_single_row() {
        assert_eq!(
            extract_place(&json!({ "place": "Dallas" })),
            Some("Dallas".to_string())
        );
    }

    #[test]
    fn test_extract_place_handles_empty_results() {
        assert_eq!(extract_place(&json!([])), None);
        assert_eq!(extract_place(&json!([{ "place": "" }])), None);
        assert_eq!(extract_place(&json!(null)), None);
    }

    #[test]
    fn test_cache_rows_deserialize() {
        let rows = json!([
            {
                "id": 7,
                "subreddit": "austin",
                "mood": "😊 happy",
                "headline1": "SXSW lineup announced",
                "headline2": null,
                "headline3": null,
                "created_at": "2026-01-15T10:30:00Z"
            }
        ]);

        let entries: Vec<CachedMoodEntry> = serde_json::from_value(rows).unwrap();
        assert_eq!(entries[0].board, "austin");
        assert_eq!(entries[0].headlines(), vec!["SXSW lineup announced"]);
    }
}
