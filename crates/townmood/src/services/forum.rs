//! Reddit read adapter
//!
//! Read-only client for the Reddit OAuth API: board existence checks, hot
//! listings and bounded comment trees. Tokens come from the password grant
//! and are cached until shortly before expiry.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;

use super::REQUEST_TIMEOUT;
use crate::domain::errors::DomainError;
use crate::ports::services::{ForumReadService, PostListing};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";
const USER_AGENT: &str = concat!("townmood/", env!("CARGO_PKG_VERSION"));

/// Leeway subtracted from the token lifetime so a token is never used
/// right at its expiry boundary.
const TOKEN_EXPIRY_LEEWAY_SECS: i64 = 60;

/// Script-app credentials for the password grant.
#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        Utc::now() + Duration::seconds(TOKEN_EXPIRY_LEEWAY_SECS) >= self.expires_at
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Read-only Reddit client.
pub struct RedditReader {
    client: Client,
    credentials: RedditCredentials,
    token: Mutex<Option<CachedToken>>,
}

impl RedditReader {
    /// Creates a new reader using the provided script-app credentials.
    pub fn new(credentials: RedditCredentials) -> Self {
        Self {
            client: Client::new(),
            credentials,
            token: Mutex::new(None),
        }
    }

    /// Returns a valid bearer token, fetching a fresh one when the cached
    /// token is missing or about to expire.
    async fn ensure_token(&self) -> Result<String, DomainError> {
        let mut guard = self.token.lock().await;

        if let Some(token) = guard.as_ref() {
            if !token.is_expired() {
                return Ok(token.value.clone());
            }
        }

        let response = self
            .client
            .post(TOKEN_URL)
            .timeout(REQUEST_TIMEOUT)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .form(&[
                ("grant_type", "password"),
                ("username", self.credentials.username.as_str()),
                ("password", self.credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|err| DomainError::Forum(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Forum(format!(
                "Token request failed ({}): {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| DomainError::Forum(err.to_string()))?;

        let cached = CachedToken {
            value: token.access_token,
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
        };
        let value = cached.value.clone();
        *guard = Some(cached);

        tracing::debug!("🔑 Forum token refreshed");
        Ok(value)
    }

    async fn api_get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response, DomainError> {
        let token = self.ensure_token().await?;
        self.client
            .get(format!("{}{}", API_BASE, path))
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(query)
            .send()
            .await
            .map_err(|err| DomainError::Forum(err.to_string()))
    }
}

fn check_board_name(board: &str) -> Result<(), DomainError> {
    if !board.is_empty()
        && board
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "Invalid board name: {:?}",
            board
        )))
    }
}

#[async_trait]
impl ForumReadService for RedditReader {
    async fn board_exists(&self, board: &str) -> Result<bool, DomainError> {
        check_board_name(board)?;

        let response = self
            .api_get(&format!("/r/{}/about", board), &[("raw_json", "1".into())])
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => return Ok(false),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(DomainError::Forum(format!("{}: {}", status, body)));
            }
            _ => {}
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| DomainError::Forum(err.to_string()))?;

        // A nonexistent board redirects to a search listing; a real one
        // answers with a t5 thing.
        Ok(payload.get("kind").and_then(|k| k.as_str()) == Some("t5"))
    }

    async fn hot_posts(&self, board: &str, limit: usize) -> Result<Vec<PostListing>, DomainError> {
        check_board_name(board)?;

        let response = self
            .api_get(
                &format!("/r/{}/hot", board),
                &[("limit", limit.to_string()), ("raw_json", "1".into())],
            )
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Forum(format!("{}: {}", status, body)));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| DomainError::Forum(err.to_string()))?;

        Ok(extract_listing(&payload))
    }

    async fn top_comments(
        &self,
        board: &str,
        post_id: &str,
        limit: usize,
        depth: u32,
    ) -> Result<Vec<String>, DomainError> {
        check_board_name(board)?;

        let response = self
            .api_get(
                &format!("/r/{}/comments/{}", board, post_id),
                &[
                    ("limit", limit.to_string()),
                    ("depth", depth.to_string()),
                    ("raw_json", "1".into()),
                ],
            )
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Forum(format!("{}: {}", status, body)));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| DomainError::Forum(err.to_string()))?;

        Ok(extract_comment_bodies(&payload, limit))
    }
}

// ============================================
// Listing extraction helpers
// ============================================

/// Pull post ids and titles out of a hot listing payload.
fn extract_listing(root: &Value) -> Vec<PostListing> {
    let children = match root
        .get("data")
        .and_then(|data| data.get("children"))
        .and_then(|children| children.as_array())
    {
        Some(list) => list,
        None => return Vec::new(),
    };

    children
        .iter()
        .filter_map(|child| {
            let data = child.get("data")?;
            let id = data.get("id").and_then(|v| v.as_str())?;
            let title = data.get("title").and_then(|v| v.as_str())?;
            Some(PostListing {
                id: id.to_string(),
                title: title.to_string(),
            })
        })
        .collect()
}

/// Pull top-level comment bodies out of a comment-tree payload.
///
/// The payload is a two-element array: the post itself, then the comment
/// listing. Non-comment children ("more" stubs) and blank bodies are
/// skipped.
fn extract_comment_bodies(root: &Value, limit: usize) -> Vec<String> {
    let children = match root
        .get(1)
        .and_then(|listing| listing.get("data"))
        .and_then(|data| data.get("children"))
        .and_then(|children| children.as_array())
    {
        Some(list) => list,
        None => return Vec::new(),
    };

    children
        .iter()
        .filter(|child| child.get("kind").and_then(|k| k.as_str()) == Some("t1"))
        .filter_map(|child| {
            child
                .get("data")
                .and_then(|data| data.get("body"))
                .and_then(|body| body.as_str())
        })
        .map(str::trim)
        .filter(|body| !body.is_empty())
        .take(limit)
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_listing() {
        let payload = json!({
            "kind": "Listing",
            "data": {
                "children": [
                    { "kind": "t3", "data": { "id": "abc123", "title": "First post" } },
                    { "kind": "t3", "data": { "id": "def456", "title": "Second post" } }
                ]
            }
        });

        let posts = extract_listing(&payload);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "abc123");
        assert_eq!(posts[1].title, "Second post");
    }

    #[test]
    fn test_extract_listing_tolerates_malformed_payload() {
        assert!(extract_listing(&json!({})).is_empty());
        assert!(extract_listing(&json!({ "data": {} })).is_empty());
    }

    #[test]
    fn test_extract_comment_bodies_skips_stubs_and_blanks() {
        let payload = json!([
            { "kind": "Listing", "data": { "children": [] } },
            {
                "kind": "Listing",
                "data": {
                    "children": [
                        { "kind": "t1", "data": { "body": "real comment" } },
                        { "kind": "t1", "data": { "body": "   " } },
                        { "kind": "more", "data": { "count": 12 } },
                        { "kind": "t1", "data": { "body": "another one" } }
                    ]
                }
            }
        ]);

        let bodies = extract_comment_bodies(&payload, 5);
        assert_eq!(bodies, vec!["real comment", "another one"]);
    }

    #[test]
    fn test_extract_comment_bodies_respects_limit() {
        let children: Vec<Value> = (0..10)
            .map(|i| json!({ "kind": "t1", "data": { "body": format!("c{i}") } }))
            .collect();
        let payload = json!([
            {},
            { "data": { "children": children } }
        ]);

        assert_eq!(extract_comment_bodies(&payload, 3).len(), 3);
    }

    #[test]
    fn test_check_board_name() {
        assert!(check_board_name("Austin_TX1").is_ok());
        assert!(check_board_name("").is_err());
        assert!(check_board_name("bad/name").is_err());
        assert!(check_board_name("spaced name").is_err());
    }

    #[test]
    fn test_cached_token_expiry() {
        let fresh = CachedToken {
            value: "tok".to_string(),
            expires_at: Utc::now() + Duration::seconds(3600),
        };
        assert!(!fresh.is_expired());

        let stale = CachedToken {
            value: "tok".to_string(),
            expires_at: Utc::now() + Duration::seconds(30),
        };
        assert!(stale.is_expired());
    }
}
