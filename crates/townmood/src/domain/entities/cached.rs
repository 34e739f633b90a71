//! CachedMoodEntry - Read-only projection of the remote mood cache
//!
//! The cache table is owned entirely by the external store; this crate never
//! writes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One previously computed mood, as stored remotely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedMoodEntry {
    pub id: i64,
    /// Board name without the "r/" prefix.
    #[serde(rename = "subreddit")]
    pub board: String,
    pub mood: String,
    pub headline1: Option<String>,
    pub headline2: Option<String>,
    pub headline3: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CachedMoodEntry {
    /// The non-empty headlines, in slot order.
    pub fn headlines(&self) -> Vec<&str> {
        [&self.headline1, &self.headline2, &self.headline3]
            .into_iter()
            .filter_map(|slot| slot.as_deref())
            .filter(|h| !h.trim().is_empty())
            .collect()
    }
}

/// Read-only projection of the store's cities table, used by the
/// nearest-larger-city fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub place: String,
    pub lat: f64,
    pub lng: f64,
}
