//! Mood Cache Repository Port
//!
//! Read-only access to previously computed moods. The cache table and its
//! write path are owned by the external store.

use async_trait::async_trait;

use crate::domain::{entities::CachedMoodEntry, errors::DomainError};

/// Repository interface for the remote mood cache.
#[async_trait]
pub trait MoodCacheRepository: Send + Sync {
    /// The most recent entries, ordered by creation time descending.
    async fn recent(&self, limit: usize) -> Result<Vec<CachedMoodEntry>, DomainError>;
}
