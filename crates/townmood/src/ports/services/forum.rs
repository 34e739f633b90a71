//! Forum Read Service Port
//!
//! Abstract read-only interface to the hosted forum. Boards are named
//! community spaces ("r/<name>"); this port never writes anything.

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// A post as it appears in a board listing, before comment expansion.
#[derive(Debug, Clone)]
pub struct PostListing {
    /// Forum-assigned post id, used to request the comment tree.
    pub id: String,
    pub title: String,
}

/// Read-only forum operations.
#[async_trait]
pub trait ForumReadService: Send + Sync {
    /// Whether the named board exists and is accessible to this client.
    async fn board_exists(&self, board: &str) -> Result<bool, DomainError>;

    /// The currently-popular posts of a board, up to `limit`.
    async fn hot_posts(&self, board: &str, limit: usize) -> Result<Vec<PostListing>, DomainError>;

    /// Top-level comment bodies for one post, up to `limit`, with reply
    /// expansion bounded by `depth`.
    async fn top_comments(
        &self,
        board: &str,
        post_id: &str,
        limit: usize,
        depth: u32,
    ) -> Result<Vec<String>, DomainError>;
}
