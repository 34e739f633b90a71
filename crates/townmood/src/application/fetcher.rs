//! Content Fetcher
//!
//! Retrieves the currently-popular posts of a resolved board with a bounded
//! comment tree per post. One post's comment failure never aborts the batch;
//! a failure of the listing itself does.

use std::sync::Arc;

use crate::domain::entities::Post;
use crate::domain::errors::DomainError;
use crate::ports::services::ForumReadService;

/// How many popular posts one fetch pulls.
pub const POST_PAGE_SIZE: usize = 10;

/// Top-level comments requested per post.
pub const COMMENT_LIMIT: usize = 5;

/// Reply expansion depth per comment tree.
pub const COMMENT_DEPTH: u32 = 1;

/// Fetches board content for synthesis.
pub struct ContentFetcher {
    forum: Arc<dyn ForumReadService>,
}

impl ContentFetcher {
    pub fn new(forum: Arc<dyn ForumReadService>) -> Self {
        Self { forum }
    }

    /// Fetch the popular posts of a board with their retained comments.
    pub async fn fetch(&self, board: &str) -> Result<Vec<Post>, DomainError> {
        let listings = self
            .forum
            .hot_posts(board, POST_PAGE_SIZE)
            .await
            .map_err(|err| DomainError::ContentRetrieval(err.to_string()))?;

        tracing::info!("📰 Fetched {} posts from r/{}", listings.len(), board);

        let mut posts = Vec::with_capacity(listings.len());
        for listing in listings {
            let post = match self
                .forum
                .top_comments(board, &listing.id, COMMENT_LIMIT, COMMENT_DEPTH)
                .await
            {
                Ok(bodies) => Post::new(listing.title, bodies),
                Err(err) => {
                    tracing::warn!(
                        "⚠️ Comment expansion failed for post {} on r/{}: {}",
                        listing.id,
                        board,
                        err
                    );
                    Post::without_comments(listing.title)
                }
            };
            posts.push(post);
        }

        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::services::PostListing;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct FakeForum {
        listings: Result<Vec<PostListing>, DomainError>,
        comments: HashMap<String, Result<Vec<String>, DomainError>>,
    }

    #[async_trait]
    impl ForumReadService for FakeForum {
        async fn board_exists(&self, _board: &str) -> Result<bool, DomainError> {
            Ok(true)
        }

        async fn hot_posts(
            &self,
            _board: &str,
            _limit: usize,
        ) -> Result<Vec<PostListing>, DomainError> {
            self.listings.clone()
        }

        async fn top_comments(
            &self,
            _board: &str,
            post_id: &str,
            _limit: usize,
            _depth: u32,
        ) -> Result<Vec<String>, DomainError> {
            self.comments
                .get(post_id)
                .cloned()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn listing(id: &str, title: &str) -> PostListing {
        PostListing {
            id: id.to_string(),
            title: title.to_string(),
        }
    }

    #[tokio::test]
    async fn test_comment_failure_keeps_post_and_continues() {
        let mut comments = HashMap::new();
        comments.insert(
            "a".to_string(),
            Ok(vec!["fine".to_string(), "  ".to_string()]),
        );
        comments.insert(
            "b".to_string(),
            Err(DomainError::Forum("tree unavailable".to_string())),
        );
        comments.insert("c".to_string(), Ok(vec!["also fine".to_string()]));

        let fetcher = ContentFetcher::new(Arc::new(FakeForum {
            listings: Ok(vec![
                listing("a", "first"),
                listing("b", "second"),
                listing("c", "third"),
            ]),
            comments,
        }));

        let posts = fetcher.fetch("austin").await.unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].comments, vec!["fine"]);
        assert!(posts[1].comments.is_empty());
        assert_eq!(posts[2].comments, vec!["also fine"]);
    }

    #[tokio::test]
    async fn test_listing_failure_propagates() {
        let fetcher = ContentFetcher::new(Arc::new(FakeForum {
            listings: Err(DomainError::Forum("listing down".to_string())),
            comments: HashMap::new(),
        }));

        let err = fetcher.fetch("austin").await.unwrap_err();
        assert!(matches!(err, DomainError::ContentRetrieval(_)));
    }
}
