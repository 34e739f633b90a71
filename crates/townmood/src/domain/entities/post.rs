//! Post - A single discussion thread with its retained comments
//!
//! Pure domain entity without infrastructure dependencies.

use serde::{Deserialize, Serialize};

/// A fetched post: title plus the comment bodies kept for synthesis.
///
/// Comments are in fetch order and already filtered of empty bodies.
/// Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub comments: Vec<String>,
}

impl Post {
    /// Create a post, dropping empty/whitespace comment bodies.
    pub fn new(title: impl Into<String>, comments: Vec<String>) -> Self {
        Self {
            title: title.into(),
            comments: comments
                .into_iter()
                .filter(|body| !body.trim().is_empty())
                .collect(),
        }
    }

    /// A post whose comment expansion failed or returned nothing.
    pub fn without_comments(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            comments: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_drops_blank_comments() {
        let post = Post::new(
            "Road closures downtown",
            vec![
                "first".to_string(),
                "   ".to_string(),
                String::new(),
                "second".to_string(),
            ],
        );
        assert_eq!(post.comments, vec!["first", "second"]);
    }
}
