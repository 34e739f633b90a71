//! Web Search Service Port
//!
//! Abstract interface for the hosted search provider.

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// One ranked search hit.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
}

/// Service interface for web search operations.
///
/// Hits are returned in provider ranking order; callers rely on that order
/// and do no re-ranking of their own.
#[async_trait]
pub trait WebSearchService: Send + Sync {
    /// Search the web for a query.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, DomainError>;
}
