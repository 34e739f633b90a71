//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Search service error: {0}")]
    Search(String),

    #[error("Forum service error: {0}")]
    Forum(String),

    #[error("Model service error: {0}")]
    Model(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Content retrieval failed: {0}")]
    ContentRetrieval(String),
}
