//! LLM Provider Port
//!
//! Abstract interface for language-model invocations. Implementations can be
//! swapped between hosted providers without touching the call-flow.

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Language-model completion interface.
///
/// The output is free text and must never be trusted to match any requested
/// shape; callers apply their own defensive parsing.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for a single prompt.
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;

    /// The model ID being used (e.g. "gemma-3-27b-it").
    fn model_id(&self) -> &str;
}
