//! Concrete adapters for the hosted services
//!
//! Each adapter owns one `reqwest::Client`, is constructed once per process
//! lifetime, and is passed into the call-flow by reference.

pub mod forum;
pub mod model;
pub mod search;
pub mod store;

use std::time::Duration;

/// Bounded per-call timeout applied to every outgoing request.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub use forum::{RedditCredentials, RedditReader};
pub use model::GeminiProvider;
pub use search::SerpApiSearch;
pub use store::SupabaseStore;
