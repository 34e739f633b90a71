//! Townmood Domain Library
//!
//! Given a city name, finds the city's community discussion board, fetches
//! its recent posts and comments, and asks a hosted language model for the
//! community's current mood and top topics. A second surface browses moods
//! previously cached in the remote store.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure entities and the error taxonomy
//!   - `entities/`: Post, MoodResult, CachedMoodEntry, City
//!   - `errors/`: `DomainError`
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `services/`: web search, forum read, LLM provider
//!   - `repositories/`: mood cache and geo lookups (read-only)
//!
//! - **Services** (`services/`): reqwest adapters for the hosted providers
//!
//! - **Application** (`application/`): resolver, fetcher, synthesizer and
//!   the mood command state machine

pub mod application;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types
pub use application::{
    normalize_location, BoardResolver, ContentFetcher, MoodFlow, MoodState, MoodSynthesizer,
    Resolution,
};
pub use domain::{
    CachedMoodEntry, City, DomainError, MoodResult, Post, MOOD_PLACEHOLDER, TOPIC_PLACEHOLDER,
    TOPIC_SLOTS,
};
pub use ports::{
    ForumReadService, GeoRepository, LlmProvider, MoodCacheRepository, PostListing, SearchHit,
    WebSearchService,
};
pub use services::{GeminiProvider, RedditCredentials, RedditReader, SerpApiSearch, SupabaseStore};
