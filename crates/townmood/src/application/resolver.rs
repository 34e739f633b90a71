//! Board Resolver
//!
//! Turns a free-text location into a confirmed, accessible board name.
//! Direct search is tried first; when nothing confirms, a single
//! model-assisted fallback rewrites the query (one word, or "place, state"
//! with a nearest-larger-city lookup behind it). The fallback is expressed
//! as a bounded loop with a used flag, so the depth bound is structural.

use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::ports::repositories::GeoRepository;
use crate::ports::services::{ForumReadService, LlmProvider, WebSearchService};

/// Domain the board search is constrained to.
pub const FORUM_DOMAIN: &str = "reddit.com";

/// Radius for the nearest-larger-city lookup.
pub const FALLBACK_RADIUS_METERS: u32 = 100_000;

const BOARD_URL_PREFIXES: [&str; 2] = ["https://www.reddit.com/r/", "https://reddit.com/r/"];

/// Outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Confirmed board name, without the "r/" prefix.
    Board(String),
    /// No board could be confirmed after the bounded fallback.
    NotFound,
}

/// What the model proposed when direct search came up empty.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Suggestion {
    Word(String),
    PlaceState { place: String, state: String },
    Unguessable,
}

/// Resolves free-text locations to confirmed board names.
pub struct BoardResolver {
    search: Arc<dyn WebSearchService>,
    forum: Arc<dyn ForumReadService>,
    model: Arc<dyn LlmProvider>,
    geo: Arc<dyn GeoRepository>,
}

impl BoardResolver {
    pub fn new(
        search: Arc<dyn WebSearchService>,
        forum: Arc<dyn ForumReadService>,
        model: Arc<dyn LlmProvider>,
        geo: Arc<dyn GeoRepository>,
    ) -> Self {
        Self {
            search,
            forum,
            model,
            geo,
        }
    }

    /// Resolve a location query to a board.
    ///
    /// Search and forum failures inside an attempt count as "no result" for
    /// that attempt; model and store failures during the fallback propagate.
    pub async fn resolve(&self, query: &str) -> Result<Resolution, DomainError> {
        let normalized = normalize_location(query);
        if normalized.is_empty() {
            return Ok(Resolution::NotFound);
        }

        let mut attempt_query = normalized.clone();
        let mut fallback_available = true;

        loop {
            if let Some(board) = self.attempt(&attempt_query).await {
                return Ok(Resolution::Board(board));
            }

            if !fallback_available {
                return Ok(Resolution::NotFound);
            }
            fallback_available = false;

            match self.suggest(&normalized).await? {
                Suggestion::Unguessable => return Ok(Resolution::NotFound),
                Suggestion::Word(word) => {
                    tracing::info!("💡 Retrying with suggested query {:?}", word);
                    attempt_query = normalize_location(&word);
                }
                Suggestion::PlaceState { place, state } => {
                    let combined = format!("{}, {}", place, state);
                    tracing::info!("💡 Retrying with suggested place {:?}", combined);
                    if let Some(board) = self.attempt(&combined).await {
                        return Ok(Resolution::Board(board));
                    }
                    match self.nearest_city(&place, &state).await? {
                        Some(city) => {
                            tracing::info!("🗺️ Retrying with nearest larger city {:?}", city);
                            attempt_query = normalize_location(&city);
                        }
                        None => return Ok(Resolution::NotFound),
                    }
                }
            }

            if attempt_query.is_empty() {
                return Ok(Resolution::NotFound);
            }
        }
    }

    /// One search pass: scan ranked hits for a board URL and confirm the
    /// first candidate the forum actually serves.
    async fn attempt(&self, query: &str) -> Option<String> {
        let search_query = format!("{} subreddit site:{}", query, FORUM_DOMAIN);
        let hits = match self.search.search(&search_query).await {
            Ok(hits) => hits,
            Err(err) => {
                tracing::warn!("⚠️ Search failed for {:?}: {}", query, err);
                return None;
            }
        };

        for hit in hits {
            let Some(board) = board_from_url(&hit.url) else {
                continue;
            };
            match self.forum.board_exists(&board).await {
                Ok(true) => {
                    tracing::info!("✅ Confirmed board r/{}", board);
                    return Some(board);
                }
                Ok(false) => continue,
                Err(err) => {
                    tracing::warn!("⚠️ Existence check failed for r/{}: {}", board, err);
                    continue;
                }
            }
        }

        None
    }

    /// Ask the model to rewrite the failed query.
    async fn suggest(&self, query: &str) -> Result<Suggestion, DomainError> {
        let prompt = format!(
            "A user in an app entered this city name as a location within the US, \
             but no major subreddit was found for it. If no state was provided, \
             return ONE single word that could be what the user could have been \
             referring to. If a state is included, return in the format \
             \"place, state\". If it is nonsense, return \"NONE\" - do NOT include \
             any explanations in any of the answers. Just the raw text. \
             This is the input: {}.",
            query
        );

        let reply = self.model.generate(&prompt).await?;
        Ok(parse_suggestion(&reply))
    }

    /// Nearest larger population center for a "place, state" pair.
    async fn nearest_city(&self, place: &str, state: &str) -> Result<Option<String>, DomainError> {
        let lookup = format!("{} {}", place, state);
        let Some(city) = self.geo.find_city(&lookup).await? else {
            return Ok(None);
        };
        self.geo
            .nearest_big_city(city.lat, city.lng, FALLBACK_RADIUS_METERS)
            .await
    }
}

/// Normalize a location query: case-fold and collapse whitespace.
pub fn normalize_location(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract a board name from a search hit URL.
///
/// Accepts only a board root URL (optionally trailing-slashed) with a name
/// of word characters.
pub fn board_from_url(url: &str) -> Option<String> {
    let rest = BOARD_URL_PREFIXES
        .iter()
        .find_map(|prefix| url.strip_prefix(prefix))?;
    let name = rest.strip_suffix('/').unwrap_or(rest);

    if !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Some(name.to_string())
    } else {
        None
    }
}

/// Defensive parse of the model's rewrite reply.
fn parse_suggestion(reply: &str) -> Suggestion {
    let line = reply
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
        .trim_matches(|c| c == '"' || c == '`')
        .trim();

    if line.is_empty() || line.eq_ignore_ascii_case("NONE") {
        return Suggestion::Unguessable;
    }

    if let Some((place, state)) = line.split_once(',') {
        let place = place.trim();
        let state = state.trim();
        if place.is_empty() {
            return Suggestion::Unguessable;
        }
        if state.is_empty() {
            return Suggestion::Word(place.to_string());
        }
        return Suggestion::PlaceState {
            place: place.to_string(),
            state: state.to_string(),
        };
    }

    Suggestion::Word(line.to_string())
}
