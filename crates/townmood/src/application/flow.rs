//! Mood command flow
//!
//! Drives one location input through resolve → fetch → synthesize and holds
//! the presentation state: `Idle → Loading → {Success, Empty, Error}`. The
//! pipeline runs exactly once per distinct normalized location; re-submitting
//! the same input returns the settled state untouched.

use crate::application::fetcher::ContentFetcher;
use crate::application::resolver::{normalize_location, BoardResolver, Resolution};
use crate::application::synthesizer::MoodSynthesizer;
use crate::domain::entities::MoodResult;
use crate::domain::errors::DomainError;

/// Presentation state of the mood command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoodState {
    Idle,
    Loading,
    Success { board: String, result: MoodResult },
    Empty,
    Error { message: String },
}

/// One mood invocation: pipeline plus its settled state.
pub struct MoodFlow {
    resolver: BoardResolver,
    fetcher: ContentFetcher,
    synthesizer: MoodSynthesizer,
    state: MoodState,
    settled_input: Option<String>,
}

impl MoodFlow {
    pub fn new(
        resolver: BoardResolver,
        fetcher: ContentFetcher,
        synthesizer: MoodSynthesizer,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            synthesizer,
            state: MoodState::Idle,
            settled_input: None,
        }
    }

    pub fn state(&self) -> &MoodState {
        &self.state
    }

    /// Submit a location. An empty input leaves the flow idle; an input the
    /// flow already settled is not re-run.
    pub async fn submit(&mut self, location: &str) -> &MoodState {
        let normalized = normalize_location(location);
        if normalized.is_empty() {
            return &self.state;
        }

        if self.settled_input.as_deref() == Some(normalized.as_str()) {
            return &self.state;
        }

        self.state = MoodState::Loading;
        self.state = match self.run(&normalized).await {
            Ok(Some((board, result))) => MoodState::Success { board, result },
            Ok(None) => MoodState::Empty,
            Err(err) => {
                tracing::error!("❌ Mood pipeline failed: {}", err);
                MoodState::Error {
                    message: err.to_string(),
                }
            }
        };
        self.settled_input = Some(normalized);

        &self.state
    }

    async fn run(&self, location: &str) -> Result<Option<(String, MoodResult)>, DomainError> {
        let board = match self.resolver.resolve(location).await? {
            Resolution::Board(board) => board,
            Resolution::NotFound => return Ok(None),
        };

        let posts = self.fetcher.fetch(&board).await?;
        let result = self.synthesizer.synthesize(&board, &posts).await?;
        Ok(Some((board, result)))
    }
}
