//! MoodResult - The synthesized mood of a community board

use serde::{Deserialize, Serialize};

/// Number of topic slots a mood result always carries.
pub const TOPIC_SLOTS: usize = 3;

/// Placeholder mood when the model produced no usable first line.
pub const MOOD_PLACEHOLDER: &str = "🤷 unknown";

/// Placeholder filling topic slots the model left empty.
pub const TOPIC_PLACEHOLDER: &str = "No headline reported";

/// One mood label (by convention a leading emoji plus one word) and exactly
/// three topic lines. Produced once per resolution, never merged with prior
/// results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodResult {
    pub mood: String,
    pub topics: Vec<String>,
}

impl MoodResult {
    /// Build a result, padding or truncating topics to exactly
    /// [`TOPIC_SLOTS`] entries.
    pub fn new(mood: impl Into<String>, topics: Vec<String>) -> Self {
        let mood = mood.into();
        let mood = if mood.trim().is_empty() {
            MOOD_PLACEHOLDER.to_string()
        } else {
            mood
        };

        let mut topics: Vec<String> = topics.into_iter().take(TOPIC_SLOTS).collect();
        while topics.len() < TOPIC_SLOTS {
            topics.push(TOPIC_PLACEHOLDER.to_string());
        }

        Self { mood, topics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_missing_topics() {
        let result = MoodResult::new("😊 happy", vec!["Topic A".to_string()]);
        assert_eq!(result.topics.len(), TOPIC_SLOTS);
        assert_eq!(result.topics[0], "Topic A");
        assert_eq!(result.topics[1], TOPIC_PLACEHOLDER);
        assert_eq!(result.topics[2], TOPIC_PLACEHOLDER);
    }

    #[test]
    fn test_blank_mood_falls_back_to_placeholder() {
        let result = MoodResult::new("  ", vec![]);
        assert_eq!(result.mood, MOOD_PLACEHOLDER);
    }

    #[test]
    fn test_extra_topics_are_truncated() {
        let topics: Vec<String> = (0..5).map(|i| format!("t{i}")).collect();
        let result = MoodResult::new("🙂 calm", topics);
        assert_eq!(result.topics, vec!["t0", "t1", "t2"]);
    }
}
