//! Mood Synthesizer
//!
//! Builds one prompt from the fetched posts, asks the model for a fixed
//! four-line reply, and parses that reply defensively. The model's free-text
//! output is untrusted; short or malformed replies degrade to placeholders
//! instead of failing.

use std::sync::Arc;

use crate::domain::entities::{MoodResult, Post, MOOD_PLACEHOLDER, TOPIC_SLOTS};
use crate::domain::errors::DomainError;
use crate::ports::services::LlmProvider;

/// Synthesizes a community mood from fetched posts.
pub struct MoodSynthesizer {
    model: Arc<dyn LlmProvider>,
}

impl MoodSynthesizer {
    pub fn new(model: Arc<dyn LlmProvider>) -> Self {
        Self { model }
    }

    /// Ask the model for the board's mood and top topics.
    pub async fn synthesize(&self, board: &str, posts: &[Post]) -> Result<MoodResult, DomainError> {
        let prompt = build_prompt(board, posts);
        let reply = self.model.generate(&prompt).await?;
        tracing::debug!("🧠 Model replied with {} bytes", reply.len());
        Ok(parse_reply(&reply))
    }
}

/// One prompt embedding every post title and its retained comments, plus the
/// fixed four-line output instruction.
fn build_prompt(board: &str, posts: &[Post]) -> String {
    let mut content = String::new();
    for post in posts {
        content.push_str(&format!("# {}\n", post.title));
        for comment in &post.comments {
            content.push_str(&format!("- {}\n", comment));
        }
        content.push('\n');
    }

    format!(
        "Your task is to evaluate the following reddit comments. Categorize them \
         into at most three topics from a city's subreddit, and come up with a \
         final \"mood\" of the city. In this case, the subreddit is r/{board}. \
         Please output four bullet points. The first one will consist of ONLY one \
         word describing the overall mood, with an appropriate emoji before the \
         word. The next three bullet points should describe the top headlines. \
         Do not include extra descriptive text like \"Mood: Happy\" or \
         \"Headlines,\" only the raw answers are required.\n\n{content}"
    )
}

/// Parse the model reply into a mood plus exactly three topics.
///
/// Lines are trimmed, leading bullet markers stripped, blanks dropped.
/// Missing lines are padded rather than indexed.
fn parse_reply(reply: &str) -> MoodResult {
    let lines: Vec<&str> = reply
        .lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(['-', '•', '*'])
                .trim()
        })
        .filter(|line| !line.is_empty())
        .collect();

    let mood = lines.first().copied().unwrap_or(MOOD_PLACEHOLDER);
    let topics = lines
        .iter()
        .skip(1)
        .take(TOPIC_SLOTS)
        .map(|line| line.to_string())
        .collect();

    MoodResult::new(mood, topics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TOPIC_PLACEHOLDER;

    #[test]
    fn test_parse_well_formed_reply() {
        let result = parse_reply("😊 happy\nTopic A\nTopic B\nTopic C");
        assert_eq!(result.mood, "😊 happy");
        assert_eq!(result.topics, vec!["Topic A", "Topic B", "Topic C"]);
    }

    #[test]
    fn test_parse_strips_bullet_markers() {
        let result = parse_reply("- 😊 happy\n• Topic A\n- Topic B\n- Topic C");
        assert_eq!(result.mood, "😊 happy");
        assert_eq!(result.topics, vec!["Topic A", "Topic B", "Topic C"]);
    }

    #[test]
    fn test_parse_short_reply_pads_topics() {
        let result = parse_reply("😟 worried\nOnly topic");
        assert_eq!(result.mood, "😟 worried");
        assert_eq!(result.topics.len(), 3);
        assert_eq!(result.topics[0], "Only topic");
        assert_eq!(result.topics[1], TOPIC_PLACEHOLDER);
        assert_eq!(result.topics[2], TOPIC_PLACEHOLDER);
    }

    #[test]
    fn test_parse_empty_reply_is_all_placeholders() {
        let result = parse_reply("\n\n  \n");
        assert_eq!(result.mood, MOOD_PLACEHOLDER);
        assert!(result.topics.iter().all(|t| t == TOPIC_PLACEHOLDER));
    }

    #[test]
    fn test_parse_ignores_blank_interior_lines() {
        let result = parse_reply("😊 happy\n\nTopic A\n\nTopic B\n\nTopic C\n\nextra");
        assert_eq!(result.topics, vec!["Topic A", "Topic B", "Topic C"]);
    }

    #[test]
    fn test_prompt_embeds_titles_and_comments() {
        let posts = vec![
            Post::new("Road closures", vec!["ugh".to_string()]),
            Post::without_comments("New park opening"),
        ];
        let prompt = build_prompt("austin", &posts);
        assert!(prompt.contains("r/austin"));
        assert!(prompt.contains("# Road closures"));
        assert!(prompt.contains("- ugh"));
        assert!(prompt.contains("# New park opening"));
    }
}
