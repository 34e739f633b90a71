//! Townmood CLI - What is your city feeling right now?
//!
//! Resolves a city to its community board, reads the current front page and
//! asks a hosted model for the overall mood. A second command browses moods
//! already cached in the shared store.

mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Input;
use tracing_subscriber::EnvFilter;

use config::Config;
use townmood::{
    BoardResolver, CachedMoodEntry, ContentFetcher, GeminiProvider, MoodCacheRepository, MoodFlow,
    MoodResult, MoodState, MoodSynthesizer, RedditReader, SerpApiSearch, SupabaseStore,
};

/// Cached entries pulled per browse.
const CACHE_PAGE_SIZE: usize = 100;

const EMPTY_HINT: &str =
    "No community board found for that location - try a larger city or a different spelling.";
const ERROR_MESSAGE: &str = "Could not fetch the town mood right now. Please try again later.";
const EMPTY_CACHE_MESSAGE: &str = "No cached data - no town moods cached yet.";

#[derive(Parser)]
#[command(name = "townmood")]
#[command(about = "Community mood summaries for your city", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the current mood of a city's community board
    Mood {
        /// City name, e.g. "austin" or "round rock texas"
        #[arg(required = true, num_args = 1..)]
        location: Vec<String>,
    },

    /// Browse previously computed moods from the shared cache
    Cache {
        /// Only show boards whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Air quality lookup (placeholder, nothing is processed yet)
    Airquality {
        /// Free-text query (prompted for when omitted)
        query: Option<String>,
    },

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mood { location } => cmd_mood(location.join(" ")).await,
        Commands::Cache { filter } => cmd_cache(filter).await,
        Commands::Airquality { query } => cmd_airquality(query),
        Commands::Config => cmd_config(),
    }
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_mood(location: String) -> Result<()> {
    let config = Config::load()?;
    let secrets = config.mood_secrets()?;

    // Clients are constructed once and shared by reference across the flow.
    let search = Arc::new(SerpApiSearch::new(secrets.serp_api_key));
    let forum = Arc::new(RedditReader::new(secrets.reddit));
    let model = Arc::new(GeminiProvider::new(secrets.genai_api_key));
    let store = Arc::new(SupabaseStore::new(&secrets.store_url, &secrets.store_key));

    let resolver = BoardResolver::new(search, forum.clone(), model.clone(), store);
    let fetcher = ContentFetcher::new(forum);
    let synthesizer = MoodSynthesizer::new(model);
    let mut flow = MoodFlow::new(resolver, fetcher, synthesizer);

    println!("{}", format!("🔎 Reading the mood of {}...", location).dimmed());

    match flow.submit(&location).await {
        MoodState::Success { board, result } => {
            println!();
            println!("{}", format!("r/{}", board).cyan().bold());
            println!("{}", render_mood(result));
        }
        MoodState::Empty => println!("{}", EMPTY_HINT.yellow()),
        MoodState::Error { .. } => println!("{}", ERROR_MESSAGE.red()),
        MoodState::Idle | MoodState::Loading => {
            println!("{}", "Enter a location to check.".dimmed())
        }
    }

    Ok(())
}

async fn cmd_cache(filter: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let secrets = config.store_secrets()?;

    let store = SupabaseStore::new(&secrets.store_url, &secrets.store_key);
    let entries = store
        .recent(CACHE_PAGE_SIZE)
        .await
        .context("Failed to read the mood cache")?;

    print!("{}", render_cache_list(&entries, filter.as_deref()));
    Ok(())
}

fn cmd_airquality(query: Option<String>) -> Result<()> {
    let query = match query {
        Some(q) => q,
        None => Input::new()
            .with_prompt("Search query")
            .interact_text()
            .context("Failed to read input")?,
    };

    tracing::debug!("Air quality query received: {:?}", query);
    println!(
        "{}",
        "Air quality search is not wired up yet - nothing was processed.".dimmed()
    );
    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    for (name, set) in config.field_status() {
        let status = if set {
            "Set".green()
        } else {
            "Not set".red()
        };
        println!("  {}: {}", name, status);
    }

    Ok(())
}

// ============================================
// Rendering
// ============================================

fn render_mood(result: &MoodResult) -> String {
    let topics = result
        .topics
        .iter()
        .map(|topic| format!("- {}", topic))
        .collect::<Vec<_>>()
        .join("\n");

    format!("# Mood: {}\n\n{}", result.mood, topics)
}

/// Render the cache listing: one line per entry plus its detail block.
/// Zero rows get an explicit empty-state message, never a blank screen.
fn render_cache_list(entries: &[CachedMoodEntry], filter: Option<&str>) -> String {
    if entries.is_empty() {
        return format!("{}\n", EMPTY_CACHE_MESSAGE);
    }

    let needle = filter.map(str::to_lowercase);
    let shown: Vec<&CachedMoodEntry> = entries
        .iter()
        .filter(|entry| match &needle {
            Some(n) => entry.board.to_lowercase().contains(n),
            None => true,
        })
        .collect();

    if shown.is_empty() {
        return format!("No cached moods match {:?}.\n", filter.unwrap_or_default());
    }

    let mut out = String::new();
    for entry in shown {
        let headlines = entry.headlines();
        let subtitle = match headlines.first() {
            Some(first) => format!("{} • {}", entry.mood, first),
            None => entry.mood.clone(),
        };
        out.push_str(&format!(
            "{}  {}  ({} headlines)\n",
            format!("r/{}", entry.board).cyan().bold(),
            subtitle,
            headlines.len()
        ));
        out.push_str(&indent(&cache_detail(entry), "    "));
        out.push('\n');
    }
    out
}

/// Detail block for one cached entry, markdown style.
fn cache_detail(entry: &CachedMoodEntry) -> String {
    let headlines = entry.headlines();
    let body = if headlines.is_empty() {
        "*No headlines available*".to_string()
    } else {
        headlines
            .iter()
            .map(|h| format!("• {}", h))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!("# {}\n\n**r/{}**\n\n{}\n", entry.mood, entry.board, body)
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}\n", prefix, line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(board: &str, mood: &str, headlines: [Option<&str>; 3]) -> CachedMoodEntry {
        CachedMoodEntry {
            id: 1,
            board: board.to_string(),
            mood: mood.to_string(),
            headline1: headlines[0].map(String::from),
            headline2: headlines[1].map(String::from),
            headline3: headlines[2].map(String::from),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_cache_renders_explicit_state() {
        let rendered = render_cache_list(&[], None);
        assert!(rendered.contains("No cached data"));
    }

    #[test]
    fn test_cache_list_shows_board_and_headline_count() {
        let entries = vec![entry(
            "austin",
            "😊 happy",
            [Some("SXSW is back"), None, None],
        )];
        let rendered = render_cache_list(&entries, None);
        assert!(rendered.contains("r/austin"));
        assert!(rendered.contains("(1 headlines)"));
        assert!(rendered.contains("SXSW is back"));
    }

    #[test]
    fn test_cache_filter_matches_case_insensitively() {
        let entries = vec![
            entry("austin", "😊 happy", [None, None, None]),
            entry("dallas", "😐 tense", [None, None, None]),
        ];
        let rendered = render_cache_list(&entries, Some("AUS"));
        assert!(rendered.contains("r/austin"));
        assert!(!rendered.contains("r/dallas"));
    }

    #[test]
    fn test_cache_filter_miss_is_not_blank() {
        let entries = vec![entry("austin", "😊 happy", [None, None, None])];
        let rendered = render_cache_list(&entries, Some("zzz"));
        assert!(rendered.contains("No cached moods match"));
    }

    #[test]
    fn test_detail_without_headlines_has_placeholder() {
        let detail = cache_detail(&entry("austin", "😊 happy", [None, None, None]));
        assert!(detail.contains("*No headlines available*"));
        assert!(detail.contains("**r/austin**"));
    }

    #[test]
    fn test_render_mood_lists_three_topics() {
        let result = MoodResult::new(
            "😊 happy",
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
        );
        let rendered = render_mood(&result);
        assert!(rendered.starts_with("# Mood: 😊 happy"));
        assert_eq!(rendered.matches("- ").count(), 3);
    }
}
