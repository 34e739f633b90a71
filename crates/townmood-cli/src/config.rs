//! Configuration management for the Townmood CLI
//!
//! Secrets live in ~/.config/townmood/config.toml and can be overridden per
//! field through TOWNMOOD_* environment variables. Nothing is hard-coded;
//! missing secrets fail fast at command startup with one combined message.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use townmood::RedditCredentials;

const CONFIG_DIR: &str = "townmood";
const CONFIG_FILE: &str = "config.toml";

/// CLI configuration. Every field is a secret injected from outside.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reddit_client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reddit_client_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reddit_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reddit_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serp_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genai_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_key: Option<String>,
}

/// Everything the mood command needs, validated and owned.
#[derive(Debug)]
pub struct MoodSecrets {
    pub reddit: RedditCredentials,
    pub serp_api_key: String,
    pub genai_api_key: String,
    pub store_url: String,
    pub store_key: String,
}

/// Everything the cache command needs.
pub struct StoreSecrets {
    pub store_url: String,
    pub store_key: String,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file (if present), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            toml::from_str(&content).with_context(|| "Failed to parse config file")?
        } else {
            Self::default()
        };

        Ok(config.overlaid(|name| std::env::var(name).ok()))
    }

    /// Apply per-field overrides from a lookup (the environment in
    /// production). Blank values are ignored.
    fn overlaid<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields: [(&str, &mut Option<String>); 8] = [
            ("TOWNMOOD_REDDIT_CLIENT_ID", &mut self.reddit_client_id),
            ("TOWNMOOD_REDDIT_CLIENT_SECRET", &mut self.reddit_client_secret),
            ("TOWNMOOD_REDDIT_USERNAME", &mut self.reddit_username),
            ("TOWNMOOD_REDDIT_PASSWORD", &mut self.reddit_password),
            ("TOWNMOOD_SERP_API_KEY", &mut self.serp_api_key),
            ("TOWNMOOD_GENAI_API_KEY", &mut self.genai_api_key),
            ("TOWNMOOD_STORE_URL", &mut self.store_url),
            ("TOWNMOOD_STORE_KEY", &mut self.store_key),
        ];

        for (name, slot) in fields {
            if let Some(value) = lookup(name) {
                if !value.trim().is_empty() {
                    *slot = Some(value);
                }
            }
        }

        self
    }

    /// Validate and take everything the mood command needs.
    pub fn mood_secrets(&self) -> Result<MoodSecrets> {
        let mut missing = Vec::new();

        let reddit = RedditCredentials {
            client_id: required(&self.reddit_client_id, "reddit_client_id", &mut missing),
            client_secret: required(
                &self.reddit_client_secret,
                "reddit_client_secret",
                &mut missing,
            ),
            username: required(&self.reddit_username, "reddit_username", &mut missing),
            password: required(&self.reddit_password, "reddit_password", &mut missing),
        };
        let serp_api_key = required(&self.serp_api_key, "serp_api_key", &mut missing);
        let genai_api_key = required(&self.genai_api_key, "genai_api_key", &mut missing);
        let store_url = required(&self.store_url, "store_url", &mut missing);
        let store_key = required(&self.store_key, "store_key", &mut missing);

        fail_on_missing(&missing)?;

        Ok(MoodSecrets {
            reddit,
            serp_api_key,
            genai_api_key,
            store_url,
            store_key,
        })
    }

    /// Validate and take everything the cache command needs.
    pub fn store_secrets(&self) -> Result<StoreSecrets> {
        let mut missing = Vec::new();
        let store_url = required(&self.store_url, "store_url", &mut missing);
        let store_key = required(&self.store_key, "store_key", &mut missing);

        fail_on_missing(&missing)?;

        Ok(StoreSecrets {
            store_url,
            store_key,
        })
    }

    /// Which fields are set, for the config display.
    pub fn field_status(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("reddit_client_id", self.reddit_client_id.is_some()),
            ("reddit_client_secret", self.reddit_client_secret.is_some()),
            ("reddit_username", self.reddit_username.is_some()),
            ("reddit_password", self.reddit_password.is_some()),
            ("serp_api_key", self.serp_api_key.is_some()),
            ("genai_api_key", self.genai_api_key.is_some()),
            ("store_url", self.store_url.is_some()),
            ("store_key", self.store_key.is_some()),
        ]
    }
}

fn required(
    value: &Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.clone(),
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

fn fail_on_missing(missing: &[&str]) -> Result<()> {
    if missing.is_empty() {
        return Ok(());
    }
    bail!(
        "Missing configuration: {}. Set them in {:?} or via the matching TOWNMOOD_* environment variables.",
        missing.join(", "),
        Config::config_path().unwrap_or_default()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_replaces_and_ignores_blank() {
        let config = Config {
            serp_api_key: Some("from-file".to_string()),
            store_url: Some("https://file.example".to_string()),
            ..Config::default()
        };

        let overlaid = config.overlaid(|name| match name {
            "TOWNMOOD_SERP_API_KEY" => Some("from-env".to_string()),
            "TOWNMOOD_STORE_URL" => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(overlaid.serp_api_key.as_deref(), Some("from-env"));
        assert_eq!(overlaid.store_url.as_deref(), Some("https://file.example"));
    }

    #[test]
    fn test_mood_secrets_lists_every_missing_field() {
        let err = Config::default().mood_secrets().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("reddit_client_id"));
        assert!(message.contains("genai_api_key"));
        assert!(message.contains("store_key"));
    }

    #[test]
    fn test_store_secrets_only_need_store_fields() {
        let config = Config {
            store_url: Some("https://store.example".to_string()),
            store_key: Some("key".to_string()),
            ..Config::default()
        };
        assert!(config.store_secrets().is_ok());
        assert!(config.mood_secrets().is_err());
    }
}
