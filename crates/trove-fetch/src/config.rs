//! Configuration for the content fetcher

use serde::{Deserialize, Serialize};
use std::time::Duration;
use trove_domain::MIN_CONTENT_CHARS;

/// How article text is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// Download the page and extract text from its HTML
    #[default]
    Direct,
    /// Ask a reader service that returns plain text for `<endpoint>/<url>`
    Reader,
}

/// Configuration for the fetcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Direct HTML extraction or reader endpoint
    pub mode: FetchMode,

    /// Base URL of the reader service
    pub reader_endpoint: String,

    /// Timeout for a direct page download (seconds)
    pub direct_timeout_secs: u64,

    /// Timeout for a reader request (seconds)
    pub reader_timeout_secs: u64,

    /// Shortest text accepted as an article (characters)
    pub min_content_chars: usize,

    /// A strategy wins as soon as its text exceeds this (characters)
    pub strategy_min_chars: usize,

    /// User agent sent with direct requests
    pub user_agent: String,

    /// Redirects followed before giving up
    pub max_redirects: usize,
}

impl FetchConfig {
    /// Get the direct download timeout as a Duration
    pub fn direct_timeout(&self) -> Duration {
        Duration::from_secs(self.direct_timeout_secs)
    }

    /// Get the reader timeout as a Duration
    pub fn reader_timeout(&self) -> Duration {
        Duration::from_secs(self.reader_timeout_secs)
    }

    /// Timeout for the configured mode
    pub fn timeout(&self) -> Duration {
        match self.mode {
            FetchMode::Direct => self.direct_timeout(),
            FetchMode::Reader => self.reader_timeout(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.direct_timeout_secs == 0 {
            return Err("direct_timeout_secs must be greater than 0".to_string());
        }
        if self.reader_timeout_secs == 0 {
            return Err("reader_timeout_secs must be greater than 0".to_string());
        }
        if self.min_content_chars < MIN_CONTENT_CHARS {
            return Err(format!(
                "min_content_chars cannot be below {}",
                MIN_CONTENT_CHARS
            ));
        }
        if self.strategy_min_chars < self.min_content_chars {
            return Err("strategy_min_chars cannot be below min_content_chars".to_string());
        }
        if self.mode == FetchMode::Reader && self.reader_endpoint.trim().is_empty() {
            return Err("reader mode needs a reader_endpoint".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    /// Default configuration: direct extraction
    fn default() -> Self {
        Self {
            mode: FetchMode::Direct,
            reader_endpoint: "https://r.jina.ai".to_string(),
            direct_timeout_secs: 30,
            reader_timeout_secs: 60,
            min_content_chars: MIN_CONTENT_CHARS,
            strategy_min_chars: 300,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            max_redirects: 5,
        }
    }
}

impl FetchConfig {
    /// Aggressive preset: short timeouts, fewer redirects
    pub fn aggressive() -> Self {
        Self {
            direct_timeout_secs: 10,
            reader_timeout_secs: 20,
            max_redirects: 2,
            ..Self::default()
        }
    }

    /// Reader preset: delegate extraction to the reader service
    pub fn reader(endpoint: impl Into<String>) -> Self {
        Self {
            mode: FetchMode::Reader,
            reader_endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
