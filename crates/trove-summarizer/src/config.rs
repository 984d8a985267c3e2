//! Configuration for the Summarization Client

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Summarization Client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Maximum time for the model call (seconds)
    pub timeout_secs: u64,

    /// Characters of raw output kept when the response is unusable
    pub fallback_chars: usize,

    /// Most AI-suggested categories kept
    pub max_suggested_categories: usize,
}

impl SummarizerConfig {
    /// Get the model call timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.fallback_chars == 0 {
            return Err("fallback_chars must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            fallback_chars: 1000,
            max_suggested_categories: 5,
        }
    }
}

impl SummarizerConfig {
    /// Aggressive preset: give up on slow models sooner
    pub fn aggressive() -> Self {
        Self {
            timeout_secs: 20,
            ..Self::default()
        }
    }

    /// Lenient preset: wait longer for large prompts
    pub fn lenient() -> Self {
        Self {
            timeout_secs: 180,
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
