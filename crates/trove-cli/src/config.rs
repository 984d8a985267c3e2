//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use trove_fetch::FetchConfig;
use trove_summarizer::SummarizerConfig;

/// Name of the directory under the home directory
const CONFIG_DIR: &str = ".trove";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Bookmark database
    #[serde(default)]
    pub store: StoreSettings,

    /// Model endpoint and credential source
    #[serde(default)]
    pub llm: LlmSettings,

    /// Article fetching
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Summary requests
    #[serde(default)]
    pub summarizer: SummarizerConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Owner whose bookmarks the CLI reads and writes
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Database location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// SQLite file; `~/.trove/trove.db` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// LLM provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Chat completions base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join("config.toml"))
    }

    fn home_dir() -> Result<PathBuf> {
        let home =
            dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(CONFIG_DIR))
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        if self.settings.owner.trim().is_empty() {
            return Err(CliError::Config("settings.owner must not be empty".into()));
        }
        if self.llm.api_key_env.trim().is_empty() {
            return Err(CliError::Config("llm.api_key_env must not be empty".into()));
        }
        self.fetch
            .validate()
            .map_err(|e| CliError::Config(format!("fetch: {}", e)))?;
        self.summarizer
            .validate()
            .map_err(|e| CliError::Config(format!("summarizer: {}", e)))?;
        Ok(())
    }

    /// Database file to open.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.store.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::home_dir()?.join("trove.db")),
        }
    }

    /// API key from the flag, else from the configured environment variable.
    pub fn api_key(&self, flag: Option<&str>) -> Option<String> {
        flag.map(str::to_string)
            .or_else(|| std::env::var(&self.llm.api_key_env).ok())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            color: true,
            format: OutputFormat::Table,
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_owner() -> String {
    "local".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_endpoint() -> String {
    trove_llm::chat::DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    trove_llm::chat::DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    "TROVE_API_KEY".to_string()
}
