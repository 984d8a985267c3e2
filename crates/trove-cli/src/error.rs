//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store error
    #[error("{0}")]
    Store(#[from] trove_store::StoreError),

    /// Fetcher setup error
    #[error("{0}")]
    Fetch(#[from] trove_fetch::FetchError),

    /// LLM provider setup error
    #[error("{0}")]
    Llm(#[from] trove_llm::LlmError),

    /// Summary pipeline error
    #[error("{0}")]
    Pipeline(#[from] trove_summarizer::PipelineError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Bookmark does not exist
    #[error("Bookmark not found: {0}")]
    NotFound(String),
}
