//! Error types for content fetching

use thiserror::Error;
use trove_domain::FailureReason;

/// Errors raised while setting up a fetcher
#[derive(Error, Debug)]
pub enum FetchError {
    /// Configuration rejected by `validate()`
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Transport-level failure from a [`DocumentSource`](crate::DocumentSource)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The request did not complete in time
    #[error("request timed out")]
    Timeout,

    /// The URL could not be requested at all
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Connection refused, DNS failure, TLS error and the like
    #[error("connection failed: {0}")]
    Connection(String),

    /// The body could not be read
    #[error("failed to read body: {0}")]
    Body(String),
}

impl SourceError {
    /// Failure reason reported for this transport error
    pub fn reason(&self) -> FailureReason {
        match self {
            SourceError::Timeout => FailureReason::Timeout,
            _ => FailureReason::Unknown,
        }
    }
}

/// Every URL in a batch failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not extract content from any of {attempted} articles ({})", format_reasons(.reasons))]
pub struct ContentExtractionFailed {
    /// Number of URLs tried
    pub attempted: usize,
    /// Up to three distinct failure reasons, first seen first
    pub reasons: Vec<FailureReason>,
}

fn format_reasons(reasons: &[FailureReason]) -> String {
    if reasons.is_empty() {
        return "no sources".to_string();
    }
    reasons
        .iter()
        .map(FailureReason::label)
        .collect::<Vec<_>>()
        .join(", ")
}
