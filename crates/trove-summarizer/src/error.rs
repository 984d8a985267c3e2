//! Error types for summarization

use thiserror::Error;
use trove_domain::FailureReason;
use trove_fetch::ContentExtractionFailed;
use trove_llm::LlmError;

/// Errors from the Summarization Client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummarizerError {
    /// Nothing to summarize
    #[error("No content to summarize")]
    NoContent,

    /// The model call failed or timed out
    #[error("Summarization failed: {0}")]
    SummarizationFailed(String),

    /// The provider rejected the credential
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<LlmError> for SummarizerError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::InvalidCredential(msg) => SummarizerError::InvalidCredential(msg),
            e if e.is_credential_error() => SummarizerError::InvalidCredential(e.to_string()),
            e => SummarizerError::SummarizationFailed(e.to_string()),
        }
    }
}

/// Errors from the end-to-end summary pipeline
///
/// No variant leaves a partial artifact behind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// None of the requested ids names a summarizable bookmark
    #[error("No valid sources: none of the selected bookmarks can be summarized")]
    NoValidSources,

    /// Every fetch failed
    #[error("Could not extract content from any of {attempted} articles ({})", describe(.reasons))]
    ContentExtractionFailed {
        /// URLs tried
        attempted: usize,
        /// Up to three distinct reasons
        reasons: Vec<FailureReason>,
    },

    /// The model call failed
    #[error("Summarization failed: {message}")]
    SummarizationFailed {
        /// Provider or timeout detail
        message: String,
    },

    /// Credential missing, malformed or rejected
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// Writing the artifact failed
    #[error("Store error: {0}")]
    Store(String),
}

fn describe(reasons: &[FailureReason]) -> String {
    reasons
        .iter()
        .map(FailureReason::label)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<ContentExtractionFailed> for PipelineError {
    fn from(e: ContentExtractionFailed) -> Self {
        PipelineError::ContentExtractionFailed {
            attempted: e.attempted,
            reasons: e.reasons,
        }
    }
}

impl From<SummarizerError> for PipelineError {
    fn from(e: SummarizerError) -> Self {
        match e {
            SummarizerError::InvalidCredential(msg) => PipelineError::InvalidCredential(msg),
            SummarizerError::NoContent => PipelineError::NoValidSources,
            SummarizerError::SummarizationFailed(message) | SummarizerError::Config(message) => {
                PipelineError::SummarizationFailed { message }
            }
        }
    }
}

impl From<LlmError> for PipelineError {
    fn from(e: LlmError) -> Self {
        SummarizerError::from(e).into()
    }
}
