//! Extraction value types shared by the fetcher and the summarizer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum characters of readable text for an extraction to count
pub const MIN_CONTENT_CHARS: usize = 200;

/// Readable article text for one URL
///
/// Never constructed with less than [`MIN_CONTENT_CHARS`] characters of text;
/// see [`ExtractedContent::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// URL the text came from
    pub source_url: String,
    /// Page title
    pub title: String,
    /// Cleaned article text
    pub text: String,
    /// Whitespace-separated word count of `text`
    pub word_count: usize,
}

impl ExtractedContent {
    /// Build a record, or `None` if the text is too thin to count
    pub fn new(
        source_url: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Option<Self> {
        let text = text.into();
        if text.chars().count() < MIN_CONTENT_CHARS {
            return None;
        }
        let word_count = text.split_whitespace().count();
        Some(Self {
            source_url: source_url.into(),
            title: title.into(),
            text,
            word_count,
        })
    }
}

/// Why an extraction failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The fetch exceeded its time budget
    Timeout,
    /// HTTP 401/403
    AccessDenied,
    /// HTTP 404/410
    NotFound,
    /// HTTP 5xx
    ServerError,
    /// Fetched fine but fewer than MIN_CONTENT_CHARS characters of text
    InsufficientContent,
    /// Non-text resource (pdf, image, ...)
    UnsupportedFormat,
    /// The caller cancelled the batch
    Cancelled,
    /// Anything else
    Unknown,
}

impl FailureReason {
    /// Short human label
    pub fn label(&self) -> &'static str {
        match self {
            FailureReason::Timeout => "timed out",
            FailureReason::AccessDenied => "access denied",
            FailureReason::NotFound => "not found",
            FailureReason::ServerError => "server error",
            FailureReason::InsufficientContent => "not enough readable content",
            FailureReason::UnsupportedFormat => "unsupported format",
            FailureReason::Cancelled => "cancelled",
            FailureReason::Unknown => "unknown error",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of attempting to extract one URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionOutcome {
    /// Readable text was obtained
    Success(ExtractedContent),
    /// Extraction failed
    Failure {
        /// URL that failed
        url: String,
        /// Typed reason
        reason: FailureReason,
        /// Diagnostic detail
        message: String,
    },
}

impl ExtractionOutcome {
    /// Shorthand for a failure
    pub fn failure(url: impl Into<String>, reason: FailureReason, message: impl Into<String>) -> Self {
        ExtractionOutcome::Failure {
            url: url.into(),
            reason,
            message: message.into(),
        }
    }

    /// Whether this is a success
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Success(_))
    }

    /// The failure reason, if any
    pub fn reason(&self) -> Option<FailureReason> {
        match self {
            ExtractionOutcome::Success(_) => None,
            ExtractionOutcome::Failure { reason, .. } => Some(*reason),
        }
    }

    /// The extracted content, if any
    pub fn content(&self) -> Option<&ExtractedContent> {
        match self {
            ExtractionOutcome::Success(content) => Some(content),
            ExtractionOutcome::Failure { .. } => None,
        }
    }
}
