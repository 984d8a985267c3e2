//! Single-URL content fetcher

use crate::clean::{clean_text, has_unsupported_extension, is_unsupported_content_type};
use crate::config::{FetchConfig, FetchMode};
use crate::html::extract_page;
use crate::source::DocumentSource;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use trove_domain::{ExtractedContent, ExtractionOutcome, FailureReason};

/// Turns a URL into extracted article text or a classified failure
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch one URL; `title` labels the result when the page has none
    async fn fetch(&self, url: &str, title: &str) -> ExtractionOutcome;
}

#[async_trait]
impl<F: ContentFetcher + ?Sized> ContentFetcher for Arc<F> {
    async fn fetch(&self, url: &str, title: &str) -> ExtractionOutcome {
        (**self).fetch(url, title).await
    }
}

/// Failure reason for a non-success HTTP status
///
/// Returns `None` for 2xx.
pub fn reason_for_status(status: u16) -> Option<FailureReason> {
    match status {
        200..=299 => None,
        401 | 403 => Some(FailureReason::AccessDenied),
        404 | 410 => Some(FailureReason::NotFound),
        408 => Some(FailureReason::Timeout),
        500..=599 => Some(FailureReason::ServerError),
        _ => Some(FailureReason::Unknown),
    }
}

/// Fetcher over any [`DocumentSource`], in direct or reader mode
pub struct WebFetcher<S: DocumentSource> {
    source: Arc<S>,
    config: FetchConfig,
    timeout: Duration,
}

impl<S: DocumentSource> WebFetcher<S> {
    /// Create a fetcher; the timeout follows the configured mode
    pub fn new(source: Arc<S>, config: FetchConfig) -> Self {
        let timeout = config.timeout();
        Self {
            source,
            config,
            timeout,
        }
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn request_url(&self, url: &str) -> String {
        match self.config.mode {
            FetchMode::Direct => url.to_string(),
            FetchMode::Reader => format!(
                "{}/{}",
                self.config.reader_endpoint.trim_end_matches('/'),
                url
            ),
        }
    }

    async fn fetch_inner(&self, url: &str, title: &str) -> Result<ExtractedContent, (FailureReason, String)> {
        if has_unsupported_extension(url) {
            return Err((
                FailureReason::UnsupportedFormat,
                "URL points at a non-text file".to_string(),
            ));
        }
        match url::Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => {
                return Err((
                    FailureReason::Unknown,
                    format!("unsupported scheme '{}'", parsed.scheme()),
                ))
            }
            Err(e) => return Err((FailureReason::Unknown, format!("invalid URL: {}", e))),
        }

        let request_url = self.request_url(url);
        let document = match tokio::time::timeout(self.timeout, self.source.get(&request_url)).await {
            Ok(Ok(document)) => document,
            Ok(Err(e)) => return Err((e.reason(), e.to_string())),
            Err(_) => {
                return Err((
                    FailureReason::Timeout,
                    format!("no response within {}s", self.timeout.as_secs_f32()),
                ))
            }
        };

        if let Some(reason) = reason_for_status(document.status) {
            return Err((reason, format!("HTTP {}", document.status)));
        }
        if let Some(content_type) = document.content_type.as_deref() {
            if is_unsupported_content_type(content_type) {
                return Err((
                    FailureReason::UnsupportedFormat,
                    format!("content type {}", content_type),
                ));
            }
        }

        let (page_title, text) = match self.config.mode {
            FetchMode::Direct => {
                let page = extract_page(&document.body, self.config.strategy_min_chars);
                debug!(url, strategy = ?page.strategy, chars = page.text.len(), "Extracted page");
                (page.title, page.text)
            }
            FetchMode::Reader => (None, clean_text(&document.body)),
        };

        let chars = text.chars().count();
        if chars < self.config.min_content_chars {
            return Err((
                FailureReason::InsufficientContent,
                format!("only {} characters of text", chars),
            ));
        }

        let label = page_title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| title.to_string());

        ExtractedContent::new(url, label, text).ok_or_else(|| {
            (
                FailureReason::InsufficientContent,
                format!("only {} characters of text", chars),
            )
        })
    }
}

#[async_trait]
impl<S: DocumentSource> ContentFetcher for WebFetcher<S> {
    async fn fetch(&self, url: &str, title: &str) -> ExtractionOutcome {
        match self.fetch_inner(url, title).await {
            Ok(content) => {
                debug!(url, words = content.word_count, "Fetched article");
                ExtractionOutcome::Success(content)
            }
            Err((reason, message)) => {
                warn!(url, reason = reason.label(), %message, "Fetch failed");
                ExtractionOutcome::failure(url, reason, message)
            }
        }
    }
}
