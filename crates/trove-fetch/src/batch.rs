//! Batch extraction coordinator
//!
//! Fetches every target concurrently and joins in input order. Individual
//! failures are kept as outcomes; the batch only fails when nothing
//! succeeded.

use crate::error::ContentExtractionFailed;
use crate::fetcher::ContentFetcher;
use futures::future::join_all;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use trove_domain::{ExtractedContent, ExtractionOutcome, FailureReason};

/// Most distinct reasons reported for a failed batch
pub const MAX_REPORTED_REASONS: usize = 3;

/// One URL to fetch, with the title to fall back on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionTarget {
    /// URL to fetch
    pub url: String,
    /// Title used when the page has none
    pub title: String,
}

impl ExtractionTarget {
    /// Create a target
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Outcomes of a batch, one per target in input order
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionBatch {
    outcomes: Vec<ExtractionOutcome>,
}

impl ExtractionBatch {
    /// Wrap outcomes
    pub fn new(outcomes: Vec<ExtractionOutcome>) -> Self {
        Self { outcomes }
    }

    /// Number of URLs attempted
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// All outcomes in input order
    pub fn outcomes(&self) -> &[ExtractionOutcome] {
        &self.outcomes
    }

    /// Successful extractions in input order
    pub fn successes(&self) -> Vec<&ExtractedContent> {
        self.outcomes.iter().filter_map(|o| o.content()).collect()
    }

    /// Failed outcomes in input order
    pub fn failures(&self) -> Vec<&ExtractionOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success()).collect()
    }

    /// Up to three distinct failure reasons, first seen first
    pub fn representative_reasons(&self) -> Vec<FailureReason> {
        let mut reasons = Vec::new();
        for reason in self.outcomes.iter().filter_map(ExtractionOutcome::reason) {
            if !reasons.contains(&reason) {
                reasons.push(reason);
                if reasons.len() == MAX_REPORTED_REASONS {
                    break;
                }
            }
        }
        reasons
    }

    /// The successful contents, or an error when none succeeded
    pub fn into_contents(self) -> Result<Vec<ExtractedContent>, ContentExtractionFailed> {
        let attempted = self.attempted();
        let reasons = self.representative_reasons();
        let contents: Vec<ExtractedContent> = self
            .outcomes
            .into_iter()
            .filter_map(|o| match o {
                ExtractionOutcome::Success(content) => Some(content),
                ExtractionOutcome::Failure { .. } => None,
            })
            .collect();

        if contents.is_empty() {
            return Err(ContentExtractionFailed { attempted, reasons });
        }
        Ok(contents)
    }
}

/// Runs a [`ContentFetcher`] over many targets at once
pub struct BatchExtractor<F: ContentFetcher> {
    fetcher: Arc<F>,
}

impl<F: ContentFetcher> BatchExtractor<F> {
    /// Create a coordinator over a shared fetcher
    pub fn new(fetcher: Arc<F>) -> Self {
        Self { fetcher }
    }

    /// Fetch all targets concurrently
    ///
    /// Returns exactly one outcome per target, in input order. Targets
    /// still running when `cancel` fires resolve to `Cancelled`.
    pub async fn extract_all(
        &self,
        targets: &[ExtractionTarget],
        cancel: &CancellationToken,
    ) -> ExtractionBatch {
        info!(count = targets.len(), "Starting batch extraction");

        let tasks = targets.iter().map(|target| {
            let fetcher = Arc::clone(&self.fetcher);
            async move {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => ExtractionOutcome::failure(
                        &target.url,
                        FailureReason::Cancelled,
                        "extraction cancelled",
                    ),
                    outcome = fetcher.fetch(&target.url, &target.title) => outcome,
                }
            }
        });

        let batch = ExtractionBatch::new(join_all(tasks).await);
        let succeeded = batch.successes().len();
        if succeeded == 0 && batch.attempted() > 0 {
            warn!(attempted = batch.attempted(), "No article could be extracted");
        } else {
            info!(
                attempted = batch.attempted(),
                succeeded, "Batch extraction finished"
            );
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(url: &str) -> ExtractionOutcome {
        ExtractionOutcome::Success(
            ExtractedContent::new(url, "t", "long enough text ".repeat(20)).unwrap(),
        )
    }

    fn fail(url: &str, reason: FailureReason) -> ExtractionOutcome {
        ExtractionOutcome::failure(url, reason, "x")
    }

    #[test]
    fn test_batch_accessors() {
        let batch = ExtractionBatch::new(vec![
            ok("a"),
            fail("b", FailureReason::Timeout),
            ok("c"),
        ]);
        assert_eq!(batch.attempted(), 3);
        assert_eq!(batch.successes().len(), 2);
        assert_eq!(batch.failures().len(), 1);

        let contents = batch.into_contents().unwrap();
        let urls: Vec<_> = contents.iter().map(|c| c.source_url.as_str()).collect();
        assert_eq!(urls, vec!["a", "c"]);
    }

    #[test]
    fn test_reasons_distinct_and_capped() {
        let batch = ExtractionBatch::new(vec![
            fail("a", FailureReason::NotFound),
            fail("b", FailureReason::NotFound),
            fail("c", FailureReason::Timeout),
            fail("d", FailureReason::AccessDenied),
            fail("e", FailureReason::ServerError),
        ]);
        assert_eq!(
            batch.representative_reasons(),
            vec![
                FailureReason::NotFound,
                FailureReason::Timeout,
                FailureReason::AccessDenied
            ]
        );

        let err = batch.into_contents().unwrap_err();
        assert_eq!(err.attempted, 5);
        assert_eq!(err.reasons.len(), 3);
    }

    #[test]
    fn test_empty_batch_fails() {
        let err = ExtractionBatch::new(Vec::new()).into_contents().unwrap_err();
        assert_eq!(err.attempted, 0);
        assert!(err.reasons.is_empty());
    }
}
