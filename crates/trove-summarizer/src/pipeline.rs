//! End-to-end summarization of selected bookmarks
//!
//! ```text
//! credential ─► store lookup ─► batch extraction ─► model call ─► artifact write
//! ```
//!
//! Each stage can end the run. Exactly one artifact is created, or none.

use crate::client::SummarizationClient;
use crate::error::PipelineError;
use crate::writer::SummaryWriter;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use trove_domain::{Bookmark, BookmarkId, BookmarkStore, SummaryOptions, SummaryResult};
use trove_fetch::{BatchExtractor, ContentFetcher, ExtractionTarget};
use trove_llm::{ApiKey, LlmProvider};

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    /// The persisted summary bookmark
    pub artifact: Bookmark,
    /// What the model produced
    pub summary: SummaryResult,
    /// Sources whose extraction was attempted
    pub requested: usize,
    /// Sources whose text reached the model
    pub contributed: usize,
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "summarized {} of {} articles",
            self.contributed, self.requested
        )
    }
}

/// Coordinates store, fetcher, model and writer for one summary request
pub struct SummaryPipeline<S, L, F>
where
    S: BookmarkStore,
    L: LlmProvider,
    F: ContentFetcher,
{
    store: Arc<Mutex<S>>,
    extractor: BatchExtractor<F>,
    client: SummarizationClient<L>,
    writer: SummaryWriter,
}

impl<S, L, F> SummaryPipeline<S, L, F>
where
    S: BookmarkStore,
    S::Error: fmt::Display,
    L: LlmProvider,
    F: ContentFetcher,
{
    /// Create a pipeline over a shared store
    pub fn new(store: Arc<Mutex<S>>, fetcher: Arc<F>, client: SummarizationClient<L>) -> Self {
        Self {
            store,
            extractor: BatchExtractor::new(fetcher),
            client,
            writer: SummaryWriter::new(),
        }
    }

    /// Replace the artifact writer
    pub fn with_writer(mut self, writer: SummaryWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Summarize the bookmarks `ids` of `owner` into a new summary bookmark
    ///
    /// The credential is checked before anything else is touched. Missing
    /// ids, other owners' bookmarks and summary artifacts are skipped.
    /// Articles that cannot be fetched are left out as long as at least
    /// one succeeds.
    pub async fn summarize_bookmarks(
        &self,
        owner: &str,
        ids: &[BookmarkId],
        options: &SummaryOptions,
        credential: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<SummaryReport, PipelineError> {
        let key = ApiKey::parse_optional(credential).map_err(PipelineError::from)?;

        let mut seen = HashSet::new();
        let unique: Vec<BookmarkId> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();
        info!(owner, requested = unique.len(), "Starting summary pipeline");

        let loaded = {
            let store = self.lock_store()?;
            store
                .get_bookmarks_by_ids(owner, &unique)
                .map_err(|e| PipelineError::Store(e.to_string()))?
        };

        let sources: Vec<Bookmark> = loaded
            .into_iter()
            .flatten()
            .filter(|b| {
                let usable = b.is_browsable();
                if !usable {
                    debug!(id = %b.id, "Skipping non-browsable bookmark");
                }
                usable
            })
            .collect();
        if sources.is_empty() {
            warn!(owner, "No valid sources to summarize");
            return Err(PipelineError::NoValidSources);
        }

        let targets: Vec<ExtractionTarget> = sources
            .iter()
            .map(|b| ExtractionTarget::new(&b.url, &b.title))
            .collect();
        let batch = self.extractor.extract_all(&targets, cancel).await;

        let contributing: Vec<Bookmark> = sources
            .iter()
            .zip(batch.outcomes())
            .filter(|(_, outcome)| outcome.is_success())
            .map(|(b, _)| b.clone())
            .collect();
        let requested = batch.attempted();
        let contents = batch.into_contents()?;

        let summary = self.client.summarize(&contents, options, &key).await?;

        let draft = self
            .writer
            .draft(&contributing, &summary)
            .ok_or(PipelineError::NoValidSources)?;

        let artifact = {
            let mut store = self.lock_store()?;
            store
                .create_bookmark(owner, draft.bookmark, Some(draft.created_at))
                .map_err(|e| PipelineError::Store(e.to_string()))?
        };

        let report = SummaryReport {
            artifact,
            summary,
            requested,
            contributed: contributing.len(),
        };
        info!(
            owner,
            artifact = %report.artifact.id,
            requested = report.requested,
            contributed = report.contributed,
            "Summary pipeline finished"
        );
        Ok(report)
    }

    fn lock_store(&self) -> Result<MutexGuard<'_, S>, PipelineError> {
        self.store
            .lock()
            .map_err(|_| PipelineError::Store("store lock poisoned".to_string()))
    }
}
