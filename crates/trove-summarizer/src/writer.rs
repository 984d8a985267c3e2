//! Summary artifact metadata
//!
//! Turns a [`SummaryResult`] and the bookmarks it came from into the payload
//! for a new summary bookmark.

use std::sync::atomic::{AtomicU64, Ordering};
use trove_domain::bookmark::SUMMARY_URL_SCHEME;
use trove_domain::{
    category, now_millis, Bookmark, BookmarkKind, NewBookmark, SummaryResult, AI_SUMMARY_CATEGORY,
};

/// Issues strictly increasing millisecond stamps for summary URLs
///
/// Each call returns `max(now, last + 1)`, so two artifacts created within
/// the same millisecond still get distinct URLs.
#[derive(Debug, Default)]
pub struct UrlIssuer {
    last: AtomicU64,
}

impl UrlIssuer {
    /// Create an issuer that has issued nothing yet
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Next stamp at or after `now`
    pub fn next_stamp(&self, now: u64) -> u64 {
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        now.max(previous.saturating_add(1))
    }

    /// Next `summary:{millis}` URL
    pub fn next_url(&self, now: u64) -> String {
        format!("{}{}", SUMMARY_URL_SCHEME, self.next_stamp(now))
    }
}

static PROCESS_ISSUER: UrlIssuer = UrlIssuer::new();

/// The process-wide issuer used by [`SummaryWriter::new`]
pub fn process_issuer() -> &'static UrlIssuer {
    &PROCESS_ISSUER
}

/// A fully derived artifact, ready for `create_bookmark`
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactDraft {
    /// Creation payload
    pub bookmark: NewBookmark,
    /// Creation time override: the newest source's `created_at`
    pub created_at: u64,
}

/// Derives summary artifact metadata
pub struct SummaryWriter {
    issuer: &'static UrlIssuer,
}

impl SummaryWriter {
    /// Writer using the process-wide URL issuer
    pub fn new() -> Self {
        Self {
            issuer: process_issuer(),
        }
    }

    /// Writer using a specific issuer
    pub fn with_issuer(issuer: &'static UrlIssuer) -> Self {
        Self { issuer }
    }

    /// Build the artifact for `summary` of `sources`
    ///
    /// Categories are `ai-summary` followed by every distinct source
    /// category; the model's suggested categories are not used. Returns
    /// `None` when there are no sources.
    pub fn draft(&self, sources: &[Bookmark], summary: &SummaryResult) -> Option<ArtifactDraft> {
        let created_at = sources.iter().map(|b| b.created_at).max()?;

        let title = match sources {
            [only] => format!("Summary: {}", only.title),
            _ => format!("Summary of {} articles", sources.len()),
        };

        let categories = category::dedupe(
            std::iter::once(AI_SUMMARY_CATEGORY)
                .chain(sources.iter().flat_map(|b| b.categories.iter().map(String::as_str))),
        );

        let bookmark = NewBookmark {
            kind: BookmarkKind::Summary,
            url: self.issuer.next_url(now_millis()),
            title,
            content: Some(summary.summary_text.clone()),
            categories,
            is_read: false,
            is_favorite: false,
        };

        Some(ArtifactDraft {
            bookmark,
            created_at,
        })
    }
}

impl Default for SummaryWriter {
    fn default() -> Self {
        Self::new()
    }
}
