//! Trove Domain Layer
//!
//! This crate contains the core domain model for Trove. It depends only on
//! `uuid` and `serde` and defines the value types and trait interfaces that
//! all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Bookmark**: a saved URL owned by one user, tagged with categories
//! - **Summary artifact**: a bookmark synthesized from an AI summary
//! - **Cluster**: a derived grouping of bookmarks by recency or category
//! - **Extraction outcome**: the per-URL result of fetching readable text
//!
//! ## Architecture
//!
//! - Pure value types and rules only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bookmark;
pub mod category;
pub mod cluster;
pub mod extraction;
pub mod filter;
pub mod summary;
pub mod traits;

// Re-exports for convenience
pub use bookmark::{now_millis, Bookmark, BookmarkId, BookmarkKind, BookmarkUpdate, NewBookmark};
pub use category::AI_SUMMARY_CATEGORY;
pub use cluster::{age_in_days, Cluster, ClusterKind, ClusterMetadata, ClusterStrategy, DateBucket};
pub use extraction::{ExtractedContent, ExtractionOutcome, FailureReason, MIN_CONTENT_CHARS};
pub use filter::{BookmarkFilter, DateRange};
pub use summary::{Sentiment, SummaryOptions, SummaryResult, SummaryStyle};
pub use traits::BookmarkStore;
