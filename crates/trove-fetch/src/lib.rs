//! Trove Content Fetcher
//!
//! Fetches readable article text for bookmarked URLs.
//!
//! # Architecture
//!
//! ```text
//! BatchExtractor ──► ContentFetcher (WebFetcher) ──► DocumentSource
//!   join_all, cancel      screening, timeout,          HttpSource (reqwest)
//!                         status mapping, HTML         MockSource (tests)
//!                         strategy chain
//! ```
//!
//! Every URL yields exactly one [`ExtractionOutcome`](trove_domain::ExtractionOutcome).
//! Text shorter than the minimum never becomes an
//! [`ExtractedContent`](trove_domain::ExtractedContent), and bookmark
//! metadata is never substituted for page text.

#![warn(missing_docs)]

pub mod batch;
pub mod clean;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod html;
pub mod source;

pub use batch::{BatchExtractor, ExtractionBatch, ExtractionTarget};
pub use config::{FetchConfig, FetchMode};
pub use error::{ContentExtractionFailed, FetchError, SourceError};
pub use fetcher::{reason_for_status, ContentFetcher, WebFetcher};
pub use source::{DocumentSource, HttpSource, MockSource, RawDocument};

use std::sync::Arc;

/// Build a network-backed fetcher from a validated configuration
pub fn http_fetcher(config: FetchConfig) -> Result<WebFetcher<HttpSource>, FetchError> {
    config.validate().map_err(FetchError::Config)?;
    let source = HttpSource::new(&config)?;
    Ok(WebFetcher::new(Arc::new(source), config))
}
