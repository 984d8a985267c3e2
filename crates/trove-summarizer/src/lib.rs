//! Trove Summarizer
//!
//! Turns a selection of bookmarks into a single AI summary bookmark.
//!
//! # Architecture
//!
//! ```text
//! SummaryPipeline
//!   ├─ BookmarkStore        load sources, write the artifact
//!   ├─ BatchExtractor       fetch article text concurrently
//!   ├─ SummarizationClient  one prompt, one model call, validated JSON
//!   └─ SummaryWriter        title, categories, created_at, summary: URL
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use std::sync::{Arc, Mutex};
//! use tokio_util::sync::CancellationToken;
//! use trove_domain::{BookmarkId, SummaryOptions};
//! use trove_fetch::{FetchConfig, MockSource, WebFetcher};
//! use trove_llm::MockProvider;
//! use trove_store::SqliteStore;
//! use trove_summarizer::{SummarizationClient, SummarizerConfig, SummaryPipeline};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(Mutex::new(SqliteStore::new(":memory:")?));
//! let fetcher = WebFetcher::new(Arc::new(MockSource::new()), FetchConfig::default());
//! let client = SummarizationClient::new(
//!     MockProvider::new(r#"{"summaryText": "..."}"#),
//!     SummarizerConfig::default(),
//! );
//! let pipeline = SummaryPipeline::new(store, Arc::new(fetcher), client);
//!
//! let ids: Vec<BookmarkId> = Vec::new();
//! let report = pipeline
//!     .summarize_bookmarks(
//!         "alice",
//!         &ids,
//!         &SummaryOptions::default(),
//!         Some("sk-example-key"),
//!         &CancellationToken::new(),
//!     )
//!     .await?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod parser;
mod pipeline;
mod prompt;
mod writer;


pub use client::SummarizationClient;
pub use config::SummarizerConfig;
pub use error::{PipelineError, SummarizerError};
pub use parser::{find_json_object, parse_summary_response, SummaryDraft};
pub use pipeline::{SummaryPipeline, SummaryReport};
pub use prompt::PromptBuilder;
pub use writer::{process_issuer, ArtifactDraft, SummaryWriter, UrlIssuer};
