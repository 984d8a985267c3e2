//! Summarize command implementation.

use crate::cli::SummarizeArgs;
use crate::commands::parse_id;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::fmt;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::warn;
use trove_domain::{BookmarkId, BookmarkStore, SummaryOptions};
use trove_fetch::ContentFetcher;
use trove_llm::{ChatProvider, LlmProvider};
use trove_store::SqliteStore;
use trove_summarizer::{SummarizationClient, SummaryPipeline};

/// Execute the summarize command against the configured network services.
pub async fn execute_summarize(
    args: SummarizeArgs,
    store: SqliteStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<String> {
    let ids = args
        .ids
        .iter()
        .map(|raw| parse_id(raw))
        .collect::<Result<Vec<BookmarkId>>>()?;
    let options = summary_options(&args);
    let credential = config.api_key(args.api_key.as_deref());

    let fetcher = trove_fetch::http_fetcher(config.fetch.clone())?;
    let llm = ChatProvider::with_timeout(
        &config.llm.endpoint,
        &config.llm.model,
        config.summarizer.timeout(),
    )?;
    let client = SummarizationClient::new(llm, config.summarizer.clone());
    let pipeline = SummaryPipeline::new(Arc::new(Mutex::new(store)), Arc::new(fetcher), client);

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling outstanding fetches");
                cancel.cancel();
            }
        })
    };

    let result = run_summarize(
        &pipeline,
        &config.settings.owner,
        &ids,
        &options,
        credential.as_deref(),
        &cancel,
        formatter,
    )
    .await;
    interrupt.abort();
    result
}

/// Run a summary through any pipeline and format the report.
pub async fn run_summarize<S, L, F>(
    pipeline: &SummaryPipeline<S, L, F>,
    owner: &str,
    ids: &[BookmarkId],
    options: &SummaryOptions,
    credential: Option<&str>,
    cancel: &CancellationToken,
    formatter: &Formatter,
) -> Result<String>
where
    S: BookmarkStore,
    S::Error: fmt::Display,
    L: LlmProvider,
    F: ContentFetcher,
{
    let report = pipeline
        .summarize_bookmarks(owner, ids, options, credential, cancel)
        .await?;
    formatter.format_summary(&report)
}

fn summary_options(args: &SummarizeArgs) -> SummaryOptions {
    SummaryOptions {
        style: args.style.into(),
        max_words: args.max_words,
        include_key_points: !args.no_key_points,
    }
}
