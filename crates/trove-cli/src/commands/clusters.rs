//! Clusters command implementation.

use crate::cli::ClustersArgs;
use crate::error::Result;
use crate::output::Formatter;
use trove_domain::{now_millis, BookmarkFilter, BookmarkStore};
use trove_store::SqliteStore;
use trove_synthesizer::ClusterEngine;

/// Execute the clusters command.
pub fn execute_clusters(
    args: ClustersArgs,
    store: &SqliteStore,
    owner: &str,
    formatter: &Formatter,
) -> Result<String> {
    let bookmarks = store.list_bookmarks(owner, &BookmarkFilter::default())?;
    let clusters = ClusterEngine::new().cluster(&bookmarks, args.strategy.into(), now_millis());
    formatter.format_clusters(&clusters)
}
