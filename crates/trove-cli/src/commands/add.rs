//! Add command implementation.

use crate::cli::AddArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use tracing::info;
use trove_domain::bookmark::SUMMARY_URL_SCHEME;
use trove_domain::{now_millis, BookmarkStore, NewBookmark};
use trove_store::SqliteStore;

/// Execute the add command.
pub fn execute_add(
    args: AddArgs,
    store: &mut SqliteStore,
    owner: &str,
    formatter: &Formatter,
) -> Result<String> {
    if args.url.trim().starts_with(SUMMARY_URL_SCHEME) {
        return Err(CliError::InvalidInput(format!(
            "URLs starting with '{}' are reserved for summaries",
            SUMMARY_URL_SCHEME
        )));
    }

    let mut bookmark = NewBookmark::link(args.url).with_categories(args.categories);
    if let Some(title) = args.title {
        bookmark = bookmark.with_title(title);
    }

    let saved = store.create_bookmark(owner, bookmark, None)?;
    info!(id = %saved.id, url = %saved.url, "Bookmark added");

    formatter.format_bookmark(&saved, now_millis())
}
