//! List command implementation.

use crate::cli::ListArgs;
use crate::error::Result;
use crate::output::Formatter;
use trove_domain::{now_millis, BookmarkFilter, BookmarkStore};
use trove_store::SqliteStore;

/// Execute the list command.
pub fn execute_list(
    args: ListArgs,
    store: &SqliteStore,
    owner: &str,
    formatter: &Formatter,
) -> Result<String> {
    let filter = build_filter(args);
    let bookmarks = store.list_bookmarks(owner, &filter)?;
    formatter.format_bookmarks(&bookmarks, now_millis())
}

/// Translate flags into a filter; absent flags do not filter.
pub fn build_filter(args: ListArgs) -> BookmarkFilter {
    let is_read = match (args.read, args.unread) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };

    BookmarkFilter {
        is_read,
        is_favorite: args.favorite.then_some(true),
        categories: (!args.categories.is_empty()).then_some(args.categories),
        date_range: args.since.map(Into::into),
        search_query: args
            .search
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty()),
    }
}
