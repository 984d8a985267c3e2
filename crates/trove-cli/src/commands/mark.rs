//! Mark command implementation.

use crate::cli::MarkArgs;
use crate::commands::parse_id;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use trove_domain::{now_millis, BookmarkStore, BookmarkUpdate};
use trove_store::SqliteStore;

/// Execute the mark command.
pub fn execute_mark(
    args: MarkArgs,
    store: &mut SqliteStore,
    owner: &str,
    formatter: &Formatter,
) -> Result<String> {
    let id = parse_id(&args.id)?;

    let update = BookmarkUpdate {
        is_read: flag(args.read, args.unread),
        is_favorite: flag(args.favorite, args.unfavorite),
        ..BookmarkUpdate::default()
    };
    if update.is_empty() {
        return Err(CliError::InvalidInput(
            "Nothing to change; pass --read, --unread, --favorite or --unfavorite".to_string(),
        ));
    }

    let updated = store
        .update_bookmark(owner, id, update)?
        .ok_or_else(|| CliError::NotFound(args.id.clone()))?;

    formatter.format_bookmark(&updated, now_millis())
}

fn flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
