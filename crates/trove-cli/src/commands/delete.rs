//! Delete command implementation.

use crate::cli::DeleteArgs;
use crate::commands::parse_id;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use tracing::info;
use trove_domain::BookmarkStore;
use trove_store::SqliteStore;

/// Execute the delete command.
pub fn execute_delete(
    args: DeleteArgs,
    store: &mut SqliteStore,
    owner: &str,
    formatter: &Formatter,
) -> Result<String> {
    let id = parse_id(&args.id)?;
    if !store.delete_bookmark(owner, id)? {
        return Err(CliError::NotFound(args.id));
    }
    info!(%id, "Bookmark deleted");
    Ok(formatter.success(&format!("Deleted {}", id)))
}
