//! Command implementations.
//!
//! Each command returns the text to print; `main` does the printing.

pub mod add;
pub mod clusters;
pub mod config;
pub mod delete;
pub mod list;
pub mod mark;
pub mod summarize;

pub use self::add::execute_add;
pub use self::clusters::execute_clusters;
pub use self::config::execute_config;
pub use self::delete::execute_delete;
pub use self::list::execute_list;
pub use self::mark::execute_mark;
pub use self::summarize::{execute_summarize, run_summarize};

use crate::error::{CliError, Result};
use trove_domain::BookmarkId;

/// Parse a bookmark ID given on the command line.
pub(crate) fn parse_id(raw: &str) -> Result<BookmarkId> {
    BookmarkId::from_string(raw).map_err(CliError::InvalidInput)
}
