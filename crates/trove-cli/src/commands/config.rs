//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<String> {
    if !args.init {
        return Ok(format!("# {}\n{}", path.display(), config.to_toml()?));
    }

    if path.exists() {
        return Ok(formatter.info(&format!(
            "Configuration already exists at {}",
            path.display()
        )));
    }
    config.save_to(path)?;
    Ok(formatter.success(&format!("Wrote {}", path.display())))
}
