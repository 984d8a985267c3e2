//! Trove CLI - save, group and summarize bookmarks from the terminal.

use clap::Parser;
use std::fs;
use tracing_subscriber::EnvFilter;
use trove_cli::commands;
use trove_cli::{Cli, Command, Config, Formatter};
use trove_store::SqliteStore;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> trove_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config (defaults when the file is absent)
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = Config::load_from(&config_path)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);
    let owner = config.settings.owner.clone();

    // Config never touches the database
    let cmd = match cli.command {
        Command::Config(args) => {
            let output = commands::execute_config(args, &config, &config_path, &formatter)?;
            println!("{}", output);
            return Ok(());
        }
        cmd => cmd,
    };

    let db_path = config.database_path()?;
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut store = SqliteStore::new(&db_path)?;

    let output = match cmd {
        Command::Add(args) => commands::execute_add(args, &mut store, &owner, &formatter)?,
        Command::List(args) => commands::execute_list(args, &store, &owner, &formatter)?,
        Command::Mark(args) => commands::execute_mark(args, &mut store, &owner, &formatter)?,
        Command::Delete(args) => commands::execute_delete(args, &mut store, &owner, &formatter)?,
        Command::Clusters(args) => commands::execute_clusters(args, &store, &owner, &formatter)?,
        Command::Summarize(args) => {
            commands::execute_summarize(args, store, &config, &formatter).await?
        }
        Command::Config(_) => return Ok(()),
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Log to stderr; `RUST_LOG` applies unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,trove=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
