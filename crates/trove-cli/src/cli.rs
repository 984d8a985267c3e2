//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use trove_domain::{ClusterStrategy, DateRange, SummaryStyle};

/// Trove - save, group and summarize bookmarks.
#[derive(Debug, Parser)]
#[command(name = "trove")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save a bookmark
    Add(AddArgs),

    /// List bookmarks, newest first
    List(ListArgs),

    /// Change read or favorite flags
    Mark(MarkArgs),

    /// Delete a bookmark
    Delete(DeleteArgs),

    /// Group bookmarks into clusters
    Clusters(ClustersArgs),

    /// Summarize bookmarked articles into a new bookmark
    Summarize(SummarizeArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the add command.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// URL to save
    pub url: String,

    /// Title (defaults to the domain)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Category, repeatable
    #[arg(short = 'C', long = "category")]
    pub categories: Vec<String>,
}

/// Arguments for the list command.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only read bookmarks
    #[arg(long, conflicts_with = "unread")]
    pub read: bool,

    /// Only unread bookmarks
    #[arg(long)]
    pub unread: bool,

    /// Only favorites
    #[arg(long)]
    pub favorite: bool,

    /// Match any of these categories, repeatable
    #[arg(short = 'C', long = "category")]
    pub categories: Vec<String>,

    /// Only bookmarks saved within this window
    #[arg(short, long, value_enum)]
    pub since: Option<SinceArg>,

    /// Case-insensitive text in title, URL or content
    #[arg(short = 'q', long)]
    pub search: Option<String>,
}

/// Arguments for the mark command.
#[derive(Debug, Args)]
pub struct MarkArgs {
    /// Bookmark ID
    pub id: String,

    /// Mark as read
    #[arg(long, conflicts_with = "unread")]
    pub read: bool,

    /// Mark as unread
    #[arg(long)]
    pub unread: bool,

    /// Star the bookmark
    #[arg(long, conflicts_with = "unfavorite")]
    pub favorite: bool,

    /// Remove the star
    #[arg(long)]
    pub unfavorite: bool,
}

/// Arguments for the delete command.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Bookmark ID
    pub id: String,
}

/// Arguments for the clusters command.
#[derive(Debug, Args)]
pub struct ClustersArgs {
    /// Grouping strategy
    #[arg(short, long, value_enum, default_value = "auto")]
    pub strategy: StrategyArg,
}

/// Arguments for the summarize command.
#[derive(Debug, Args)]
pub struct SummarizeArgs {
    /// Bookmark IDs to summarize together
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,

    /// Summary style
    #[arg(short, long, value_enum, default_value = "detailed")]
    pub style: StyleArg,

    /// Upper bound on summary length
    #[arg(short, long, default_value = "300")]
    pub max_words: usize,

    /// Skip key points
    #[arg(long)]
    pub no_key_points: bool,

    /// API key (overrides the configured environment variable)
    #[arg(long)]
    pub api_key: Option<String>,
}

/// Arguments for the config command.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Write the effective configuration to the config file if none exists
    #[arg(long)]
    pub init: bool,
}

/// Recency window argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SinceArg {
    /// Saved today
    Today,
    /// Within 7 days
    Week,
    /// Within 30 days
    Month,
    /// Within 90 days
    Quarter,
}

/// Clustering strategy argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StrategyArg {
    /// By recency
    Date,
    /// By shared category
    Category,
    /// Both, largest first
    Auto,
}

/// Summary style argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StyleArg {
    /// One paragraph
    Brief,
    /// Several paragraphs
    Detailed,
    /// A bulleted list
    BulletPoints,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<SinceArg> for DateRange {
    fn from(since: SinceArg) -> Self {
        match since {
            SinceArg::Today => DateRange::Today,
            SinceArg::Week => DateRange::Week,
            SinceArg::Month => DateRange::Month,
            SinceArg::Quarter => DateRange::Quarter,
        }
    }
}

impl From<StrategyArg> for ClusterStrategy {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::Date => ClusterStrategy::Date,
            StrategyArg::Category => ClusterStrategy::Category,
            StrategyArg::Auto => ClusterStrategy::Auto,
        }
    }
}

impl From<StyleArg> for SummaryStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Brief => SummaryStyle::Brief,
            StyleArg::Detailed => SummaryStyle::Detailed,
            StyleArg::BulletPoints => SummaryStyle::BulletPoints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_command() {
        let cli = Cli::parse_from([
            "trove",
            "add",
            "https://example.com",
            "--title",
            "Example",
            "-C",
            "rust",
            "--category",
            "web",
        ]);
        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.url, "https://example.com");
                assert_eq!(args.title.as_deref(), Some("Example"));
                assert_eq!(args.categories, vec!["rust", "web"]);
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["trove", "list", "--format", "json", "--no-color", "-v"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.no_color);
        assert!(cli.verbose);
    }

    #[test]
    fn test_list_flags_conflict() {
        assert!(Cli::try_parse_from(["trove", "list", "--read", "--unread"]).is_err());
        let cli = Cli::parse_from(["trove", "list", "--unread", "--since", "week", "-q", "rust"]);
        match cli.command {
            Command::List(args) => {
                assert!(args.unread);
                assert!(matches!(args.since, Some(SinceArg::Week)));
                assert_eq!(args.search.as_deref(), Some("rust"));
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_summarize_command() {
        let cli = Cli::parse_from([
            "trove",
            "summarize",
            "id-one",
            "id-two",
            "--style",
            "bullet-points",
            "--max-words",
            "120",
            "--no-key-points",
        ]);
        match cli.command {
            Command::Summarize(args) => {
                assert_eq!(args.ids, vec!["id-one", "id-two"]);
                assert!(matches!(args.style, StyleArg::BulletPoints));
                assert_eq!(args.max_words, 120);
                assert!(args.no_key_points);
            }
            _ => panic!("Expected Summarize command"),
        }
        assert!(Cli::try_parse_from(["trove", "summarize"]).is_err());
    }

    #[test]
    fn test_clusters_default_strategy() {
        let cli = Cli::parse_from(["trove", "clusters"]);
        match cli.command {
            Command::Clusters(args) => {
                assert_eq!(ClusterStrategy::from(args.strategy), ClusterStrategy::Auto)
            }
            _ => panic!("Expected Clusters command"),
        }
    }
}
