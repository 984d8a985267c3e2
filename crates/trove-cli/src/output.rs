//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use trove_domain::{age_in_days, Bookmark, Cluster, ClusterKind};
use trove_summarizer::SummaryReport;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format bookmarks output.
    pub fn format_bookmarks(&self, bookmarks: &[Bookmark], now: u64) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(bookmarks)?),
            OutputFormat::Table => Ok(self.format_bookmarks_table(bookmarks, now)),
            OutputFormat::Quiet => Ok(join_ids(bookmarks.iter().map(|b| b.id.to_string()))),
        }
    }

    /// Format a single bookmark.
    pub fn format_bookmark(&self, bookmark: &Bookmark, now: u64) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(bookmark)?),
            _ => self.format_bookmarks(std::slice::from_ref(bookmark), now),
        }
    }

    fn format_bookmarks_table(&self, bookmarks: &[Bookmark], now: u64) -> String {
        if bookmarks.is_empty() {
            return self.colorize("No bookmarks found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Title", "Domain", "Categories", "Flags", "Saved"]);

        for bookmark in bookmarks {
            builder.push_record([
                bookmark.id.short(),
                truncate(&bookmark.title, 48),
                bookmark.domain.clone(),
                bookmark.categories.join(", "),
                flags(bookmark),
                format_age(bookmark.created_at, now),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format clusters output.
    pub fn format_clusters(&self, clusters: &[Cluster]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(clusters)?),
            OutputFormat::Table => Ok(self.format_clusters_table(clusters)),
            OutputFormat::Quiet => Ok(join_ids(clusters.iter().map(|c| c.id.clone()))),
        }
    }

    fn format_clusters_table(&self, clusters: &[Cluster]) -> String {
        if clusters.is_empty() {
            return self.colorize("No clusters found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Cluster", "Kind", "Members", "Description"]);

        for cluster in clusters {
            let kind = match cluster.kind {
                ClusterKind::Date => "date",
                ClusterKind::Category => "category",
            };
            builder.push_record([
                cluster.title.clone(),
                kind.to_string(),
                cluster.len().to_string(),
                cluster.description.clone(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the result of a summary run.
    pub fn format_summary(&self, report: &SummaryReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "artifact": report.artifact,
                "summary": report.summary,
                "requested": report.requested,
                "contributed": report.contributed,
            }))?),
            OutputFormat::Quiet => Ok(report.artifact.id.to_string()),
            OutputFormat::Table => {
                let mut out = String::new();
                out.push_str(&self.success(&format!(
                    "{} ({})",
                    report.artifact.title, report.artifact.id
                )));
                out.push_str("\n\n");
                out.push_str(&report.summary.summary_text);
                out.push('\n');
                if !report.summary.key_points.is_empty() {
                    out.push_str(&format!("\n{}\n", self.colorize("Key points:", "cyan")));
                    for point in &report.summary.key_points {
                        out.push_str(&format!("  - {}\n", point));
                    }
                }
                out.push('\n');
                let skipped = report.requested - report.contributed;
                if skipped > 0 {
                    out.push_str(&self.warning(&format!(
                        "{} article(s) could not be read and were left out",
                        skipped
                    )));
                    out.push('\n');
                }
                out.push_str(&self.info(&format!(
                    "{}, {} words read, about {} min to read, sentiment {}",
                    report, report.summary.words_processed,
                    report.summary.estimated_reading_minutes, report.summary.sentiment
                )));
                Ok(out)
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn join_ids(ids: impl Iterator<Item = String>) -> String {
    ids.collect::<Vec<_>>().join("\n")
}

fn flags(bookmark: &Bookmark) -> String {
    let mut flags = String::new();
    if bookmark.is_summary() {
        flags.push('S');
    }
    if bookmark.is_read {
        flags.push('R');
    }
    if bookmark.is_favorite {
        flags.push('★');
    }
    flags
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Relative age such as `today` or `3d ago`.
pub fn format_age(created_at: u64, now: u64) -> String {
    match age_in_days(created_at, now) {
        days if days <= 0 => "today".to_string(),
        1 => "yesterday".to_string(),
        days => format!("{}d ago", days),
    }
}
