//! Summary value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reading speed used for `estimated_reading_minutes`
pub const WORDS_PER_MINUTE: usize = 200;

/// Overall tone of the summarized material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Favourable
    Positive,
    /// Balanced or factual
    #[default]
    Neutral,
    /// Unfavourable
    Negative,
}

impl Sentiment {
    /// Parse a model-supplied value, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured AI summary of one or more articles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// The summary prose
    pub summary_text: String,
    /// Key takeaways, in order (may be empty)
    pub key_points: Vec<String>,
    /// Suggested topic tags (informational only)
    pub categories: Vec<String>,
    /// Overall tone
    pub sentiment: Sentiment,
    /// Sum of the source articles' word counts
    pub words_processed: usize,
    /// `ceil(summary words / 200)`
    pub estimated_reading_minutes: usize,
}

/// Reading time for a piece of text, rounded up
///
/// # Examples
///
/// ```
/// use trove_domain::summary::reading_minutes;
///
/// assert_eq!(reading_minutes(""), 0);
/// assert_eq!(reading_minutes("one two three"), 1);
/// assert_eq!(reading_minutes(&"w ".repeat(201)), 2);
/// ```
pub fn reading_minutes(text: &str) -> usize {
    text.split_whitespace().count().div_ceil(WORDS_PER_MINUTE)
}

/// Requested summary shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStyle {
    /// A short paragraph
    Brief,
    /// Several paragraphs
    #[default]
    Detailed,
    /// A bulleted list
    BulletPoints,
}

impl SummaryStyle {
    /// Instruction fragment for the prompt
    pub fn instruction(&self) -> &'static str {
        match self {
            SummaryStyle::Brief => "Write one concise paragraph capturing the essential points.",
            SummaryStyle::Detailed => {
                "Write a thorough summary in several paragraphs covering the main arguments, evidence and conclusions."
            }
            SummaryStyle::BulletPoints => {
                "Write the summary as a bulleted list, one line per point, each starting with \"- \"."
            }
        }
    }
}

/// Options for a summarization request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// Shape of the summary
    pub style: SummaryStyle,
    /// Target upper bound on summary length
    pub max_words: usize,
    /// Whether to ask for key points
    pub include_key_points: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            style: SummaryStyle::Detailed,
            max_words: 300,
            include_key_points: true,
        }
    }
}
