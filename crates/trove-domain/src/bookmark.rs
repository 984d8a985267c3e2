//! Bookmark module - the saved URL and everything derived from it

use crate::category;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds in one day
pub const DAY_MILLIS: u64 = 86_400_000;

/// URL scheme reserved for summary artifacts at the storage boundary
pub const SUMMARY_URL_SCHEME: &str = "summary:";

/// Domain recorded on summary artifacts
pub const SUMMARY_DOMAIN: &str = "trove.summary";

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Unique identifier for a bookmark based on UUIDv7
///
/// UUIDv7 gives chronological sortability, so ids issued later compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookmarkId(u128);

impl BookmarkId {
    /// Generate a new UUIDv7-based BookmarkId
    ///
    /// # Examples
    ///
    /// ```
    /// use trove_domain::BookmarkId;
    ///
    /// let id = BookmarkId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a BookmarkId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a BookmarkId from its hyphenated UUID form
    ///
    /// # Examples
    ///
    /// ```
    /// use trove_domain::BookmarkId;
    ///
    /// let id = BookmarkId::new();
    /// let parsed = BookmarkId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s.trim())
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid bookmark id '{}': {}", s, e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Short prefix used in tables
    pub fn short(&self) -> String {
        self.to_string()[..8].to_string()
    }
}

impl Default for BookmarkId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl Serialize for BookmarkId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BookmarkId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        BookmarkId::from_string(&s).map_err(serde::de::Error::custom)
    }
}

/// Discriminates user-saved links from synthesized summary artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookmarkKind {
    /// A URL saved by the user
    #[default]
    Link,
    /// An AI summary written back by the summary pipeline
    Summary,
}

impl BookmarkKind {
    /// Infer the kind from a stored URL (rows that predate the kind column)
    pub fn from_url(url: &str) -> Self {
        if url.starts_with(SUMMARY_URL_SCHEME) {
            BookmarkKind::Summary
        } else {
            BookmarkKind::Link
        }
    }

    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BookmarkKind::Link => "link",
            BookmarkKind::Summary => "summary",
        }
    }

    /// Parse the storage representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "link" => Some(BookmarkKind::Link),
            "summary" => Some(BookmarkKind::Summary),
            _ => None,
        }
    }
}

/// A saved bookmark, owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Unique identifier
    pub id: BookmarkId,

    /// Owning user
    pub owner: String,

    /// Link or summary artifact
    pub kind: BookmarkKind,

    /// Saved URL (reserved `summary:` form for artifacts)
    pub url: String,

    /// Display title
    pub title: String,

    /// Stored body text (the summary text for artifacts)
    pub content: Option<String>,

    /// Host the URL points at
    pub domain: String,

    /// Whether the user has read it
    pub is_read: bool,

    /// Whether the user starred it
    pub is_favorite: bool,

    /// Tags in insertion order
    pub categories: Vec<String>,

    /// Creation time (ms since epoch)
    pub created_at: u64,

    /// Last modification time (ms since epoch)
    pub updated_at: u64,
}

impl Bookmark {
    /// True for AI summary artifacts
    pub fn is_summary(&self) -> bool {
        self.kind == BookmarkKind::Summary
    }

    /// True if the bookmark points at something a fetcher can retrieve
    pub fn is_browsable(&self) -> bool {
        self.kind == BookmarkKind::Link && has_web_scheme(&self.url)
    }

    /// Whether the bookmark carries a category (trimmed, case-insensitive)
    pub fn has_category(&self, name: &str) -> bool {
        let wanted = category::key(name);
        self.categories.iter().any(|c| category::key(c) == wanted)
    }
}

/// Payload for creating a bookmark
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewBookmark {
    /// Link or summary artifact
    pub kind: BookmarkKind,
    /// URL to save
    pub url: String,
    /// Title (derived from the URL when empty)
    pub title: String,
    /// Optional stored body
    pub content: Option<String>,
    /// Tags
    pub categories: Vec<String>,
    /// Initial read flag
    pub is_read: bool,
    /// Initial favorite flag
    pub is_favorite: bool,
}

impl NewBookmark {
    /// A plain link bookmark
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the categories
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Set the stored body
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Domain recorded for this payload
    pub fn domain(&self) -> String {
        match self.kind {
            BookmarkKind::Summary => SUMMARY_DOMAIN.to_string(),
            BookmarkKind::Link => domain_from_url(&self.url),
        }
    }
}

/// Partial update of a bookmark; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkUpdate {
    /// New title
    pub title: Option<String>,
    /// New read flag
    pub is_read: Option<bool>,
    /// New favorite flag
    pub is_favorite: Option<bool>,
    /// Replacement category list
    pub categories: Option<Vec<String>>,
}

impl BookmarkUpdate {
    /// Whether the update changes anything
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.is_read.is_none()
            && self.is_favorite.is_none()
            && self.categories.is_none()
    }
}

/// `http://` or `https://`, in any letter case
pub fn has_web_scheme(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once("://") else {
        return false;
    };
    scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
}

/// Extract the host from a URL, without a leading `www.`
///
/// # Examples
///
/// ```
/// use trove_domain::bookmark::domain_from_url;
///
/// assert_eq!(domain_from_url("https://www.example.com/a?b=c"), "example.com");
/// assert_eq!(domain_from_url("not a url"), "");
/// ```
pub fn domain_from_url(url: &str) -> String {
    let Some((_, rest)) = url.split_once("://") else {
        return String::new();
    };
    let authority = rest
        .split(|c| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or("");
    let host = authority.rsplit('@').next().unwrap_or("");
    let host = host.split(':').next().unwrap_or("").to_lowercase();
    host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
}
