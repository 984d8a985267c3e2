//! Cluster module - derived, never-persisted groupings of bookmarks
//!
//! The date bucketing rule lives here because both the cluster engine and
//! the store's date-range filter must agree on it.

use crate::bookmark::{BookmarkId, DAY_MILLIS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole days between `created_at` and `now`, rounded down
///
/// Negative when `created_at` lies in the future.
pub fn age_in_days(created_at: u64, now: u64) -> i64 {
    let diff = now as i128 - created_at as i128;
    diff.div_euclid(DAY_MILLIS as i128) as i64
}

/// One of the six fixed recency buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateBucket {
    /// 0 days old
    Today,
    /// 1 day old
    Yesterday,
    /// 2 to 7 days old
    ThisWeek,
    /// 8 to 30 days old
    ThisMonth,
    /// 31 to 90 days old
    ThisQuarter,
    /// More than 90 days old
    Older,
}

impl DateBucket {
    /// Emission order of date clusters
    pub const ALL: [DateBucket; 6] = [
        DateBucket::Today,
        DateBucket::Yesterday,
        DateBucket::ThisWeek,
        DateBucket::ThisMonth,
        DateBucket::ThisQuarter,
        DateBucket::Older,
    ];

    /// Map a day age to its bucket; ages below zero count as today
    ///
    /// # Examples
    ///
    /// ```
    /// use trove_domain::DateBucket;
    ///
    /// assert_eq!(DateBucket::for_age_days(0), DateBucket::Today);
    /// assert_eq!(DateBucket::for_age_days(7), DateBucket::ThisWeek);
    /// assert_eq!(DateBucket::for_age_days(91), DateBucket::Older);
    /// ```
    pub fn for_age_days(days: i64) -> Self {
        match days {
            i64::MIN..=0 => DateBucket::Today,
            1 => DateBucket::Yesterday,
            2..=7 => DateBucket::ThisWeek,
            8..=30 => DateBucket::ThisMonth,
            31..=90 => DateBucket::ThisQuarter,
            _ => DateBucket::Older,
        }
    }

    /// Bucket of a timestamp relative to `now`
    pub fn for_timestamp(created_at: u64, now: u64) -> Self {
        Self::for_age_days(age_in_days(created_at, now))
    }

    /// Stable key used in cluster ids
    pub fn key(&self) -> &'static str {
        match self {
            DateBucket::Today => "today",
            DateBucket::Yesterday => "yesterday",
            DateBucket::ThisWeek => "this-week",
            DateBucket::ThisMonth => "this-month",
            DateBucket::ThisQuarter => "this-quarter",
            DateBucket::Older => "older",
        }
    }

    /// Human title
    pub fn title(&self) -> &'static str {
        match self {
            DateBucket::Today => "Today",
            DateBucket::Yesterday => "Yesterday",
            DateBucket::ThisWeek => "This Week",
            DateBucket::ThisMonth => "This Month",
            DateBucket::ThisQuarter => "This Quarter",
            DateBucket::Older => "Older",
        }
    }

    /// Phrase used in descriptions ("saved today")
    pub fn phrase(&self) -> &'static str {
        match self {
            DateBucket::Today => "today",
            DateBucket::Yesterday => "yesterday",
            DateBucket::ThisWeek => "this week",
            DateBucket::ThisMonth => "this month",
            DateBucket::ThisQuarter => "this quarter",
            DateBucket::Older => "more than three months ago",
        }
    }

    /// Icon name for renderers
    pub fn icon(&self) -> &'static str {
        match self {
            DateBucket::Today => "sun",
            DateBucket::Yesterday => "clock",
            DateBucket::ThisWeek => "calendar",
            DateBucket::ThisMonth => "calendar-days",
            DateBucket::ThisQuarter => "calendar-range",
            DateBucket::Older => "archive",
        }
    }
}

impl fmt::Display for DateBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which family a cluster belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterKind {
    /// Grouped by recency bucket
    Date,
    /// Grouped by shared category
    Category,
}

/// Which partitioning to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClusterStrategy {
    /// Date buckets only
    Date,
    /// Shared categories only
    Category,
    /// Union of both, largest first
    #[default]
    Auto,
}

/// Facts about a cluster's members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterMetadata {
    /// Number of members
    pub member_count: usize,
    /// Newest member creation time
    pub newest_at: u64,
    /// Oldest member creation time
    pub oldest_at: u64,
    /// Bucket for date clusters
    pub bucket: Option<DateBucket>,
    /// Grouping key for category clusters
    pub category_key: Option<String>,
}

/// A derived grouping of bookmarks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// `date:<bucket>` or `category:<key>`
    pub id: String,
    /// Display title
    pub title: String,
    /// One-line description
    pub description: String,
    /// Date or category
    pub kind: ClusterKind,
    /// Members, newest first
    pub member_ids: Vec<BookmarkId>,
    /// Palette color
    pub color: String,
    /// Icon name
    pub icon: String,
    /// Member facts
    pub metadata: ClusterMetadata,
}

impl Cluster {
    /// Number of members
    pub fn len(&self) -> usize {
        self.member_ids.len()
    }

    /// Whether the cluster has no members
    pub fn is_empty(&self) -> bool {
        self.member_ids.is_empty()
    }

    /// Whether a bookmark belongs to the cluster
    pub fn contains(&self, id: BookmarkId) -> bool {
        self.member_ids.contains(&id)
    }
}
