//! Explicit bookmark filter
//!
//! Every recognised option is a typed field; unset fields do not filter.

use crate::bookmark::Bookmark;
use crate::cluster::age_in_days;
use serde::{Deserialize, Serialize};

/// Recency window, aligned with the date bucket thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    /// Age of 0 days
    Today,
    /// Age of at most 7 days
    Week,
    /// Age of at most 30 days
    Month,
    /// Age of at most 90 days
    Quarter,
}

impl DateRange {
    /// Largest day age included in the range
    pub fn max_age_days(&self) -> i64 {
        match self {
            DateRange::Today => 0,
            DateRange::Week => 7,
            DateRange::Month => 30,
            DateRange::Quarter => 90,
        }
    }

    /// Whether a creation time falls inside the range
    pub fn contains(&self, created_at: u64, now: u64) -> bool {
        age_in_days(created_at, now) <= self.max_age_days()
    }
}

/// Query criteria for listing bookmarks; all set fields must match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkFilter {
    /// Only read (true) or unread (false) bookmarks
    pub is_read: Option<bool>,

    /// Only favorites (true) or non-favorites (false)
    pub is_favorite: Option<bool>,

    /// Bookmark must carry at least one of these (case-insensitive)
    pub categories: Option<Vec<String>>,

    /// Recency window
    pub date_range: Option<DateRange>,

    /// Case-insensitive substring of title, URL or content
    pub search_query: Option<String>,
}

impl BookmarkFilter {
    /// Whether a bookmark satisfies every set criterion at time `now`
    pub fn matches(&self, bookmark: &Bookmark, now: u64) -> bool {
        if let Some(is_read) = self.is_read {
            if bookmark.is_read != is_read {
                return false;
            }
        }
        if let Some(is_favorite) = self.is_favorite {
            if bookmark.is_favorite != is_favorite {
                return false;
            }
        }
        if let Some(categories) = &self.categories {
            if !categories.is_empty() && !categories.iter().any(|c| bookmark.has_category(c)) {
                return false;
            }
        }
        if let Some(range) = self.date_range {
            if !range.contains(bookmark.created_at, now) {
                return false;
            }
        }
        if let Some(query) = &self.search_query {
            let needle = query.trim().to_lowercase();
            if !needle.is_empty() {
                let hit = bookmark.title.to_lowercase().contains(&needle)
                    || bookmark.url.to_lowercase().contains(&needle)
                    || bookmark
                        .content
                        .as_deref()
                        .map(|c| c.to_lowercase().contains(&needle))
                        .unwrap_or(false);
                if !hit {
                    return false;
                }
            }
        }
        true
    }
}
