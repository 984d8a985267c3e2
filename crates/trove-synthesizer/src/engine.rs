//! Cluster Synthesis Engine
//!
//! A pure function of `(bookmarks, strategy, now)`. Clusters are derived on
//! every call and never stored.

use crate::observer::{ClusterObserver, TracingObserver};
use crate::palette::{color_for, CATEGORY_ICON};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;
use trove_domain::category;
use trove_domain::{
    Bookmark, BookmarkId, Cluster, ClusterKind, ClusterMetadata, ClusterStrategy, DateBucket,
};

/// Fewest members a category cluster may have
pub const MIN_CATEGORY_MEMBERS: usize = 2;

/// Partitions bookmarks into clusters
#[derive(Clone)]
pub struct ClusterEngine {
    observer: Arc<dyn ClusterObserver>,
}

impl Default for ClusterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterEngine {
    /// Engine that reports to `tracing`
    pub fn new() -> Self {
        Self::with_observer(Arc::new(TracingObserver))
    }

    /// Engine that reports to a custom observer
    pub fn with_observer(observer: Arc<dyn ClusterObserver>) -> Self {
        Self { observer }
    }

    /// Compute clusters for `strategy` as of `now` (ms since epoch)
    ///
    /// A bookmark id repeated in the input is considered once.
    ///
    /// # Examples
    ///
    /// ```
    /// use trove_domain::ClusterStrategy;
    /// use trove_synthesizer::ClusterEngine;
    ///
    /// let clusters = ClusterEngine::new().cluster(&[], ClusterStrategy::Auto, 0);
    /// assert!(clusters.is_empty());
    /// ```
    pub fn cluster(&self, bookmarks: &[Bookmark], strategy: ClusterStrategy, now: u64) -> Vec<Cluster> {
        let unique = unique_by_id(bookmarks);

        let mut clusters = match strategy {
            ClusterStrategy::Date => self.date_clusters(&unique, now),
            ClusterStrategy::Category => self.category_clusters(&unique, now),
            ClusterStrategy::Auto => {
                let mut all = self.date_clusters(&unique, now);
                all.extend(self.category_clusters(&unique, now));
                // stable: equal sizes keep date-before-category order
                all.sort_by(|a, b| b.len().cmp(&a.len()));
                all
            }
        };

        for (index, cluster) in clusters.iter_mut().enumerate() {
            cluster.color = color_for(index).to_string();
            self.observer
                .cluster_emitted(&cluster.id, cluster.kind, cluster.len());
        }

        debug!(
            ?strategy,
            bookmarks = unique.len(),
            clusters = clusters.len(),
            "Clustering complete"
        );
        clusters
    }

    fn date_clusters(&self, bookmarks: &[&Bookmark], now: u64) -> Vec<Cluster> {
        let mut buckets: HashMap<DateBucket, Vec<&Bookmark>> = HashMap::new();
        for bookmark in bookmarks {
            let bucket = DateBucket::for_timestamp(bookmark.created_at, now);
            self.observer.bookmark_bucketed(bookmark.id, bucket);
            buckets.entry(bucket).or_default().push(bookmark);
        }

        DateBucket::ALL
            .iter()
            .filter_map(|bucket| {
                let members = buckets.remove(bucket)?;
                let count = members.len();
                Some(build_cluster(
                    format!("date:{}", bucket.key()),
                    bucket.title().to_string(),
                    format!("{} saved {}", plural(count), bucket.phrase()),
                    ClusterKind::Date,
                    bucket.icon(),
                    members,
                    Some(*bucket),
                    None,
                ))
            })
            .collect()
    }

    fn category_clusters(&self, bookmarks: &[&Bookmark], _now: u64) -> Vec<Cluster> {
        struct Group<'a> {
            display: String,
            members: Vec<&'a Bookmark>,
            seen: HashSet<BookmarkId>,
        }

        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Group<'_>> = HashMap::new();

        for bookmark in bookmarks {
            for raw in &bookmark.categories {
                let Some(display) = category::normalize(raw) else {
                    continue;
                };
                let key = category::key(&display);
                let group = groups.entry(key.clone()).or_insert_with(|| {
                    order.push(key.clone());
                    Group {
                        display,
                        members: Vec::new(),
                        seen: HashSet::new(),
                    }
                });
                if group.seen.insert(bookmark.id) {
                    group.members.push(bookmark);
                }
            }
        }

        let mut clusters: Vec<Cluster> = Vec::new();
        for key in order {
            let Some(group) = groups.remove(&key) else {
                continue;
            };
            let count = group.members.len();
            if count < MIN_CATEGORY_MEMBERS {
                self.observer.category_suppressed(&group.display, count);
                continue;
            }
            clusters.push(build_cluster(
                format!("category:{}", key),
                group.display.clone(),
                format!("{} tagged {}", plural(count), group.display),
                ClusterKind::Category,
                CATEGORY_ICON,
                group.members,
                None,
                Some(key),
            ));
        }

        clusters.sort_by(|a, b| b.len().cmp(&a.len()));
        clusters
    }
}

fn unique_by_id(bookmarks: &[Bookmark]) -> Vec<&Bookmark> {
    let mut seen = HashSet::new();
    bookmarks.iter().filter(|b| seen.insert(b.id)).collect()
}

fn plural(count: usize) -> String {
    if count == 1 {
        "1 bookmark".to_string()
    } else {
        format!("{} bookmarks", count)
    }
}

#[allow(clippy::too_many_arguments)]
fn build_cluster(
    id: String,
    title: String,
    description: String,
    kind: ClusterKind,
    icon: &str,
    mut members: Vec<&Bookmark>,
    bucket: Option<DateBucket>,
    category_key: Option<String>,
) -> Cluster {
    // newest first; ids break ties so output is deterministic
    members.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    let newest_at = members.first().map(|b| b.created_at).unwrap_or(0);
    let oldest_at = members.last().map(|b| b.created_at).unwrap_or(0);

    Cluster {
        id,
        title,
        description,
        kind,
        member_ids: members.iter().map(|b| b.id).collect(),
        color: String::new(),
        icon: icon.to_string(),
        metadata: ClusterMetadata {
            member_count: members.len(),
            newest_at,
            oldest_at,
            bucket,
            category_key,
        },
    }
}
