//! Clustering observers
//!
//! The engine reports what it decided through an injected observer instead
//! of logging directly, so tests can assert on the decisions.

use std::sync::Mutex;
use tracing::{debug, trace};
use trove_domain::{BookmarkId, ClusterKind, DateBucket};

/// Receives structured clustering events
///
/// All methods default to no-ops.
pub trait ClusterObserver: Send + Sync {
    /// A bookmark was assigned to a date bucket
    fn bookmark_bucketed(&self, _id: BookmarkId, _bucket: DateBucket) {}

    /// A category had too few members to form a cluster
    fn category_suppressed(&self, _name: &str, _count: usize) {}

    /// A cluster was produced
    fn cluster_emitted(&self, _id: &str, _kind: ClusterKind, _members: usize) {}
}

/// Logs events with `tracing` (the default observer)
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ClusterObserver for TracingObserver {
    fn bookmark_bucketed(&self, id: BookmarkId, bucket: DateBucket) {
        trace!(%id, %bucket, "Bookmark bucketed");
    }

    fn category_suppressed(&self, name: &str, count: usize) {
        debug!(category = name, count, "Category below cluster minimum");
    }

    fn cluster_emitted(&self, id: &str, kind: ClusterKind, members: usize) {
        debug!(cluster = id, ?kind, members, "Cluster emitted");
    }
}

/// Ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ClusterObserver for NoopObserver {}

/// One recorded event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterEvent {
    /// See [`ClusterObserver::bookmark_bucketed`]
    Bucketed(BookmarkId, DateBucket),
    /// See [`ClusterObserver::category_suppressed`]
    Suppressed(String, usize),
    /// See [`ClusterObserver::cluster_emitted`]
    Emitted(String, ClusterKind, usize),
}

/// Collects events for assertions
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ClusterEvent>>,
}

impl RecordingObserver {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Events so far, in order
    pub fn events(&self) -> Vec<ClusterEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Suppressed categories with their counts
    pub fn suppressed(&self) -> Vec<(String, usize)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ClusterEvent::Suppressed(name, count) => Some((name, count)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ClusterEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl ClusterObserver for RecordingObserver {
    fn bookmark_bucketed(&self, id: BookmarkId, bucket: DateBucket) {
        self.push(ClusterEvent::Bucketed(id, bucket));
    }

    fn category_suppressed(&self, name: &str, count: usize) {
        self.push(ClusterEvent::Suppressed(name.to_string(), count));
    }

    fn cluster_emitted(&self, id: &str, kind: ClusterKind, members: usize) {
        self.push(ClusterEvent::Emitted(id.to_string(), kind, members));
    }
}
