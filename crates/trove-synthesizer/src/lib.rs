//! Trove Cluster Synthesizer
//!
//! Groups bookmarks into derived clusters:
//!
//! - **Date**: six recency buckets (today through older)
//! - **Category**: shared tags, at least two members each
//! - **Auto**: both families together, largest first
//!
//! A bookmark may sit in several clusters at once. Summary artifacts carry
//! their sources' categories and newest date, so they land in the same
//! clusters as the articles they summarize.

#![warn(missing_docs)]

pub mod engine;
pub mod observer;
pub mod palette;

pub use engine::{ClusterEngine, MIN_CATEGORY_MEMBERS};
pub use observer::{ClusterEvent, ClusterObserver, NoopObserver, RecordingObserver, TracingObserver};
pub use palette::{color_for, PALETTE};
