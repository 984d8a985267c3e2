//! Property tests for the cluster engine

use proptest::prelude::*;
use std::sync::Arc;
use trove_domain::bookmark::DAY_MILLIS;
use trove_domain::{
    Bookmark, BookmarkId, BookmarkKind, ClusterKind, ClusterStrategy, DateBucket,
};
use trove_synthesizer::{ClusterEngine, NoopObserver};

const NOW: u64 = 1_700_000_000_000;
const TAGS: [&str; 5] = ["rust", "Rust", "go", "ai", "web"];

fn make(id: u128, age_ms: u64, tags: Vec<usize>) -> Bookmark {
    let created_at = NOW.saturating_sub(age_ms);
    Bookmark {
        id: BookmarkId::from_value(id),
        owner: "alice".to_string(),
        kind: BookmarkKind::Link,
        url: format!("https://example.com/{}", id),
        title: String::new(),
        content: None,
        domain: "example.com".to_string(),
        is_read: false,
        is_favorite: false,
        categories: tags.into_iter().map(|i| TAGS[i].to_string()).collect(),
        created_at,
        updated_at: created_at,
    }
}

fn bookmarks() -> impl Strategy<Value = Vec<Bookmark>> {
    prop::collection::vec(
        (0u64..200 * DAY_MILLIS, prop::collection::vec(0usize..TAGS.len(), 0..3)),
        0..25,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (age, tags))| make(i as u128 + 1, age, tags))
            .collect()
    })
}

fn engine() -> ClusterEngine {
    ClusterEngine::with_observer(Arc::new(NoopObserver))
}

proptest! {
    #[test]
    fn date_bucketing_is_total_and_deterministic(age in 0u64..400 * DAY_MILLIS) {
        let created_at = NOW - age;
        let first = DateBucket::for_timestamp(created_at, NOW);
        prop_assert_eq!(first, DateBucket::for_timestamp(created_at, NOW));
        prop_assert!(DateBucket::ALL.contains(&first));
    }

    #[test]
    fn date_clusters_partition_the_input(input in bookmarks()) {
        let clusters = engine().cluster(&input, ClusterStrategy::Date, NOW);
        let total: usize = clusters.iter().map(|c| c.len()).sum();
        prop_assert_eq!(total, input.len());
        for b in &input {
            let owners = clusters.iter().filter(|c| c.contains(b.id)).count();
            prop_assert_eq!(owners, 1);
        }
    }

    #[test]
    fn category_clusters_have_two_members(input in bookmarks()) {
        for cluster in engine().cluster(&input, ClusterStrategy::Category, NOW) {
            prop_assert!(cluster.len() >= 2);
            prop_assert_eq!(cluster.kind, ClusterKind::Category);
            let key = cluster.metadata.category_key.clone().unwrap();
            for id in &cluster.member_ids {
                let b = input.iter().find(|b| b.id == *id).unwrap();
                prop_assert!(b.has_category(&key));
            }
        }
    }

    #[test]
    fn members_are_newest_first(input in bookmarks()) {
        for cluster in engine().cluster(&input, ClusterStrategy::Auto, NOW) {
            let times: Vec<u64> = cluster
                .member_ids
                .iter()
                .map(|id| input.iter().find(|b| b.id == *id).unwrap().created_at)
                .collect();
            prop_assert!(times.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn auto_is_union_sorted_by_size(input in bookmarks()) {
        let auto = engine().cluster(&input, ClusterStrategy::Auto, NOW);
        let date = engine().cluster(&input, ClusterStrategy::Date, NOW);
        let category = engine().cluster(&input, ClusterStrategy::Category, NOW);

        prop_assert_eq!(auto.len(), date.len() + category.len());
        prop_assert!(auto.windows(2).all(|w| w[0].len() >= w[1].len()));
    }

    #[test]
    fn clustering_is_deterministic(input in bookmarks()) {
        let a = engine().cluster(&input, ClusterStrategy::Auto, NOW);
        let b = engine().cluster(&input, ClusterStrategy::Auto, NOW);
        prop_assert_eq!(a, b);
    }
}

#[test]
fn removing_a_member_drops_the_cluster() {
    let a = make(1, 0, vec![2]);
    let b = make(2, DAY_MILLIS, vec![2]);

    let before = engine().cluster(&[a.clone(), b], ClusterStrategy::Category, NOW);
    assert_eq!(before.len(), 1);

    let after = engine().cluster(&[a], ClusterStrategy::Category, NOW);
    assert!(after.is_empty());
}
