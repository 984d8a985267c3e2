//! End-to-end tests: store, fetch, summarize, write, then re-cluster

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use trove_domain::bookmark::DAY_MILLIS;
use trove_domain::{
    now_millis, BookmarkFilter, BookmarkId, BookmarkStore, ClusterKind, ClusterStrategy,
    DateBucket, FailureReason, NewBookmark, SummaryOptions,
};
use trove_fetch::{FetchConfig, MockSource, RawDocument, WebFetcher};
use trove_llm::MockProvider;
use trove_store::SqliteStore;
use trove_summarizer::{PipelineError, SummarizationClient, SummarizerConfig, SummaryPipeline};
use trove_synthesizer::{ClusterEngine, NoopObserver};

const KEY: Option<&str> = Some("sk-integration-key");

fn article(topic: &str) -> String {
    format!(
        "<html><head><title>{topic}</title></head><body><nav>Home</nav>\
         <article><p>{}</p></article></body></html>",
        format!("{topic} is explained at length in this article. ").repeat(12)
    )
}

fn setup(
    source: MockSource,
) -> (
    Arc<Mutex<SqliteStore>>,
    Arc<MockProvider>,
    SummaryPipeline<SqliteStore, Arc<MockProvider>, WebFetcher<MockSource>>,
) {
    let store = Arc::new(Mutex::new(SqliteStore::new(":memory:").unwrap()));
    let llm = Arc::new(MockProvider::new(
        r#"{"summaryText": "Two views on memory management.", "keyPoints": ["a", "b"],
            "categories": ["memory"], "sentiment": "neutral"}"#,
    ));
    let fetcher = WebFetcher::new(Arc::new(source), FetchConfig::default())
        .with_timeout(Duration::from_millis(200));
    let client = SummarizationClient::new(Arc::clone(&llm), SummarizerConfig::default());
    let pipeline = SummaryPipeline::new(Arc::clone(&store), Arc::new(fetcher), client);
    (store, llm, pipeline)
}

fn add(
    store: &Arc<Mutex<SqliteStore>>,
    url: &str,
    title: &str,
    categories: &[&str],
    created_at: u64,
) -> BookmarkId {
    store
        .lock()
        .unwrap()
        .create_bookmark(
            "alice",
            NewBookmark::link(url)
                .with_title(title)
                .with_categories(categories.iter().copied()),
            Some(created_at),
        )
        .unwrap()
        .id
}

#[tokio::test]
async fn test_artifact_metadata_and_clustering() {
    let now = now_millis();
    let t1 = now - 10 * DAY_MILLIS;
    let t2 = now - 3 * DAY_MILLIS;

    let source = MockSource::new()
        .with_html("https://one.example/gc", article("Garbage collection"))
        .with_html("https://two.example/own", article("Ownership"));
    let (store, _llm, pipeline) = setup(source);
    let s1 = add(&store, "https://one.example/gc", "GC", &["A", "B"], t1);
    let s2 = add(&store, "https://two.example/own", "Ownership", &["B", "C"], t2);

    let report = pipeline
        .summarize_bookmarks(
            "alice",
            &[s1, s2],
            &SummaryOptions::default(),
            KEY,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    let artifact = &report.artifact;
    assert_eq!(artifact.title, "Summary of 2 articles");
    assert_eq!(artifact.categories, vec!["ai-summary", "A", "B", "C"]);
    assert_eq!(artifact.created_at, t2);
    assert_eq!(report.to_string(), "summarized 2 of 2 articles");

    // Persisted form matches what the pipeline returned
    let stored = store
        .lock()
        .unwrap()
        .get_bookmark("alice", artifact.id)
        .unwrap()
        .unwrap();
    assert_eq!(&stored, artifact);

    let all = store
        .lock()
        .unwrap()
        .list_bookmarks("alice", &BookmarkFilter::default())
        .unwrap();
    assert_eq!(all.len(), 3);

    let engine = ClusterEngine::with_observer(Arc::new(NoopObserver));
    let clusters = engine.cluster(&all, ClusterStrategy::Auto, now);

    for key in ["a", "b", "c"] {
        let cluster = clusters
            .iter()
            .find(|c| c.kind == ClusterKind::Category && c.metadata.category_key.as_deref() == Some(key))
            .unwrap_or_else(|| panic!("missing category cluster {}", key));
        assert!(cluster.contains(artifact.id), "artifact not in {}", key);
    }

    // ai-summary has a single member and is suppressed
    assert!(clusters
        .iter()
        .all(|c| c.metadata.category_key.as_deref() != Some("ai-summary")));

    let week = clusters
        .iter()
        .find(|c| c.metadata.bucket == Some(DateBucket::ThisWeek))
        .unwrap();
    assert!(week.contains(artifact.id));
    assert!(week.contains(s2));
    assert!(!week.contains(s1));
}

#[tokio::test]
async fn test_partial_failure_proceeds_with_successes() {
    let now = now_millis();
    let source = MockSource::new()
        .with_html("https://ok.example", article("Lifetimes"))
        .with_delayed(
            "https://slow.example",
            RawDocument::html(article("Slow")),
            Duration::from_secs(5),
        )
        .with_html("https://ok2.example", article("Traits"));
    let (store, llm, pipeline) = setup(source);
    let ids = [
        add(&store, "https://ok.example", "Lifetimes", &["rust"], now),
        add(&store, "https://slow.example", "Slow", &["slow"], now),
        add(&store, "https://ok2.example", "Traits", &["rust"], now),
    ];

    let report = pipeline
        .summarize_bookmarks(
            "alice",
            &ids,
            &SummaryOptions::default(),
            KEY,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(report.requested, 3);
    assert_eq!(report.contributed, 2);
    assert_eq!(report.to_string(), "summarized 2 of 3 articles");
    // only contributing sources lend their categories
    assert_eq!(report.artifact.categories, vec!["ai-summary", "rust"]);
    assert_eq!(report.summary.words_processed, 2 * 12 * 8);

    let prompt = llm.last_prompt().unwrap();
    assert!(prompt.contains("### Article 1: Lifetimes"));
    assert!(prompt.contains("### Article 2: Traits"));
    assert!(!prompt.contains("Slow is explained"));
}

#[tokio::test]
async fn test_total_failure_creates_no_artifact() {
    let source = MockSource::new()
        .with_document("https://down.example", RawDocument::status(503))
        .with_document("https://pdf.example/file", RawDocument {
            status: 200,
            content_type: Some("application/pdf".to_string()),
            body: String::new(),
        });
    let (store, llm, pipeline) = setup(source);
    let now = now_millis();
    let ids = [
        add(&store, "https://down.example", "Down", &[], now),
        add(&store, "https://pdf.example/file", "Paper", &[], now),
    ];

    let err = pipeline
        .summarize_bookmarks(
            "alice",
            &ids,
            &SummaryOptions::default(),
            KEY,
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        PipelineError::ContentExtractionFailed {
            attempted: 2,
            reasons: vec![FailureReason::ServerError, FailureReason::UnsupportedFormat],
        }
    );
    assert_eq!(llm.call_count(), 0);
    let all = store
        .lock()
        .unwrap()
        .list_bookmarks("alice", &BookmarkFilter::default())
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_removing_source_recomputes_clusters() {
    let now = now_millis();
    let source = MockSource::new()
        .with_html("https://x.example", article("X"))
        .with_html("https://y.example", article("Y"));
    let (store, _llm, pipeline) = setup(source);
    let x = add(&store, "https://x.example", "X", &["solo"], now);
    let y = add(&store, "https://y.example", "Y", &["pair"], now);
    add(&store, "https://z.example", "Z", &["pair"], now);

    let report = pipeline
        .summarize_bookmarks(
            "alice",
            &[x, y],
            &SummaryOptions::default(),
            KEY,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    let engine = ClusterEngine::with_observer(Arc::new(NoopObserver));
    let snapshot = |store: &Arc<Mutex<SqliteStore>>| {
        store
            .lock()
            .unwrap()
            .list_bookmarks("alice", &BookmarkFilter::default())
            .unwrap()
    };

    let clusters = engine.cluster(&snapshot(&store), ClusterStrategy::Category, now);
    let solo = clusters
        .iter()
        .find(|c| c.metadata.category_key.as_deref() == Some("solo"))
        .unwrap();
    assert_eq!(solo.member_ids, vec![report.artifact.id, x]);

    store.lock().unwrap().delete_bookmark("alice", x).unwrap();
    let clusters = engine.cluster(&snapshot(&store), ClusterStrategy::Category, now);
    assert!(clusters
        .iter()
        .all(|c| c.metadata.category_key.as_deref() != Some("solo")));
    let pair = clusters
        .iter()
        .find(|c| c.metadata.category_key.as_deref() == Some("pair"))
        .unwrap();
    assert_eq!(pair.len(), 3);
}
