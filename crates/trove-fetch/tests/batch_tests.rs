//! Integration tests for batch extraction over a scripted source

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use trove_domain::FailureReason;
use trove_fetch::{
    BatchExtractor, ExtractionTarget, FetchConfig, MockSource, RawDocument, WebFetcher,
};

fn article(topic: &str) -> String {
    format!(
        "<html><head><title>{topic}</title></head><body><nav>Home | About</nav>\
         <article><p>{}</p></article><footer>(c) 2024</footer></body></html>",
        format!("{topic} deserves a careful explanation here. ").repeat(12)
    )
}

fn extractor(source: MockSource, timeout: Duration) -> BatchExtractor<WebFetcher<MockSource>> {
    let fetcher = WebFetcher::new(Arc::new(source), FetchConfig::default()).with_timeout(timeout);
    BatchExtractor::new(Arc::new(fetcher))
}

fn targets(urls: &[&str]) -> Vec<ExtractionTarget> {
    urls.iter()
        .map(|url| ExtractionTarget::new(*url, "bookmark"))
        .collect()
}

#[tokio::test]
async fn test_partial_failure_keeps_order_and_successes() {
    let source = MockSource::new()
        .with_html("https://ok.example", article("Ownership"))
        .with_delayed(
            "https://slow.example",
            RawDocument::html(article("Slow")),
            Duration::from_secs(5),
        )
        .with_html("https://ok2.example", article("Borrowing"));
    let batch = extractor(source, Duration::from_millis(100))
        .extract_all(
            &targets(&["https://ok.example", "https://slow.example", "https://ok2.example"]),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(batch.attempted(), 3);
    assert_eq!(batch.successes().len(), 2);
    assert_eq!(batch.outcomes()[1].reason(), Some(FailureReason::Timeout));

    let contents = batch.into_contents().expect("two articles survived");
    let titles: Vec<_> = contents.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Ownership", "Borrowing"]);
    assert!(contents.iter().all(|c| !c.text.contains("Home")));
}

#[tokio::test]
async fn test_all_failed_reports_reasons() {
    let source = MockSource::new()
        .with_document("https://private.example", RawDocument::status(403))
        .with_document("https://gone.example", RawDocument::status(410));
    let batch = extractor(source, Duration::from_secs(1))
        .extract_all(
            &targets(&["https://private.example", "https://gone.example"]),
            &CancellationToken::new(),
        )
        .await;

    let err = batch.into_contents().unwrap_err();
    assert_eq!(err.attempted, 2);
    assert_eq!(
        err.reasons,
        vec![FailureReason::AccessDenied, FailureReason::NotFound]
    );
}

#[tokio::test]
async fn test_fetches_run_concurrently() {
    let delay = Duration::from_millis(200);
    let source = MockSource::new()
        .with_delayed("https://a.example", RawDocument::html(article("A")), delay)
        .with_delayed("https://b.example", RawDocument::html(article("B")), delay)
        .with_delayed("https://c.example", RawDocument::html(article("C")), delay);

    let started = Instant::now();
    let batch = extractor(source, Duration::from_secs(5))
        .extract_all(
            &targets(&["https://a.example", "https://b.example", "https://c.example"]),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(batch.successes().len(), 3);
    assert!(
        started.elapsed() < delay * 3,
        "three delayed fetches should overlap"
    );
}

#[tokio::test]
async fn test_cancellation_resolves_pending_fetches() {
    let source = MockSource::new()
        .with_html("https://fast.example", article("Fast"))
        .with_delayed(
            "https://slow.example",
            RawDocument::html(article("Slow")),
            Duration::from_secs(10),
        );
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let batch = extractor(source, Duration::from_secs(30))
        .extract_all(&targets(&["https://fast.example", "https://slow.example"]), &cancel)
        .await;

    assert!(batch.outcomes()[0].is_success());
    assert_eq!(batch.outcomes()[1].reason(), Some(FailureReason::Cancelled));
}

#[tokio::test]
async fn test_cancelled_before_start() {
    let source = MockSource::new().with_html("https://a.example", article("A"));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let batch = extractor(source, Duration::from_secs(1))
        .extract_all(&targets(&["https://a.example"]), &cancel)
        .await;

    assert_eq!(batch.outcomes()[0].reason(), Some(FailureReason::Cancelled));
}
