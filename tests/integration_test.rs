use async_trait::async_trait;
use news_ticker::{
    batch_sources, CountingWatchdog, FeedTransport, NewsAggregator, NewsSource, Result,
    SourceKind, TickerError, BATCH_COUNT, FETCH_LIMIT_PER_SOURCE, SOURCE_COUNT,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Serves canned feed bodies by URL; URLs with no body fail like a
/// connection error.
struct MockTransport {
    bodies: HashMap<String, String>,
}

#[async_trait]
impl FeedTransport for MockTransport {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| TickerError::General(format!("connection refused: {url}")))
    }
}

fn test_sources() -> Vec<NewsSource> {
    (0..SOURCE_COUNT)
        .map(|n| {
            let kind = if n == 3 {
                SourceKind::Wordpress
            } else {
                SourceKind::Standard
            };
            NewsSource::new(&format!("SRC {n}"), &format!("https://feeds.test/{n}"), kind)
        })
        .collect()
}

fn source_url(n: usize) -> String {
    format!("https://feeds.test/{n}")
}

fn feed(items: &[(&str, &str, &str)]) -> String {
    let mut body = String::from("<rss><channel>");
    for (title, link, date) in items {
        body.push_str(&format!(
            "<item><title>{title}</title><link>{link}</link><pubDate>{date}</pubDate></item>"
        ));
    }
    body.push_str("</channel></rss>");
    body
}

fn aggregator_with(
    bodies: HashMap<String, String>,
) -> (NewsAggregator, Arc<CountingWatchdog>) {
    let _ = tracing_subscriber::fmt().try_init();
    let watchdog = Arc::new(CountingWatchdog::new());
    let transport = Arc::new(MockTransport { bodies });
    let aggregator = NewsAggregator::new(test_sources(), transport, watchdog.clone(), -5)
        .expect("valid source table");
    (aggregator, watchdog)
}

fn batch_zero_bodies() -> HashMap<String, String> {
    let mut bodies = HashMap::new();
    for n in batch_sources(0) {
        bodies.insert(
            source_url(n),
            feed(&[
                (
                    &format!("Source {n} leads with its first big story"),
                    &format!("https://news.test/{n}/1"),
                    "Wed, 02 Oct 2024 13:00:00 GMT",
                ),
                (
                    &format!("Source {n} follows with a second headline"),
                    &format!("https://news.test/{n}/2"),
                    "Wed, 02 Oct 2024 12:00:00 GMT",
                ),
            ]),
        );
    }
    bodies
}

#[tokio::test]
async fn one_failing_source_does_not_abort_the_batch() {
    let mut bodies = batch_zero_bodies();
    bodies.remove(&source_url(3));

    let (mut aggregator, _) = aggregator_with(bodies);
    let previous_fails = aggregator.stats().stats(3).consecutive_fails;
    aggregator.refresh_batch(0).await;

    let failed = aggregator.stats().stats(3);
    assert_eq!(failed.consecutive_fails, previous_fails + 1);
    assert_eq!(failed.fetched, 0);

    for n in batch_sources(0) {
        if n == 3 {
            continue;
        }
        let stats = aggregator.stats().stats(n);
        assert!(stats.fetched > 0, "source {n} should have fetched items");
        assert_eq!(stats.consecutive_fails, 0);
    }
    // 5 sources x 2 stories each
    assert_eq!(aggregator.pool().len(), 10);
}

#[tokio::test]
async fn refreshing_the_same_batch_twice_is_idempotent() {
    let (mut aggregator, _) = aggregator_with(batch_zero_bodies());

    aggregator.refresh_batch(0).await;
    let first_len = aggregator.pool().len();
    assert_eq!(first_len, 12);

    aggregator.refresh_batch(0).await;
    assert_eq!(aggregator.pool().len(), first_len);
}

#[tokio::test]
async fn cross_source_republication_is_deduplicated() {
    let shared = (
        "The same wire story republished verbatim",
        "https://news.test/wire/1",
        "Wed, 02 Oct 2024 13:00:00 GMT",
    );
    let mut bodies = HashMap::new();
    bodies.insert(source_url(0), feed(&[shared]));
    bodies.insert(source_url(1), feed(&[shared]));

    let (mut aggregator, _) = aggregator_with(bodies);
    aggregator.refresh_batch(0).await;

    assert_eq!(aggregator.pool().len(), 1);
    assert_eq!(aggregator.stats().stats(0).accepted, 1);
    assert_eq!(aggregator.stats().stats(1).accepted, 0);
    assert_eq!(aggregator.stats().stats(1).duplicates, 1);
}

#[tokio::test]
async fn accepted_stories_are_capped_per_source() {
    let items: Vec<(String, String, String)> = (0..10)
        .map(|i| {
            (
                format!("Source zero story number {i} with enough length"),
                format!("https://news.test/0/{i}"),
                "Wed, 02 Oct 2024 13:00:00 GMT".to_string(),
            )
        })
        .collect();
    let refs: Vec<(&str, &str, &str)> = items
        .iter()
        .map(|(t, l, d)| (t.as_str(), l.as_str(), d.as_str()))
        .collect();

    let mut bodies = HashMap::new();
    bodies.insert(source_url(0), feed(&refs));

    let (mut aggregator, _) = aggregator_with(bodies);
    aggregator.refresh_batch(0).await;

    assert_eq!(
        aggregator.stats().stats(0).accepted as usize,
        FETCH_LIMIT_PER_SOURCE
    );
    assert_eq!(aggregator.pool().len(), FETCH_LIMIT_PER_SOURCE);
}

#[tokio::test]
async fn liveness_checkpoints_bracket_every_source() {
    let (mut aggregator, watchdog) = aggregator_with(batch_zero_bodies());
    aggregator.refresh_batch(0).await;
    // At least one checkpoint before and one after each of the 6 fetches.
    assert!(watchdog.count() >= 12, "got {} checkpoints", watchdog.count());
}

#[tokio::test]
async fn undated_items_are_admitted_without_ordering_key() {
    let mut bodies = HashMap::new();
    bodies.insert(
        source_url(0),
        feed(&[(
            "A perfectly fine story with a broken date",
            "https://news.test/0/1",
            "sometime last tuesday",
        )]),
    );

    let (mut aggregator, _) = aggregator_with(bodies);
    aggregator.refresh_batch(0).await;

    assert_eq!(aggregator.pool().len(), 1);
    let story = aggregator.pool().get(0).unwrap();
    assert!(story.published.is_none());
    assert_eq!(aggregator.stats().stats(0).parse_errors, 0);
}

#[tokio::test]
async fn parse_errors_are_counted_and_items_dropped() {
    let mut bodies = HashMap::new();
    bodies.insert(
        source_url(0),
        feed(&[
            ("", "https://news.test/0/1", "Wed, 02 Oct 2024 13:00:00 GMT"),
            (
                "A valid headline for the second item",
                "https://news.test/0/2",
                "Wed, 02 Oct 2024 12:00:00 GMT",
            ),
        ]),
    );

    let (mut aggregator, _) = aggregator_with(bodies);
    aggregator.refresh_batch(0).await;

    let stats = aggregator.stats().stats(0);
    assert_eq!(stats.fetched, 2);
    assert_eq!(stats.parse_errors, 1);
    assert_eq!(stats.accepted, 1);
    assert_eq!(aggregator.pool().len(), 1);
}

#[tokio::test]
async fn failure_streak_persists_across_cycles_until_success() {
    let mut bodies = batch_zero_bodies();
    bodies.remove(&source_url(2));

    let (mut aggregator, _) = aggregator_with(bodies);
    aggregator.refresh_batch(0).await;
    aggregator.refresh_batch(0).await;
    assert_eq!(aggregator.stats().stats(2).consecutive_fails, 2);
}

#[tokio::test]
async fn batch_rotation_wraps_around() {
    let (mut aggregator, _) = aggregator_with(batch_zero_bodies());
    let mut seen = Vec::new();
    for _ in 0..BATCH_COUNT + 1 {
        seen.push(aggregator.run_next_batch().await);
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 0]);
}

#[tokio::test]
async fn refresh_only_touches_the_owning_batch() {
    let mut bodies = batch_zero_bodies();
    bodies.insert(
        source_url(6),
        feed(&[(
            "Batch one source six has its own story",
            "https://news.test/6/1",
            "Wed, 02 Oct 2024 13:00:00 GMT",
        )]),
    );

    let (mut aggregator, _) = aggregator_with(bodies);
    aggregator.refresh_batch(1).await;
    assert_eq!(aggregator.pool().len(), 1);

    aggregator.refresh_batch(0).await;
    // Batch 1's story survives batch 0's cleanup.
    assert!(aggregator
        .pool()
        .stories()
        .iter()
        .any(|s| s.source_index == 6));
    assert_eq!(aggregator.pool().len(), 13);
}
