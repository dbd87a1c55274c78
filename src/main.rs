use clap::Parser;
use news_ticker::{
    default_sources, FetchConfig, HttpTransport, NewsAggregator, NoopWatchdog, BATCH_COUNT,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "news-ticker", about = "Batched news feed aggregator core")]
struct Args {
    /// Seconds between batch refreshes (the original device cycles every
    /// 15 minutes).
    #[arg(long, default_value_t = 900)]
    interval_secs: u64,

    /// Run a single batch and exit.
    #[arg(long)]
    once: bool,

    /// Start at this batch index instead of 0.
    #[arg(long, default_value_t = 0)]
    batch: usize,

    /// Offset for display time labels, hours from UTC.
    #[arg(long, default_value_t = -5)]
    timezone_hours: i32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let transport = Arc::new(HttpTransport::new(FetchConfig::default())?);
    let watchdog = Arc::new(NoopWatchdog);
    let mut aggregator = NewsAggregator::new(
        default_sources(),
        transport,
        watchdog,
        args.timezone_hours,
    )?;

    let first = args.batch % BATCH_COUNT;
    aggregator.refresh_batch(first).await;
    log_summary(&aggregator);

    if args.once {
        // machine-readable stats for one-shot diagnostics runs
        println!("{}", serde_json::to_string_pretty(aggregator.stats().all())?);
        return Ok(());
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval_secs));
    ticker.tick().await; // consume the immediate first tick
    let mut batch = (first + 1) % BATCH_COUNT;
    loop {
        ticker.tick().await;
        aggregator.refresh_batch(batch).await;
        log_summary(&aggregator);
        batch = (batch + 1) % BATCH_COUNT;
    }
}

fn log_summary(aggregator: &NewsAggregator) {
    info!(total_stories = aggregator.pool().len(), "pool summary");
    for (idx, source) in aggregator.sources().iter().enumerate() {
        let stats = aggregator.stats().stats(idx);
        if stats.fetched > 0 || stats.consecutive_fails > 0 {
            info!(
                source = %source.name,
                fetched = stats.fetched,
                accepted = stats.accepted,
                duplicates = stats.duplicates,
                parse_errors = stats.parse_errors,
                consecutive_fails = stats.consecutive_fails,
                "source stats"
            );
        }
    }
}
