use crate::fetcher::FeedTransport;
use crate::parser::{split_items, ItemParser};
use crate::pool::StoryPool;
use crate::stats::StatsTracker;
use crate::types::{
    batch_sources, Admission, NewsSource, Result, TickerError, BATCH_COUNT,
    FETCH_LIMIT_PER_SOURCE, MAX_CONSECUTIVE_PARSE_REJECTS, MAX_POOL_SIZE, SOURCE_COUNT,
};
use crate::watchdog::Watchdog;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Drives one batch of sources per invocation: stats reset, slot-range
/// cleanup, per-source fetch and parse, dedup insert, and the derived
/// playback-queue rebuild. Single writer for both the pool and the stats;
/// an external scheduler supplies the cadence.
pub struct NewsAggregator {
    sources: Vec<NewsSource>,
    pool: StoryPool,
    stats: StatsTracker,
    parser: ItemParser,
    transport: Arc<dyn FeedTransport>,
    watchdog: Arc<dyn Watchdog>,
    started: Instant,
    next_batch: usize,
}

impl NewsAggregator {
    pub fn new(
        sources: Vec<NewsSource>,
        transport: Arc<dyn FeedTransport>,
        watchdog: Arc<dyn Watchdog>,
        timezone_hours: i32,
    ) -> Result<Self> {
        if sources.len() != SOURCE_COUNT {
            return Err(TickerError::General(format!(
                "expected {} sources, got {}",
                SOURCE_COUNT,
                sources.len()
            )));
        }
        Ok(Self {
            sources,
            pool: StoryPool::new(),
            stats: StatsTracker::new(),
            parser: ItemParser::new(timezone_hours),
            transport,
            watchdog,
            started: Instant::now(),
            next_batch: 0,
        })
    }

    pub fn pool(&self) -> &StoryPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut StoryPool {
        &mut self.pool
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    pub fn sources(&self) -> &[NewsSource] {
        &self.sources
    }

    /// Process the next batch in the rotation and advance it.
    pub async fn run_next_batch(&mut self) -> usize {
        let batch = self.next_batch;
        self.refresh_batch(batch).await;
        self.next_batch = (batch + 1) % BATCH_COUNT;
        batch
    }

    /// One full fetch cycle for a batch. Erase the batch's slot range,
    /// refetch its six sources, repopulate, then prune and rebuild the
    /// playback queue. Per-source failures never abort the batch.
    pub async fn refresh_batch(&mut self, batch: usize) {
        info!(batch, "fetch cycle start");
        self.stats.reset_batch(batch);
        self.pool.clear_batch(batch);

        for source_index in batch_sources(batch) {
            self.watchdog.checkpoint();

            if self.pool.len() >= MAX_POOL_SIZE {
                warn!("pool at capacity, stopping batch early");
                break;
            }

            let source = self.sources[source_index].clone();
            self.stats
                .record_fetch_timestamp(source_index, self.elapsed_ms());

            let body = match self.transport.fetch(&source.url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(source = %source.name, error = %e, "source fetch failed");
                    self.stats.record_outcome(source_index, false);
                    self.watchdog.checkpoint();
                    continue;
                }
            };
            self.watchdog.checkpoint();

            self.pool_source(&body, source_index, &source);
            self.stats.record_outcome(source_index, true);
            self.watchdog.checkpoint();

            let stats = self.stats.stats(source_index);
            info!(
                source = %source.name,
                fetched = stats.fetched,
                accepted = stats.accepted,
                duplicates = stats.duplicates,
                parse_errors = stats.parse_errors,
                "source complete"
            );
        }

        self.pool.prune_stale();
        self.pool.rebuild_playback_queue();
        info!(batch, total_stories = self.pool.len(), "fetch cycle complete");
    }

    /// Parse a retrieved feed body and offer its items to the pool.
    fn pool_source(&mut self, body: &str, source_index: usize, source: &NewsSource) {
        let mut accepted = 0usize;
        let mut consecutive_rejects = 0u32;

        for fragment in split_items(body) {
            self.stats.record_fetched(source_index);

            let story = match self.parser.parse_item(fragment, source_index, source.kind) {
                Ok(story) => story,
                Err(reject) => {
                    debug!(source = %source.name, ?reject, "item rejected");
                    self.stats.record_parse_error(source_index);
                    consecutive_rejects += 1;
                    if consecutive_rejects > MAX_CONSECUTIVE_PARSE_REJECTS {
                        warn!(source = %source.name, "too many parse rejects, aborting source");
                        break;
                    }
                    continue;
                }
            };
            consecutive_rejects = 0;

            match self.pool.insert(story) {
                Admission::Accepted => {
                    self.stats.record_accepted(source_index);
                    accepted += 1;
                }
                Admission::Duplicate => {
                    self.stats.record_duplicate(source_index);
                }
                Admission::PoolFull => {
                    warn!(source = %source.name, "pool full mid-source");
                    break;
                }
            }

            if accepted >= FETCH_LIMIT_PER_SOURCE {
                break;
            }
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}
