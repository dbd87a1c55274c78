use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Sources per fetch batch.
pub const BATCH_SIZE: usize = 6;
/// Total configured sources.
pub const SOURCE_COUNT: usize = 30;
/// Batches cycle 0..BATCH_COUNT.
pub const BATCH_COUNT: usize = SOURCE_COUNT / BATCH_SIZE;

/// Hard cap on pool storage across all batches.
pub const MAX_POOL_SIZE: usize = 180;
/// Display-width crop for cleaned headlines.
pub const MAX_HEADLINE_LEN: usize = 114;
/// Accepted stories per source per cycle.
pub const FETCH_LIMIT_PER_SOURCE: usize = 6;
/// Stories older than this behind the newest are pruned (36 hours).
pub const MAX_STORY_AGE_SECS: i64 = 129_600;
/// Maximum allowed gap between watchdog liveness checkpoints.
/// A batch must never run longer than this without calling checkpoint().
pub const MAX_CHECKPOINT_GAP_MS: u64 = 90_000;
/// Abort a source after this many consecutive item-parse rejects.
pub const MAX_CONSECUTIVE_PARSE_REJECTS: u32 = 3;

/// Source indices never age-pruned: local/aggregated feeds that
/// legitimately carry items older than the pruning window.
pub const PRUNE_EXEMPT_SOURCES: [usize; 4] = [0, 1, 2, 5];

/// Range of source indices owned by a batch.
pub fn batch_sources(batch: usize) -> Range<usize> {
    let start = batch * BATCH_SIZE;
    start..start + BATCH_SIZE
}

/// The batch that owns a source index.
pub fn batch_for_source(source_index: usize) -> usize {
    source_index / BATCH_SIZE
}

/// Feed flavor, selecting the per-item capture window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// Plain RSS; item bodies are short.
    Standard,
    /// WordPress-style feeds embedding long HTML bodies.
    Wordpress,
}

impl SourceKind {
    /// Maximum bytes captured per item fragment and kept per summary.
    pub fn capture_limit(self) -> usize {
        match self {
            SourceKind::Standard => 1_500,
            SourceKind::Wordpress => 4_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSource {
    pub name: String,
    pub url: String,
    pub kind: SourceKind,
}

impl NewsSource {
    pub fn new(name: &str, url: &str, kind: SourceKind) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            kind,
        }
    }
}

/// One aggregated news item. Only the item parser constructs these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub headline: String,
    pub link: String,
    /// None means the feed's date did not parse; the story is still valid,
    /// it just has no ordering key.
    pub published: Option<DateTime<Utc>>,
    /// Short local-time label for display ("Wed 3:05 PM"), empty when
    /// `published` is None.
    pub time_label: String,
    /// Cleaned summary/body, truncated to the source kind's capture limit.
    pub summary: String,
    pub source_index: usize,
}

/// Outcome of offering a candidate story to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    /// A story with the same (headline, link) already exists somewhere
    /// in the pool.
    Duplicate,
    /// Pool is at MAX_POOL_SIZE.
    PoolFull,
}

/// Per-source counters. The first four reset every cycle for the owning
/// batch; consecutive_fails and last_fetch_ms persist across cycles.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SourceStats {
    pub fetched: u32,
    pub accepted: u32,
    pub duplicates: u32,
    pub parse_errors: u32,
    pub consecutive_fails: u32,
    /// Milliseconds since process start at the last fetch attempt.
    pub last_fetch_ms: u64,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub max_feed_size_bytes: usize,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "NewsTicker/1.0".to_string(),
            timeout_seconds: 20,
            max_retries: 2,
            retry_delay_seconds: 2,
            max_feed_size_bytes: 2 * 1024 * 1024,
            max_redirects: 5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TickerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Feed too large: {size} bytes")]
    FeedTooLarge { size: usize },

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, TickerError>;
