pub mod aggregator;
pub mod dates;
pub mod extract;
pub mod fetcher;
pub mod parser;
pub mod pool;
pub mod sanitize;
pub mod sources;
pub mod stats;
pub mod types;
pub mod watchdog;

pub use aggregator::NewsAggregator;
pub use extract::{extract_tag, TagError};
pub use fetcher::{FeedTransport, HttpTransport};
pub use parser::{split_items, ItemParser, ParseReject};
pub use pool::StoryPool;
pub use sources::default_sources;
pub use stats::StatsTracker;
pub use types::*;
pub use watchdog::{CountingWatchdog, NoopWatchdog, Watchdog};
