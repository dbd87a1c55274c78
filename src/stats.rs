use crate::types::{batch_sources, SourceStats, SOURCE_COUNT};
use tracing::debug;

/// Owns the per-source counters for all 30 sources. Allocated once at
/// startup; the orchestrator is the only writer.
#[derive(Debug)]
pub struct StatsTracker {
    records: Vec<SourceStats>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            records: vec![SourceStats::default(); SOURCE_COUNT],
        }
    }

    pub fn stats(&self, source_index: usize) -> &SourceStats {
        &self.records[source_index]
    }

    pub fn all(&self) -> &[SourceStats] {
        &self.records
    }

    /// Zero the per-cycle counters for every source in a batch.
    /// Never touches consecutive_fails or last_fetch_ms.
    pub fn reset_batch(&mut self, batch: usize) {
        for source in batch_sources(batch) {
            let rec = &mut self.records[source];
            rec.fetched = 0;
            rec.accepted = 0;
            rec.duplicates = 0;
            rec.parse_errors = 0;
        }
        debug!(batch, "per-cycle stats reset");
    }

    pub fn record_fetched(&mut self, source_index: usize) {
        self.records[source_index].fetched += 1;
    }

    pub fn record_accepted(&mut self, source_index: usize) {
        self.records[source_index].accepted += 1;
    }

    pub fn record_duplicate(&mut self, source_index: usize) {
        self.records[source_index].duplicates += 1;
    }

    pub fn record_parse_error(&mut self, source_index: usize) {
        self.records[source_index].parse_errors += 1;
    }

    /// Success clears the consecutive-failure streak; failure extends it.
    /// The streak is exposed as state for caller-side back-off policy;
    /// this tracker never disables a source itself.
    pub fn record_outcome(&mut self, source_index: usize, success: bool) {
        let rec = &mut self.records[source_index];
        if success {
            rec.consecutive_fails = 0;
        } else {
            rec.consecutive_fails += 1;
        }
    }

    pub fn record_fetch_timestamp(&mut self, source_index: usize, ms_since_start: u64) {
        self.records[source_index].last_fetch_ms = ms_since_start;
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
