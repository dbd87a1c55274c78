use crate::types::{
    batch_sources, Admission, Story, MAX_POOL_SIZE, MAX_STORY_AGE_SECS, PRUNE_EXEMPT_SOURCES,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info};

/// Shared story storage plus the derived playback queue. The pool is the
/// only owner of Story records after admission; consumers address stories
/// by index.
#[derive(Debug, Default)]
pub struct StoryPool {
    stories: Vec<Story>,
    /// (headline, link) keys of everything currently stored.
    keys: HashSet<(String, String)>,
    /// Read-order indices for the display consumer, most-recent-first.
    queue: VecDeque<usize>,
}

impl StoryPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn get(&self, index: usize) -> Option<&Story> {
        self.stories.get(index)
    }

    pub fn playback_queue(&self) -> impl Iterator<Item = usize> + '_ {
        self.queue.iter().copied()
    }

    /// Admit a candidate unless an identical (headline, link) already
    /// exists anywhere in the pool. Duplicates can arrive cross-source
    /// when outlets republish the same story, so the whole pool is
    /// checked, not just the candidate's batch.
    pub fn insert(&mut self, candidate: Story) -> Admission {
        if self.stories.len() >= MAX_POOL_SIZE {
            debug!("pool at capacity, rejecting candidate");
            return Admission::PoolFull;
        }
        let key = (candidate.headline.clone(), candidate.link.clone());
        if self.keys.contains(&key) {
            debug!(headline = %candidate.headline, "duplicate rejected");
            return Admission::Duplicate;
        }
        self.keys.insert(key);
        self.stories.push(candidate);
        Admission::Accepted
    }

    /// Remove every story owned by the batch's source range. Runs before
    /// the batch is refetched so stale items never outlive their refresh.
    pub fn clear_batch(&mut self, batch: usize) {
        let range = batch_sources(batch);
        let before = self.stories.len();
        self.stories.retain(|s| !range.contains(&s.source_index));
        if self.stories.len() != before {
            self.reindex();
            debug!(
                batch,
                removed = before - self.stories.len(),
                "batch slot range cleared"
            );
        }
    }

    /// Drop stories older than the age window behind the newest dated
    /// story. Exempt sources and stories without a date are kept; local
    /// feeds legitimately serve old items.
    pub fn prune_stale(&mut self) {
        let newest: Option<DateTime<Utc>> = self.stories.iter().filter_map(|s| s.published).max();
        let cutoff = match newest {
            Some(n) => n - Duration::seconds(MAX_STORY_AGE_SECS),
            None => return,
        };

        let before = self.stories.len();
        self.stories.retain(|s| {
            if PRUNE_EXEMPT_SOURCES.contains(&s.source_index) {
                return true;
            }
            match s.published {
                Some(ts) => ts >= cutoff,
                None => true,
            }
        });
        if self.stories.len() != before {
            self.reindex();
            info!(
                removed = before - self.stories.len(),
                remaining = self.stories.len(),
                "stale stories pruned"
            );
        }
    }

    /// Rebuild the playback queue: most-recent-first by publication
    /// instant, undated stories last, ties broken by insertion order.
    pub fn rebuild_playback_queue(&mut self) {
        let mut order: Vec<usize> = (0..self.stories.len()).collect();
        order.sort_by(|&a, &b| {
            self.stories[b]
                .published
                .cmp(&self.stories[a].published)
                .then(a.cmp(&b))
        });
        self.queue = order.into();
        debug!(size = self.queue.len(), "playback queue rebuilt");
    }

    /// Next story for display, skipping sources in the forbidden list
    /// (e.g. sources already on screen). Skipped indices go to the back
    /// of the queue; when everything conflicts the first skipped index
    /// is served anyway.
    pub fn next_story_index(&mut self, forbidden_sources: &[usize]) -> Option<usize> {
        if self.stories.is_empty() {
            return None;
        }
        if self.queue.is_empty() {
            self.rebuild_playback_queue();
        }

        let mut skipped = Vec::new();
        let mut found = None;
        while let Some(idx) = self.queue.pop_front() {
            if idx >= self.stories.len() {
                continue;
            }
            if forbidden_sources.contains(&self.stories[idx].source_index) {
                skipped.push(idx);
            } else {
                found = Some(idx);
                break;
            }
        }

        let found = match found {
            Some(idx) => idx,
            None if !skipped.is_empty() => skipped.remove(0),
            None => {
                self.rebuild_playback_queue();
                self.queue.pop_front()?
            }
        };

        for idx in skipped {
            self.queue.push_back(idx);
        }
        Some(found)
    }

    /// Storage indices changed; recompute the key set and derived queue.
    fn reindex(&mut self) {
        self.keys = self
            .stories
            .iter()
            .map(|s| (s.headline.clone(), s.link.clone()))
            .collect();
        self.rebuild_playback_queue();
    }
}
