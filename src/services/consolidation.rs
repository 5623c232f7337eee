//! Collapses duplicate entity links and topics produced for one fact.
//!
//! Several extraction passes over the same fact routinely produce the same
//! link or topic more than once. [`Consolidator`] keeps one record per dedup
//! key, choosing between duplicates with a [`MergePolicy`]. The default policy
//! prefers primary records, then higher confidence, then lower rank, and keeps
//! the first-seen record on a full tie.
//!
//! A consolidator is a per-fact accumulator: create one, feed it a fact's
//! records in their original order, call [`Consolidator::finish`].

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use crate::models::{CanonicalTopic, EntityKey, ResolvedLink, TopicCategory};

/// A record that can be deduplicated and ranked against its duplicates.
pub trait Consolidate {
    type Key: Eq + Hash + Clone;

    fn dedup_key(&self) -> Self::Key;
    fn is_primary(&self) -> bool;
    fn confidence(&self) -> Option<f64>;
    fn rank(&self) -> Option<u32>;
}

impl Consolidate for ResolvedLink {
    type Key = EntityKey;

    fn dedup_key(&self) -> EntityKey {
        self.entity_key()
    }

    fn is_primary(&self) -> bool {
        self.is_primary
    }

    fn confidence(&self) -> Option<f64> {
        Some(self.confidence)
    }

    fn rank(&self) -> Option<u32> {
        self.rank
    }
}

impl Consolidate for CanonicalTopic {
    type Key = TopicCategory;

    fn dedup_key(&self) -> TopicCategory {
        self.category
    }

    fn is_primary(&self) -> bool {
        false
    }

    fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    fn rank(&self) -> Option<u32> {
        self.rank
    }
}

/// Decides which of two same-key records survives.
pub trait MergePolicy<T> {
    /// True when `challenger` should replace `incumbent`.
    fn prefers(&self, challenger: &T, incumbent: &T) -> bool;
}

/// `is_primary`, then confidence, then rank. Missing confidence loses to any
/// value, missing rank loses to any rank.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimaryConfidenceRank;

impl<T: Consolidate> MergePolicy<T> for PrimaryConfidenceRank {
    fn prefers(&self, challenger: &T, incumbent: &T) -> bool {
        compare_priority(challenger, incumbent) == Ordering::Greater
    }
}

/// Orders two records by merge priority; `Greater` means `a` should win.
pub fn compare_priority<T: Consolidate>(a: &T, b: &T) -> Ordering {
    a.is_primary()
        .cmp(&b.is_primary())
        .then_with(|| match (a.confidence(), b.confidence()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (x, y) => x.is_some().cmp(&y.is_some()),
        })
        .then_with(|| {
            let ra = a.rank().unwrap_or(u32::MAX);
            let rb = b.rank().unwrap_or(u32::MAX);
            rb.cmp(&ra)
        })
}

/// Per-fact accumulator keeping one record per dedup key.
pub struct Consolidator<T: Consolidate, P = PrimaryConfidenceRank> {
    slots: HashMap<T::Key, usize>,
    records: Vec<T>,
    policy: P,
}

impl<T: Consolidate> Consolidator<T> {
    pub fn new() -> Self {
        Self::with_policy(PrimaryConfidenceRank)
    }
}

impl<T: Consolidate> Default for Consolidator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Consolidate, P: MergePolicy<T>> Consolidator<T, P> {
    pub fn with_policy(policy: P) -> Self {
        Self {
            slots: HashMap::new(),
            records: Vec::new(),
            policy,
        }
    }

    /// Adds a record. Returns `true` if it is now the survivor for its key.
    pub fn push(&mut self, record: T) -> bool {
        match self.slots.get(&record.dedup_key()) {
            Some(&slot) => {
                if self.policy.prefers(&record, &self.records[slot]) {
                    self.records[slot] = record;
                    true
                } else {
                    false
                }
            }
            None => {
                self.slots.insert(record.dedup_key(), self.records.len());
                self.records.push(record);
                true
            }
        }
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = T>) {
        for record in records {
            self.push(record);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Survivors in first-seen order of their keys.
    pub fn finish(self) -> Vec<T> {
        self.records
    }
}

/// One link per `(entity_type, dedup_key)`.
pub fn merge_entities(links: impl IntoIterator<Item = ResolvedLink>) -> Vec<ResolvedLink> {
    let mut merger = Consolidator::new();
    merger.extend(links);
    merger.finish()
}

/// One topic per category.
pub fn merge_topics(topics: impl IntoIterator<Item = CanonicalTopic>) -> Vec<CanonicalTopic> {
    let mut merger = Consolidator::new();
    merger.extend(topics);
    merger.finish()
}

/// Deduplicates everything extracted for one fact.
pub fn merge_fact_knowledge(
    entity_links: impl IntoIterator<Item = ResolvedLink>,
    topics: impl IntoIterator<Item = CanonicalTopic>,
) -> (Vec<ResolvedLink>, Vec<CanonicalTopic>) {
    (merge_entities(entity_links), merge_topics(topics))
}
