//! Frozen sort keys for proposal lists.
//!
//! The first time a proposal is ordered its key is computed from the mean
//! rating and stored. Later rating changes do not move it until the cache is
//! reset, so a list does not reshuffle while someone is rating items in it.

use crate::action::ActionLog;
use crate::rating;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

// ---------------------------------------------------------------------------
// SortKey
// ---------------------------------------------------------------------------

/// Ascending key: better-rated proposals have smaller keys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortKey(pub f64);

impl SortKey {
    /// Key for proposals without any rating; sorts after every rated one.
    pub const UNRATED: SortKey = SortKey(f64::MAX);

    pub fn from_mean(mean: Option<f64>) -> Self {
        match mean {
            Some(m) => SortKey(-m),
            None => Self::UNRATED,
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

// ---------------------------------------------------------------------------
// ProposalOrderCache
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ProposalOrderCache {
    keys: Mutex<HashMap<String, SortKey>>,
}

impl ProposalOrderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the frozen key for `proposal_id`, computing it from `log` if
    /// this is the first request for that id. Lookup and insert happen under
    /// one lock.
    pub fn key_for(&self, proposal_id: &str, log: &ActionLog) -> SortKey {
        let mut keys = self.lock();
        if let Some(key) = keys.get(proposal_id) {
            return *key;
        }
        let key = SortKey::from_mean(rating::mean_rating(log));
        keys.insert(proposal_id.to_string(), key);
        key
    }

    /// Stored key without computing one.
    pub fn peek(&self, proposal_id: &str) -> Option<SortKey> {
        self.lock().get(proposal_id).copied()
    }

    /// Forget every stored key. The next `key_for` recomputes from the
    /// current ratings.
    pub fn reset(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned map still only holds complete entries.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, SortKey>> {
        self.keys.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionRecord;
    use std::sync::Arc;

    #[test]
    fn key_is_negated_mean() {
        let cache = ProposalOrderCache::new();
        let log: ActionLog = vec![ActionRecord::rate("a", 4.0), ActionRecord::rate("b", 2.0)].into();
        assert_eq!(cache.key_for("p1", &log), SortKey(-3.0));
    }

    #[test]
    fn unrated_sorts_last() {
        let cache = ProposalOrderCache::new();
        let rated: ActionLog = vec![ActionRecord::rate("a", 1.0)].into();
        let unrated = cache.key_for("p2", &ActionLog::new());
        assert_eq!(unrated, SortKey::UNRATED);
        assert!(cache.key_for("p1", &rated) < unrated);
    }

    #[test]
    fn key_is_frozen_after_first_call() {
        let cache = ProposalOrderCache::new();
        let mut log: ActionLog = vec![ActionRecord::rate("a", 2.0)].into();
        let first = cache.key_for("p1", &log);

        log.push(ActionRecord::rate("b", 5.0));
        log.push(ActionRecord::rate("a", 5.0));
        let second = cache.key_for("p1", &log);

        assert_eq!(first, second);
        assert_eq!(second, SortKey(-2.0));
    }

    #[test]
    fn reset_recomputes() {
        let cache = ProposalOrderCache::new();
        let mut log = ActionLog::new();
        assert_eq!(cache.key_for("p1", &log), SortKey::UNRATED);

        log.push(ActionRecord::rate("a", 5.0));
        cache.reset();
        assert!(cache.is_empty());
        assert_eq!(cache.key_for("p1", &log), SortKey(-5.0));
        assert_eq!(cache.peek("p1"), Some(SortKey(-5.0)));
    }

    #[test]
    fn concurrent_first_access_agrees() {
        let cache = Arc::new(ProposalOrderCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let log: ActionLog = vec![ActionRecord::rate("a", f64::from(i))].into();
                    cache.key_for("shared", &log)
                })
            })
            .collect();
        let keys: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(keys.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cache.len(), 1);
    }
}
