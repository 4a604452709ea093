//! In-memory cache of age-group point lists.
//!
//! Annotating a page of entries with age-group ranks needs, per entry, the number of
//! peers in the same week, discipline and age class with strictly more points. The
//! peer point lists are cached here, sorted descending, so a batch costs one query per
//! distinct age group instead of one per entry. Every write to the store clears the cache.

use lru::LruCache;
use std::{num::NonZeroUsize, sync::Arc};

use crate::cli::types::{Discipline, RankingWeek};

const DEFAULT_CAPACITY: usize = 64;

/// Cache key: one age group within one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AgeGroupKey {
    pub week: RankingWeek,
    pub discipline: Discipline,
    pub age_class: String,
}

impl AgeGroupKey {
    pub fn new(week: RankingWeek, discipline: Discipline, age_class: &str) -> Self {
        Self {
            week,
            discipline,
            age_class: age_class.to_string(),
        }
    }
}

/// LRU of descending point lists per age group.
pub struct AgeGroupCache {
    points: LruCache<AgeGroupKey, Arc<Vec<f64>>>,
}

impl AgeGroupCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            points: LruCache::new(capacity),
        }
    }

    pub fn get(&mut self, key: &AgeGroupKey) -> Option<Arc<Vec<f64>>> {
        self.points.get(key).cloned()
    }

    /// Store a point list; it is sorted descending before insertion.
    pub fn put(&mut self, key: AgeGroupKey, mut points: Vec<f64>) -> Arc<Vec<f64>> {
        points.sort_by(|a, b| b.total_cmp(a));
        let points = Arc::new(points);
        self.points.put(key, Arc::clone(&points));
        points
    }

    pub fn invalidate(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for AgeGroupCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// `1 + |{p in peers : p > points}|` over a descending list.
pub fn rank_within(sorted_desc: &[f64], points: f64) -> u32 {
    let strictly_greater = sorted_desc.partition_point(|p| *p > points);
    strictly_greater as u32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(age_class: &str) -> AgeGroupKey {
        AgeGroupKey::new(RankingWeek::new(2026, 2), Discipline::HE, age_class)
    }

    #[test]
    fn test_put_sorts_descending() {
        let mut cache = AgeGroupCache::default();
        let stored = cache.put(key("U19"), vec![8.0, 10.0, 8.0, 3.5]);
        assert_eq!(*stored, vec![10.0, 8.0, 8.0, 3.5]);
        assert_eq!(cache.get(&key("U19")).unwrap(), stored);
        assert!(cache.get(&key("U17")).is_none());
    }

    #[test]
    fn test_rank_within_shares_ties() {
        let peers = vec![10.0, 8.0, 8.0, 3.5];
        assert_eq!(rank_within(&peers, 10.0), 1);
        assert_eq!(rank_within(&peers, 8.0), 2);
        assert_eq!(rank_within(&peers, 3.5), 4);
        // Not among the peers at all: still counts strictly greater entries
        assert_eq!(rank_within(&peers, 9.0), 2);
        assert_eq!(rank_within(&[], 1.0), 1);
    }

    #[test]
    fn test_invalidate_and_capacity() {
        let mut cache = AgeGroupCache::new(2);
        cache.put(key("U11"), vec![1.0]);
        cache.put(key("U13"), vec![1.0]);
        cache.put(key("U15"), vec![1.0]);
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&key("U11")).is_none());

        cache.invalidate();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_falls_back_to_one() {
        let mut cache = AgeGroupCache::new(0);
        cache.put(key("U19"), vec![2.0]);
        assert_eq!(cache.len(), 1);
    }
}
