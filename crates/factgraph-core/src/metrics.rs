//! # Store Metrics
//!
//! Size counters for a fact store, reported by the CLI `status` command.
//! Pure and deterministic: the same store always yields the same metrics.

use crate::store::FactStore;
use crate::types::PatternMask;
use serde::Serialize;

/// Key count of one secondary index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexMetrics {
    /// Shape label, e.g. `SP?`.
    pub shape: &'static str,
    /// Number of distinct composite keys.
    pub keys: usize,
}

/// Counters describing a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreMetrics {
    pub node_count: usize,
    pub predicate_count: usize,
    pub triple_count: usize,
    /// One entry per secondary index, in mask order.
    pub indices: Vec<IndexMetrics>,
}

impl StoreMetrics {
    /// Compute metrics from a store.
    #[must_use]
    pub fn from_store(store: &FactStore) -> Self {
        let indices = PatternMask::indexed()
            .map(|mask| IndexMetrics {
                shape: mask.shape(),
                keys: store.index_key_count(mask).unwrap_or_default(),
            })
            .collect();

        Self {
            node_count: store.node_count(),
            predicate_count: store.predicate_count(),
            triple_count: store.triple_count(),
            indices,
        }
    }

    /// Total number of index entries across all secondary indices.
    ///
    /// Every triple is filed once per index, so this is always
    /// `triple_count * 7`.
    #[must_use]
    pub fn index_entries(&self) -> usize {
        self.triple_count.saturating_mul(PatternMask::INDEXED_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_metrics() {
        let metrics = StoreMetrics::from_store(&FactStore::new());
        assert_eq!(metrics.triple_count, 0);
        assert_eq!(metrics.indices.len(), 7);
        assert!(metrics.indices.iter().all(|i| i.keys == 0));
    }

    #[test]
    fn metrics_count_distinct_keys() {
        let mut store = FactStore::new();
        store.import_triple("A", "P", "B");
        store.import_triple("A", "P", "C");
        store.import_triple("D", "P", "B");

        let metrics = StoreMetrics::from_store(&store);
        assert_eq!(metrics.node_count, 4);
        assert_eq!(metrics.predicate_count, 1);
        assert_eq!(metrics.triple_count, 3);
        assert_eq!(metrics.index_entries(), 21);

        let keys = |shape: &str| {
            metrics
                .indices
                .iter()
                .find(|i| i.shape == shape)
                .map(|i| i.keys)
        };
        assert_eq!(keys("SPO"), Some(3));
        assert_eq!(keys("S??"), Some(2));
        assert_eq!(keys("?P?"), Some(1));
        assert_eq!(keys("??O"), Some(2));
    }
}
