//! Per-filter candidate count results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};


/// Candidate counts keyed by filter id, produced fresh per render.
/// A filter id absent from the mapping counts as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FilterCounts {
    pub counts: BTreeMap<String, u64>,
}

impl FilterCounts {
    pub fn count_for(&self, filter_id: &str) -> u64 {
        self.counts.get(filter_id).copied().unwrap_or(0)
    }
}

impl From<BTreeMap<String, u64>> for FilterCounts {
    fn from(counts: BTreeMap<String, u64>) -> Self {
        FilterCounts { counts }
    }
}
