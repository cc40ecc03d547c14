use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SCHEMA_VERSION: u32 = 1;

/// Completion record plus bookkeeping. `completed` holds catalog indices
/// in the order they were learned.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressData {
    pub schema_version: u32,
    pub completed: Vec<usize>,
    pub last_studied: Option<DateTime<Utc>>,
}

impl Default for ProgressData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            completed: Vec::new(),
            last_studied: None,
        }
    }
}

impl ProgressData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }

    /// Repair the completion-record invariants after load: indices must be
    /// in range for the current catalog and appear at most once. Order of
    /// the survivors is preserved.
    pub fn sanitize(&mut self, catalog_len: usize) {
        let mut seen = HashSet::new();
        self.completed
            .retain(|&index| index < catalog_len && seen.insert(index));
    }
}

/// Learner-chosen character order, applied before catalog order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriorityData {
    pub schema_version: u32,
    pub characters: Vec<char>,
}

impl Default for PriorityData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            characters: Vec::new(),
        }
    }
}

impl PriorityData {
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_drops_out_of_range_and_duplicates() {
        let mut data = ProgressData {
            completed: vec![3, 0, 7, 3, 1],
            ..ProgressData::default()
        };
        data.sanitize(5);
        assert_eq!(data.completed, vec![3, 0, 1]);
    }

    #[test]
    fn sanitize_on_shrunk_catalog() {
        let mut data = ProgressData {
            completed: vec![0, 1, 2],
            ..ProgressData::default()
        };
        data.sanitize(0);
        assert!(data.completed.is_empty());
    }

    #[test]
    fn default_schema_is_current() {
        assert!(!ProgressData::default().needs_reset());
        assert!(!PriorityData::default().needs_reset());
    }
}
