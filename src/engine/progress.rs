use std::collections::HashSet;

use crate::catalog::Catalog;

/// Aggregate completion statistics for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressStats {
    pub learned: usize,
    pub total: usize,
    pub remaining: usize,
    pub percentage: u32,
}

pub fn stats(learned: usize, total: usize) -> ProgressStats {
    let learned = learned.min(total);
    let percentage = if total > 0 {
        (learned as f64 / total as f64 * 100.0).round() as u32
    } else {
        0
    };
    ProgressStats {
        learned,
        total,
        remaining: total - learned,
        percentage,
    }
}

/// Unique characters of completed entries, in first-completed order.
/// Out-of-range indices are skipped.
pub fn learned_characters(catalog: &Catalog, completed: &[usize]) -> Vec<char> {
    let mut seen = HashSet::new();
    let mut characters = Vec::new();
    for &index in completed {
        if let Some(entry) = catalog.get(index)
            && seen.insert(entry.character)
        {
            characters.push(entry.character);
        }
    }
    characters
}
