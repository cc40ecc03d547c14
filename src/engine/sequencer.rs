use std::collections::HashSet;

use crate::catalog::{Catalog, LessonEntry};

/// The entry the learner should study next, paired with its catalog index.
#[derive(Clone, Copy, Debug)]
pub struct NextLesson<'a> {
    pub index: usize,
    pub entry: &'a LessonEntry,
}

/// Decide which catalog entry to present next.
///
/// The priority list is walked first: for each character, in order, the
/// earliest uncompleted catalog occurrence wins. A character with several
/// catalog entries (homographs) is therefore walked through all its senses
/// before the next priority character is considered. Characters absent
/// from the catalog fall through silently.
///
/// With no priority match the catalog is scanned in order and the first
/// uncompleted entry is returned. `None` means every entry is completed —
/// a terminal success state, not an error.
pub fn next_entry<'a>(
    catalog: &'a Catalog,
    completed: &HashSet<usize>,
    priority: &[char],
) -> Option<NextLesson<'a>> {
    for &character in priority {
        for (index, entry) in catalog.entries().iter().enumerate() {
            if entry.character == character && !completed.contains(&index) {
                return Some(NextLesson { index, entry });
            }
        }
    }

    catalog
        .entries()
        .iter()
        .enumerate()
        .find(|(index, _)| !completed.contains(index))
        .map(|(index, entry)| NextLesson { index, entry })
}
