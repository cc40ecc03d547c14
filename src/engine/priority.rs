use crate::catalog::Catalog;

/// Parse learner input into a priority list. Tokens split on commas and
/// whitespace; anything that is not a single CJK ideograph is dropped
/// silently — malformed input is never an error.
pub fn parse_priority_input(input: &str) -> Vec<char> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(|token| {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if is_kanji(ch) => Some(ch),
                _ => None,
            }
        })
        .collect()
}

/// Split a parsed list into characters present in the catalog and those
/// that are not, preserving order. Unknown characters are reported back
/// to the learner but never saved.
pub fn partition_known(catalog: &Catalog, characters: &[char]) -> (Vec<char>, Vec<char>) {
    let mut known = Vec::new();
    let mut unknown = Vec::new();
    for &ch in characters {
        if catalog.contains_character(ch) {
            known.push(ch);
        } else {
            unknown.push(ch);
        }
    }
    (known, unknown)
}

// CJK Unified Ideographs block, same range the web original accepted.
fn is_kanji(ch: char) -> bool {
    ('\u{4e00}'..='\u{9faf}').contains(&ch)
}
