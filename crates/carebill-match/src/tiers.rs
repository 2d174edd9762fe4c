//! The three matching tiers, kept as separate passes so each can be
//! tested on its own. Every tier expects an already-canonicalized
//! target and returns the first hit in candidate order.

use crate::IndexEntry;

/// Tier 1: canonical exact equality.
#[must_use]
pub fn exact_match<'a>(entries: &'a [IndexEntry], target: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| entry.canonical == target)
        .map(|entry| entry.room.as_str())
}

/// Tier 2: same length, exactly one differing character position.
/// Not applied to strings shorter than two characters.
#[must_use]
pub fn one_char_diff_match<'a>(entries: &'a [IndexEntry], target: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| is_one_char_diff(&entry.canonical, target))
        .map(|entry| entry.room.as_str())
}

/// Tier 3: substring containment in either direction.
#[must_use]
pub fn substring_match<'a>(entries: &'a [IndexEntry], target: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| entry.canonical.contains(target) || target.contains(&entry.canonical))
        .map(|entry| entry.room.as_str())
}

fn is_one_char_diff(a: &str, b: &str) -> bool {
    let left: Vec<char> = a.chars().collect();
    let right: Vec<char> = b.chars().collect();
    if left.len() != right.len() || left.len() < 2 {
        return false;
    }
    let diffs = left
        .iter()
        .zip(right.iter())
        .filter(|(lhs, rhs)| lhs != rhs)
        .count();
    diffs == 1
}
