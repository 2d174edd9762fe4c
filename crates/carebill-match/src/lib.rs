//! Resident-name canonicalization and tiered fuzzy matching.
//!
//! The same person is spelled differently across the source files:
//! with or without a space between family and given name, full-width
//! vs half-width characters, and the occasional variant or mistyped
//! kanji. Rooms are the primary key wherever one exists; when a record
//! carries only a name (the usage log), it is resolved against a
//! facility roster with three tiers, tried in strict priority order:
//!
//! 1. canonical exact equality (NFKC + all whitespace stripped);
//! 2. same-length canonical strings differing in exactly one character
//!    position (kanji transcription errors, e.g. 浩之 vs 浩行);
//! 3. substring containment in either direction (family name only).
//!
//! Each tier returns its first hit in candidate order and stops the
//! search; ties within a tier resolve to the earliest candidate. The
//! substring tier has no minimum-length guard, so very short names can
//! false-positive — preserved deliberately to match observed ledger
//! behavior.

pub mod tiers;

use tracing::debug;
use unicode_normalization::UnicodeNormalization;

pub use tiers::{exact_match, one_char_diff_match, substring_match};

/// Canonicalizes a name: NFKC compatibility normalization (variant and
/// full-width forms collapse) and removal of every space character,
/// including ideographic space.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.nfkc().filter(|ch| !ch.is_whitespace()).collect()
}

/// True iff the canonical forms are equal. Non-empty on both sides is
/// required; two blanks are not a match.
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    let left = normalize_name(a);
    let right = normalize_name(b);
    !left.is_empty() && left == right
}

/// A canonical-name → room index for one facility.
///
/// Built once per facility from its room↔name pairs; entries keep the
/// input order so first-match-wins tie-breaking is stable. Entries with
/// a blank canonical name are skipped.
#[derive(Debug, Clone, Default)]
pub struct RoomIndex {
    entries: Vec<IndexEntry>,
}

#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub canonical: String,
    pub room: String,
}

impl RoomIndex {
    pub fn new<I, R, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (R, N)>,
        R: Into<String>,
        N: AsRef<str>,
    {
        let mut entries = Vec::new();
        for (room, name) in pairs {
            let canonical = normalize_name(name.as_ref());
            if canonical.is_empty() {
                continue;
            }
            entries.push(IndexEntry {
                canonical,
                room: room.into(),
            });
        }
        Self { entries }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Resolves a name to a room through the three tiers.
    #[must_use]
    pub fn find_room(&self, target_name: &str) -> Option<&str> {
        let target = normalize_name(target_name);
        if target.is_empty() {
            return None;
        }
        if let Some(room) = exact_match(&self.entries, &target) {
            return Some(room);
        }
        if let Some(room) = one_char_diff_match(&self.entries, &target) {
            debug!(name = %target_name, room, "matched by one-character difference");
            return Some(room);
        }
        if let Some(room) = substring_match(&self.entries, &target) {
            debug!(name = %target_name, room, "matched by substring containment");
            return Some(room);
        }
        None
    }
}
