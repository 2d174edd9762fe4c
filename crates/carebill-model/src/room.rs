//! Room identifier handling.
//!
//! Rooms are string identifiers unique within a facility. Departed
//! residents are flagged by a ✕ (or ×) mark in the room label on the
//! roster; such rooms are never auto-inserted during merge and sort
//! after every active room.

use std::cmp::Ordering;

/// Label of the grand-total pseudo-row on a ledger sheet.
pub const TOTAL_ROW_LABEL: &str = "合計";

/// Normalizes a raw room cell: trims, and collapses a spreadsheet
/// float artifact like `608.0` back to `608`.
#[must_use]
pub fn normalize_room(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(stripped) = trimmed.strip_suffix(".0")
        && stripped.chars().all(|ch| ch.is_ascii_digit())
        && !stripped.is_empty()
    {
        return stripped.to_string();
    }
    trimmed.to_string()
}

/// True if the room label carries the retired/departed marker.
#[must_use]
pub fn is_retired_room(room: &str) -> bool {
    room.contains('✕') || room.contains('×')
}

/// Sort key for ledger ordering: purely numeric rooms ascend
/// numerically before mixed alphanumeric ones; retired rooms go last.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum RoomSortKey {
    Numeric(i64),
    Text(String),
    Retired(String),
}

#[must_use]
pub fn room_sort_key(room: &str) -> RoomSortKey {
    if is_retired_room(room) {
        return RoomSortKey::Retired(room.to_string());
    }
    match room.parse::<i64>() {
        Ok(number) => RoomSortKey::Numeric(number),
        Err(_) => RoomSortKey::Text(room.to_string()),
    }
}

/// Compares two room labels by their sort key.
#[must_use]
pub fn compare_rooms(a: &str, b: &str) -> Ordering {
    room_sort_key(a).cmp(&room_sort_key(b))
}
