//! Welfare-cap extraction from the ledger notes column.
//!
//! Some residents are welfare recipients whose monthly total is capped.
//! The cap is not a dedicated column; bookkeepers record it in the
//! free-text notes, in two conventions:
//!
//! - a leading integer immediately followed by a circle glyph (○/〇)
//!   abbreviates ×10,000 yen: `9〇` → 90,000. Text after a `+`
//!   separator is ignored (`9〇+初期1万` → 90,000);
//! - a comma-formatted integer of at least 10,000 is read literally:
//!   `110,000` → 110,000.
//!
//! Anything else yields no cap, which is the normal case. The ≥10,000
//! threshold is the only guard against unrelated numbers in free text,
//! so the heuristic can misfire on notes that happen to contain a large
//! number; it is preserved as-is for compatibility with existing
//! ledgers.

use unicode_normalization::UnicodeNormalization;

/// Extracts the welfare cap from a notes string, if one is recorded.
///
/// Bookkeepers type amounts in full-width digits as often as ASCII
/// ones (`９〇`, `１１０,０００`), so the notes are NFKC-normalized
/// before any digit scanning. The circle glyphs survive normalization
/// unchanged.
#[must_use]
pub fn parse_welfare_cap(notes: &str) -> Option<i64> {
    let normalized: String = notes.nfkc().collect();
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Digit+circle shorthand, checked before any `+` suffix.
    let base = trimmed.split('+').next().unwrap_or(trimmed).trim();
    if let Some(cap) = parse_circle_shorthand(base) {
        return Some(cap);
    }

    // Literal amount: first digit run with comma separators removed.
    let cleaned: String = trimmed.chars().filter(|ch| *ch != ',').collect();
    let digits: String = cleaned
        .chars()
        .skip_while(|ch| !ch.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    if let Ok(value) = digits.parse::<i64>()
        && value >= 10_000
    {
        return Some(value);
    }
    None
}

fn parse_circle_shorthand(text: &str) -> Option<i64> {
    let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let rest = text[digits.len()..].trim_start();
    let mut chars = rest.chars();
    match chars.next() {
        Some('○' | '〇') => digits.parse::<i64>().ok().map(|n| n * 10_000),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_shorthand_multiplies_by_ten_thousand() {
        assert_eq!(parse_welfare_cap("9〇"), Some(90_000));
        assert_eq!(parse_welfare_cap("11○"), Some(110_000));
    }

    #[test]
    fn plus_suffix_is_ignored() {
        assert_eq!(parse_welfare_cap("9〇+初期1万"), Some(90_000));
    }

    #[test]
    fn comma_number_is_literal() {
        assert_eq!(parse_welfare_cap("80,000"), Some(80_000));
        assert_eq!(parse_welfare_cap("110000"), Some(110_000));
    }

    #[test]
    fn full_width_digits_parse_like_ascii() {
        assert_eq!(parse_welfare_cap("９〇"), Some(90_000));
        assert_eq!(parse_welfare_cap("９〇+初期1万"), Some(90_000));
        assert_eq!(parse_welfare_cap("１１０,０００"), Some(110_000));
        assert_eq!(parse_welfare_cap("１１０，０００"), Some(110_000));
    }

    #[test]
    fn small_numbers_and_plain_text_yield_no_cap() {
        assert_eq!(parse_welfare_cap("13"), None);
        assert_eq!(parse_welfare_cap("退去予定"), None);
        assert_eq!(parse_welfare_cap(""), None);
    }
}
