use carebill_match::RoomIndex;

fn roster_index() -> RoomIndex {
    RoomIndex::new(vec![
        ("703", "安藤　静子"),
        ("913", "加藤敬子"),
        ("1006", "荒木のり子"),
        ("906", "藤本敏博"),
    ])
}

#[test]
fn exact_tier_beats_one_char_diff() {
    // 913 matches exactly; 906 would only match at the substring tier.
    let index = RoomIndex::new(vec![("906", "加藤敬"), ("913", "加藤敬子")]);
    assert_eq!(index.find_room("加藤敬子"), Some("913"));
}

#[test]
fn one_char_diff_tier_beats_substring() {
    let index = RoomIndex::new(vec![("401", "宮本"), ("402", "宮本浩之")]);
    // One kanji off from 402; 401 only matches by containment.
    assert_eq!(index.find_room("宮本浩行"), Some("402"));
}

#[test]
fn spacing_and_width_variants_resolve_exactly() {
    let index = roster_index();
    assert_eq!(index.find_room("安藤静子"), Some("703"));
    assert_eq!(index.find_room("加藤　敬子"), Some("913"));
}

#[test]
fn unknown_name_resolves_to_nothing() {
    let index = roster_index();
    assert_eq!(index.find_room("山田太郎"), None);
    assert_eq!(index.find_room(""), None);
}

#[test]
fn vacant_roster_entries_are_skipped() {
    let index = RoomIndex::new(vec![("801", ""), ("913", "加藤敬子")]);
    assert_eq!(index.entries().len(), 1);
    assert_eq!(index.find_room("加藤敬子"), Some("913"));
}
