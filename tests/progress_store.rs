use jobcert::checklist::ItemResult;
use jobcert::progress::ProgressStore;

#[test]
fn set_status_is_idempotent() {
    let mut store = ProgressStore::new();
    assert!(store.set_status("a", Some(ItemResult::Pass)));
    assert!(!store.set_status("a", Some(ItemResult::Pass)));
    assert_eq!(store.completed(), 1);
}

#[test]
fn clearing_an_absent_item_changes_nothing() {
    let mut store = ProgressStore::new();
    assert!(!store.set_status("a", None));
    assert!(store.is_empty());
}

#[test]
fn zero_total_never_divides() {
    let mut store = ProgressStore::new();
    assert_eq!(store.completion_ratio(0), 0);
    store.set_status("a", Some(ItemResult::Fail));
    assert_eq!(store.completion_ratio(0), 0);
}

#[test]
fn pending_and_unset_do_not_count_as_complete() {
    let mut store = ProgressStore::new();
    store.load_snapshot([
        ("a".to_string(), Some(ItemResult::Pending)),
        ("b".to_string(), Some(ItemResult::Pass)),
        ("c".to_string(), None),
    ]);
    assert_eq!(store.completed(), 1);
    assert_eq!(store.completion_ratio(3), 33);

    assert!(store.set_status("c", Some(ItemResult::Fail)));
    assert_eq!(store.completion_ratio(3), 67);
}

#[test]
fn ratio_rounds_half_up() {
    let mut store = ProgressStore::new();
    for id in ["a", "b", "c", "d", "e"] {
        store.set_status(id, Some(ItemResult::Pass));
    }
    // 5 of 8 = 62.5 -> 63
    assert_eq!(store.completion_ratio(8), 63);
}

#[test]
fn load_snapshot_replaces_rather_than_merges() {
    let mut store = ProgressStore::new();
    store.set_status("stale", Some(ItemResult::Pass));

    store.load_snapshot([("fresh".to_string(), Some(ItemResult::Pending))]);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("stale"), None);
    assert_eq!(store.completed(), 0);
}

#[test]
fn toggling_back_to_pending_is_a_change() {
    let mut store = ProgressStore::new();
    store.set_status("a", Some(ItemResult::Pass));
    assert!(store.set_status("a", Some(ItemResult::Pending)));
    assert_eq!(store.completed(), 0);
    assert!(store.set_status("a", None));
    assert!(!store.set_status("a", None));
}
