use pickaxe_core::{Memo, MemoRepository, MemoStore, MemoValidationError, StoreError};

fn memo(title: &str, content: &str, url: &str, created_at: &str) -> Memo {
    Memo::new(title, content, url, created_at)
}

#[test]
fn create_then_get_roundtrip() {
    let store = MemoStore::in_memory();

    let draft = memo("A", "hello", "http://x", "2024-01-01T00:00:00Z");
    let id = store.create(&draft).unwrap();
    assert_eq!(id, 1);

    let loaded = store.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.id, Some(id));
    assert_eq!(loaded.title, draft.title);
    assert_eq!(loaded.content, draft.content);
    assert_eq!(loaded.url, draft.url);
    assert_eq!(loaded.created_at, draft.created_at);
}

#[test]
fn create_assigns_monotonic_ids() {
    let store = MemoStore::in_memory();

    let first = store
        .create(&memo("", "one", "", "2024-01-01T00:00:00Z"))
        .unwrap();
    let second = store
        .create(&memo("", "two", "", "2024-01-01T00:00:00Z"))
        .unwrap();

    assert!(second > first);
}

#[test]
fn create_rejects_preassigned_id() {
    let store = MemoStore::in_memory();

    let mut draft = memo("", "hello", "", "2024-01-01T00:00:00Z");
    draft.id = Some(42);

    let err = store.create(&draft).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(MemoValidationError::IdAlreadyAssigned(42))
    ));
}

#[test]
fn create_rejects_blank_content() {
    let store = MemoStore::in_memory();

    let err = store
        .create(&memo("A", "  ", "", "2024-01-01T00:00:00Z"))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(MemoValidationError::EmptyContent)
    ));
}

#[test]
fn create_rejects_malformed_timestamp() {
    let store = MemoStore::in_memory();

    let err = store.create(&memo("A", "hello", "", "not-a-date")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(MemoValidationError::InvalidCreatedAt(_))
    ));
}

#[test]
fn list_all_orders_newest_first() {
    let store = MemoStore::in_memory();

    store
        .create(&memo("", "t2", "", "2024-01-02T00:00:00Z"))
        .unwrap();
    store
        .create(&memo("", "t1", "", "2024-01-01T00:00:00Z"))
        .unwrap();
    store
        .create(&memo("", "t3", "", "2024-01-03T00:00:00Z"))
        .unwrap();

    let contents: Vec<String> = store
        .list_all()
        .unwrap()
        .into_iter()
        .map(|m| m.content)
        .collect();
    assert_eq!(contents, vec!["t3", "t2", "t1"]);
}

#[test]
fn list_all_orders_by_instant_across_utc_offsets() {
    let store = MemoStore::in_memory();

    // 2024-01-01T23:00:00Z is the newer instant; the +09:00 timestamp reads
    // later as text but denotes 2024-01-01T22:00:00Z.
    let newer = store
        .create(&memo("", "newer instant", "", "2024-01-01T23:00:00Z"))
        .unwrap();
    let older = store
        .create(&memo("", "older instant", "", "2024-01-02T07:00:00+09:00"))
        .unwrap();

    let ids: Vec<_> = store
        .list_all()
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, vec![Some(newer), Some(older)]);
}

#[test]
fn list_all_orders_by_instant_across_subsecond_precision() {
    let store = MemoStore::in_memory();

    let older = store
        .create(&memo("", "whole second", "", "2024-01-01T00:00:00Z"))
        .unwrap();
    let newer = store
        .create(&memo("", "half second later", "", "2024-01-01T00:00:00.500Z"))
        .unwrap();

    let ids: Vec<_> = store
        .list_all()
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, vec![Some(newer), Some(older)]);
}

#[test]
fn list_all_breaks_timestamp_ties_by_latest_insert() {
    let store = MemoStore::in_memory();

    let first = store
        .create(&memo("", "older insert", "", "2024-01-01T00:00:00Z"))
        .unwrap();
    let second = store
        .create(&memo("", "newer insert", "", "2024-01-01T00:00:00Z"))
        .unwrap();

    let ids: Vec<_> = store
        .list_all()
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, vec![Some(second), Some(first)]);
}

#[test]
fn list_all_on_empty_store_returns_empty_vec() {
    let store = MemoStore::in_memory();
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn get_missing_id_returns_none() {
    let store = MemoStore::in_memory();
    assert_eq!(store.get_by_id(999).unwrap(), None);
}

#[test]
fn delete_missing_id_is_a_noop() {
    let store = MemoStore::in_memory();

    store
        .create(&memo("", "keep me", "", "2024-01-01T00:00:00Z"))
        .unwrap();
    store.delete_by_id(999).unwrap();

    assert_eq!(store.list_all().unwrap().len(), 1);
}

#[test]
fn delete_is_idempotent() {
    let store = MemoStore::in_memory();

    let id = store
        .create(&memo("", "short lived", "", "2024-01-01T00:00:00Z"))
        .unwrap();
    store.delete_by_id(id).unwrap();
    store.delete_by_id(id).unwrap();

    assert_eq!(store.get_by_id(id).unwrap(), None);
}

#[test]
fn full_memo_lifecycle_scenario() {
    let store = MemoStore::in_memory();

    let id = store
        .create(&memo("A", "hello", "http://x", "2024-01-01T00:00:00Z"))
        .unwrap();
    assert_eq!(id, 1);

    let loaded = store.get_by_id(1).unwrap().unwrap();
    assert_eq!(loaded.id, Some(1));
    assert_eq!(loaded.title, "A");
    assert_eq!(loaded.content, "hello");
    assert_eq!(loaded.url, "http://x");
    assert_eq!(loaded.created_at, "2024-01-01T00:00:00Z");

    store.delete_by_id(1).unwrap();
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn empty_title_is_stored_as_empty_string() {
    let store = MemoStore::in_memory();

    let id = store
        .create(&memo("", "untitled body", "", "2024-01-01T00:00:00Z"))
        .unwrap();
    let loaded = store.get_by_id(id).unwrap().unwrap();

    assert_eq!(loaded.title, "");
    assert_eq!(loaded.display_title(), "Untitled");
}

#[test]
fn corrupt_created_at_surfaces_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pickaxe.db");

    let conn = pickaxe_core::db::open_db(&path).unwrap();
    conn.execute(
        "INSERT INTO memos (title, content, url, created_at)
         VALUES ('', 'body', '', 'garbage');",
        [],
    )
    .unwrap();
    drop(conn);

    let store = MemoStore::new(&path);
    let err = store.list_all().unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
}
