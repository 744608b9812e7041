use taskpad_core::db::{open_db, DbError};
use taskpad_core::{
    decode_snapshot, EditMode, SlotRepository, SqliteSlotRepository, TaskStore, TASKS_SLOT_KEY,
};
use uuid::Uuid;

#[test]
fn store_starts_empty_when_slot_is_absent() {
    let store = TaskStore::open_in_memory().unwrap();

    assert!(store.is_empty());
    assert_eq!(store.edit_mode(), &EditMode::Idle);
}

#[test]
fn add_appends_in_order_with_distinct_ids() {
    let mut store = TaskStore::open_in_memory().unwrap();

    let first = store.add("buy milk").unwrap();
    let second = store.add("call dentist").unwrap();

    let tasks = store.tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, first);
    assert_eq!(tasks[0].text, "buy milk");
    assert!(!tasks[0].completed);
    assert_eq!(tasks[1].id, second);
    assert_eq!(tasks[1].text, "call dentist");
    assert_ne!(first, second);
}

#[test]
fn add_trims_surrounding_whitespace() {
    let mut store = TaskStore::open_in_memory().unwrap();

    let id = store.add("  buy milk  ").unwrap();

    assert_eq!(store.find(id).unwrap().text, "buy milk");
}

#[test]
fn add_rejects_blank_input() {
    let mut store = TaskStore::open_in_memory().unwrap();

    assert_eq!(store.add(""), None);
    assert_eq!(store.add("   \t  "), None);
    assert!(store.is_empty());
}

#[test]
fn toggle_twice_restores_pending_state() {
    let mut store = TaskStore::open_in_memory().unwrap();
    let id = store.add("water plants").unwrap();

    assert!(store.toggle_completed(id));
    assert!(store.find(id).unwrap().completed);

    assert!(store.toggle_completed(id));
    assert!(!store.find(id).unwrap().completed);
}

#[test]
fn toggle_unknown_id_is_a_noop() {
    let mut store = TaskStore::open_in_memory().unwrap();
    store.add("water plants").unwrap();

    assert!(!store.toggle_completed(Uuid::new_v4()));
    assert!(!store.tasks()[0].completed);
}

#[test]
fn remove_keeps_remaining_order() {
    let mut store = TaskStore::open_in_memory().unwrap();
    let first = store.add("first").unwrap();
    let second = store.add("second").unwrap();
    let third = store.add("third").unwrap();

    assert!(store.remove(second));

    let ids: Vec<_> = store.tasks().iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![first, third]);
}

#[test]
fn remove_unknown_id_is_a_noop() {
    let mut store = TaskStore::open_in_memory().unwrap();
    let id = store.add("only entry").unwrap();

    assert!(store.remove(id));
    assert!(!store.remove(id));
    assert!(store.is_empty());
}

#[test]
fn begin_edit_seeds_buffer_with_displayed_text() {
    let mut store = TaskStore::open_in_memory().unwrap();
    let id = store.add("draft").unwrap();

    store.begin_edit(id, "draft");

    assert_eq!(
        store.edit_mode(),
        &EditMode::Editing {
            task_id: id,
            buffer: "draft".to_string(),
        }
    );
}

#[test]
fn begin_edit_replaces_previous_session() {
    let mut store = TaskStore::open_in_memory().unwrap();
    let first = store.add("first").unwrap();
    let second = store.add("second").unwrap();

    store.begin_edit(first, "first");
    store.begin_edit(second, "second");

    match store.edit_mode() {
        EditMode::Editing { task_id, .. } => assert_eq!(*task_id, second),
        EditMode::Idle => panic!("expected an editing session"),
    }
}

#[test]
fn commit_edit_renames_and_returns_to_idle() {
    let mut store = TaskStore::open_in_memory().unwrap();
    let id = store.add("draft").unwrap();

    store.begin_edit(id, "draft");
    assert!(store.commit_edit(id, "  final text  "));

    assert_eq!(store.find(id).unwrap().text, "final text");
    assert_eq!(store.edit_mode(), &EditMode::Idle);
}

#[test]
fn commit_edit_with_blank_text_keeps_task_and_ends_editing() {
    let mut store = TaskStore::open_in_memory().unwrap();
    let id = store.add("keep me").unwrap();

    store.begin_edit(id, "keep me");
    assert!(!store.commit_edit(id, "   "));

    assert_eq!(store.find(id).unwrap().text, "keep me");
    assert_eq!(store.edit_mode(), &EditMode::Idle);
}

#[test]
fn commit_edit_for_removed_task_is_a_noop() {
    let mut store = TaskStore::open_in_memory().unwrap();
    let id = store.add("short lived").unwrap();

    store.begin_edit(id, "short lived");
    store.remove(id);

    assert!(!store.commit_edit(id, "revived"));
    assert_eq!(store.edit_mode(), &EditMode::Idle);
    assert!(store.is_empty());
}

#[test]
fn cancel_edit_discards_buffer_without_changes() {
    let mut store = TaskStore::open_in_memory().unwrap();
    let id = store.add("original").unwrap();

    store.begin_edit(id, "original");
    store.cancel_edit();

    assert_eq!(store.find(id).unwrap().text, "original");
    assert_eq!(store.edit_mode(), &EditMode::Idle);
}

#[test]
fn tasks_survive_close_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");

    let mut store = TaskStore::open(&path).unwrap();
    let milk = store.add("buy milk").unwrap();
    let dentist = store.add("call dentist").unwrap();
    store.toggle_completed(milk);
    store.close();

    let reopened = TaskStore::open(&path).unwrap();
    let tasks = reopened.tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, milk);
    assert_eq!(tasks[0].text, "buy milk");
    assert!(tasks[0].completed);
    assert_eq!(tasks[1].id, dentist);
    assert!(!tasks[1].completed);
}

#[test]
fn removal_survives_close_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");

    let mut store = TaskStore::open(&path).unwrap();
    let keep = store.add("keep").unwrap();
    let removed = store.add("drop").unwrap();
    store.remove(removed);
    store.close();

    let reopened = TaskStore::open(&path).unwrap();
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.tasks()[0].id, keep);
}

#[test]
fn committed_edit_survives_close_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");

    let mut store = TaskStore::open(&path).unwrap();
    let id = store.add("draft").unwrap();
    store.begin_edit(id, "draft");
    store.commit_edit(id, "final");
    store.close();

    let reopened = TaskStore::open(&path).unwrap();
    assert_eq!(reopened.find(id).unwrap().text, "final");
}

#[test]
fn blank_add_does_not_touch_persisted_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");

    let mut store = TaskStore::open(&path).unwrap();
    store.add("keep").unwrap();
    store.close();

    let mut second = TaskStore::open(&path).unwrap();
    assert_eq!(second.add("   "), None);
    second.close();

    let reopened = TaskStore::open(&path).unwrap();
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.tasks()[0].text, "keep");
}

#[test]
fn flush_makes_queued_writes_visible_to_other_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");

    let mut store = TaskStore::open(&path).unwrap();
    store.add("visible after flush").unwrap();
    store.flush();

    let conn = open_db(&path).unwrap();
    let repo = SqliteSlotRepository::new(&conn);
    let payload = repo.read_slot(TASKS_SLOT_KEY).unwrap().unwrap();
    let persisted = decode_snapshot(&payload).unwrap();
    assert_eq!(persisted.as_slice(), store.tasks());

    store.close();
}

#[test]
fn malformed_slot_payload_loads_as_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");
    seed_slot(&path, "definitely not json");

    let store = TaskStore::open(&path).unwrap();
    assert!(store.is_empty());
}

#[test]
fn duplicate_id_payload_loads_as_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");
    seed_slot(
        &path,
        r#"[
            {"id": "00000000-0000-4000-8000-000000000001", "text": "twin", "completed": false},
            {"id": "00000000-0000-4000-8000-000000000001", "text": "twin", "completed": true}
        ]"#,
    );

    let store = TaskStore::open(&path).unwrap();
    assert!(store.is_empty());
}

#[test]
fn next_mutation_overwrites_malformed_payload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");
    seed_slot(&path, "definitely not json");

    let mut store = TaskStore::open(&path).unwrap();
    store.add("fresh start").unwrap();
    store.close();

    let reopened = TaskStore::open(&path).unwrap();
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.tasks()[0].text, "fresh start");
}

#[test]
fn open_rejects_database_from_newer_build() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = TaskStore::open(&path).unwrap_err();
    assert!(matches!(err, DbError::UnsupportedSchemaVersion { .. }));
}

fn seed_slot(path: &std::path::Path, payload: &str) {
    let conn = open_db(path).unwrap();
    let repo = SqliteSlotRepository::new(&conn);
    repo.write_slot(TASKS_SLOT_KEY, payload).unwrap();
}
