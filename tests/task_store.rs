use beatbook::config::TasksConfig;
use beatbook::notify::{BufferSink, NullSink};
use beatbook::storage::Storage;
use beatbook::task::{default_tasks, EstimatedTime, Priority, Task, TaskStore};
use tempfile::TempDir;

fn open_store(temp: &TempDir) -> (TaskStore, BufferSink) {
    let storage = Storage::new(temp.path().to_path_buf());
    let buffer = BufferSink::new();
    let store = TaskStore::open(storage, &TasksConfig::default(), Box::new(buffer.clone()))
        .expect("open store");
    (store, buffer)
}

fn task(id: &str, title: &str) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        completed: false,
        due_date: None,
        priority: Priority::Medium,
        category: String::new(),
        estimated_time: None,
        subtasks: Vec::new(),
    }
}

#[test]
fn seeding_twice_from_same_blob_yields_same_collection() {
    let temp = TempDir::new().expect("tempdir");

    {
        let (mut store, _buffer) = open_store(&temp);
        store.create(task("t3", "Charge transmitters")).expect("create");
    }

    let (first, _buffer) = open_store(&temp);
    let (second, _buffer) = open_store(&temp);
    assert_eq!(first.tasks(), second.tasks());
    assert_eq!(first.tasks().len(), 3);
}

#[test]
fn create_then_delete_restores_original_collection() {
    let temp = TempDir::new().expect("tempdir");
    let (mut store, _buffer) = open_store(&temp);
    let before = store.tasks().to_vec();

    store.create(task("t9", "Ephemeral")).expect("create");
    store.delete("t9").expect("delete");

    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn toggle_twice_restores_completed_flag_for_every_task() {
    let temp = TempDir::new().expect("tempdir");
    let (mut store, _buffer) = open_store(&temp);

    let ids: Vec<String> = store.tasks().iter().map(|t| t.id.clone()).collect();
    let before: Vec<bool> = store.tasks().iter().map(|t| t.completed).collect();

    for id in &ids {
        store.toggle(id).expect("toggle");
        store.toggle(id).expect("toggle back");
    }

    let after: Vec<bool> = store.tasks().iter().map(|t| t.completed).collect();
    assert_eq!(before, after);
}

#[test]
fn noop_mutations_leave_collection_unchanged_and_do_not_fail() {
    let temp = TempDir::new().expect("tempdir");
    let (mut store, _buffer) = open_store(&temp);
    let before = store.tasks().to_vec();

    store.update(task("ghost", "nobody")).expect("update");
    store.delete("ghost").expect("delete");
    store.toggle("ghost").expect("toggle");

    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn mutations_are_visible_after_reopen() {
    let temp = TempDir::new().expect("tempdir");

    {
        let (mut store, _buffer) = open_store(&temp);
        let mut edited = store.get("1").cloned().expect("sample task");
        edited.title = "Print wristbands".to_string();
        edited.estimated_time = Some(EstimatedTime::Text("an evening".to_string()));
        store.update(edited).expect("update");
        store.toggle("2").expect("toggle");
    }

    let (store, _buffer) = open_store(&temp);
    assert_eq!(store.get("1").expect("task 1").title, "Print wristbands");
    assert_eq!(
        store.get("2").expect("task 2").completed,
        !default_tasks()[1].completed
    );
}

#[test]
fn deleting_every_task_persists_the_empty_collection() {
    let temp = TempDir::new().expect("tempdir");

    {
        let (mut store, _buffer) = open_store(&temp);
        for id in ["1", "2"] {
            store.delete(id).expect("delete");
        }
    }

    // The empty collection survives a restart instead of being reseeded.
    let (store, _buffer) = open_store(&temp);
    assert!(store.tasks().is_empty());
}

#[test]
fn insertion_order_is_preserved() {
    let temp = TempDir::new().expect("tempdir");
    let (mut store, _buffer) = open_store(&temp);

    store.create(task("t3", "Third")).expect("create");
    store.create(task("t4", "Fourth")).expect("create");

    let ids: Vec<&str> = store.tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "t3", "t4"]);
}

#[test]
fn notices_flow_to_the_injected_sink() {
    let temp = TempDir::new().expect("tempdir");
    let (mut store, buffer) = open_store(&temp);

    store.create(task("t3", "Pack spare batteries")).expect("create");
    store.update(task("t3", "Pack spare batteries x2")).expect("update");
    store.delete("t3").expect("delete");

    let titles: Vec<String> = buffer.drain().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["Task Created", "Task Updated", "Task Deleted"]);
}

#[test]
fn store_accepts_a_null_sink() {
    let temp = TempDir::new().expect("tempdir");
    let storage = Storage::new(temp.path().to_path_buf());
    let mut store = TaskStore::open(storage, &TasksConfig::default(), Box::new(NullSink))
        .expect("open store");

    store.create(task("t3", "Quiet")).expect("create");
    assert_eq!(store.tasks().len(), 3);
}

#[test]
fn legacy_camel_case_blob_loads_unchanged() {
    let temp = TempDir::new().expect("tempdir");
    let storage = Storage::new(temp.path().to_path_buf());
    storage.init().expect("init");

    // Shape written by the web client.
    let blob = r#"[
        {
            "id": "42",
            "title": "Book venue",
            "description": "Warehouse on 5th",
            "completed": false,
            "dueDate": "2026-09-01",
            "priority": "high",
            "category": "Logistics",
            "estimatedTime": "2 evenings",
            "subtasks": [
                { "id": "42a", "title": "Call owner", "completed": true }
            ]
        }
    ]"#;
    std::fs::write(storage.slot_path("tasks"), blob).expect("write blob");

    let (store, _buffer) = open_store(&temp);
    let loaded = store.get("42").expect("legacy task");
    assert_eq!(loaded.priority, Priority::High);
    assert_eq!(loaded.due_date.as_deref(), Some("2026-09-01"));
    assert_eq!(
        loaded.estimated_time,
        Some(EstimatedTime::Text("2 evenings".to_string()))
    );
    assert_eq!(loaded.subtasks.len(), 1);
    assert!(loaded.subtasks[0].completed);
}
