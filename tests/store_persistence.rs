//! Todo store backed by real storage.
//!
//! Each test builds a store on a JSON or SQLite backend in a temp directory, mutates it,
//! then opens a second store on the same location to check what survived.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::sync::Arc;
use todo_reminders::application::{FixedClock, NewTodo, TodoStore};
use todo_reminders::domain::{Priority, RecurrenceFrequency, TodoPersistence};
use todo_reminders::infrastructure::repositories::{JsonTodoRepository, SqliteTodoRepository};
use todo_reminders::infrastructure::scheduler::MemoryReminderQueue;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn open(persistence: Arc<dyn TodoPersistence>) -> (TodoStore, Arc<MemoryReminderQueue>) {
    let queue = Arc::new(MemoryReminderQueue::new());
    let store = TodoStore::new(persistence, queue.clone(), Arc::new(FixedClock::new(now())));
    (store, queue)
}

fn exercise(first: Arc<dyn TodoPersistence>, second: Arc<dyn TodoPersistence>) {
    let (mut store, _) = open(first);

    let milk = store.add(NewTodo::new("Buy milk"));
    let rent = store.add(
        NewTodo::new("Pay rent")
            .priority(Priority::High)
            .due(
                NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
                NaiveTime::from_hms_opt(8, 0, 0),
            )
            .recurring(RecurrenceFrequency::Monthly),
    );
    let trip = store.add(
        NewTodo::new("Book trip")
            .priority(Priority::Low)
            .due(NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(), None),
    );

    store.toggle_completion(milk.id);
    store.toggle_completion(rent.id);
    store.update_due_date(trip.id, None);

    let (reopened, queue) = open(second);
    let items = reopened.items();
    assert_eq!(items.len(), 3);
    assert_eq!(items, store.items());

    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Buy milk", "Pay rent", "Book trip"]);

    assert!(items[0].is_completed);

    let rent = &items[1];
    assert!(!rent.is_completed);
    assert_eq!(rent.priority, Priority::High);
    assert_eq!(rent.due_date, NaiveDate::from_ymd_opt(2026, 11, 1));
    assert_eq!(rent.due_time, NaiveTime::from_hms_opt(8, 0, 0));
    assert_eq!(rent.recurrence(), Some(RecurrenceFrequency::Monthly));

    assert_eq!(items[2].due_date, None);
    assert!(!items[2].is_recurring);

    // only the rent reminder needs arming after a restart
    assert_eq!(reopened.rearm_reminders(), 1);
    assert_eq!(queue.pending_count().unwrap(), 1);
}

#[test]
fn json_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    exercise(
        Arc::new(JsonTodoRepository::in_dir(dir.path())),
        Arc::new(JsonTodoRepository::in_dir(dir.path())),
    );
}

#[test]
fn sqlite_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo_items.db");
    exercise(
        Arc::new(SqliteTodoRepository::new(&path).unwrap()),
        Arc::new(SqliteTodoRepository::new(&path).unwrap()),
    );
}

#[test]
fn corrupt_json_starts_empty_and_recovers_on_next_save() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonTodoRepository::in_dir(dir.path());
    std::fs::write(repo.file_path(), "[{\"broken\":").unwrap();

    let (mut store, _) = open(Arc::new(repo.clone()));
    assert!(store.is_empty());

    store.add(NewTodo::new("Fresh start"));
    assert_eq!(repo.load_all().unwrap().len(), 1);
}

#[test]
fn size_tracks_adds_minus_deletes() {
    let (mut store, _) = open(Arc::new(
        todo_reminders::infrastructure::repositories::MemoryTodoRepository::new(),
    ));

    let ids: Vec<_> = (0..6)
        .map(|i| store.add(NewTodo::new(format!("task {i}"))).id)
        .collect();
    store.delete(ids[2]);
    store.delete_at(&[0, 3]);

    assert_eq!(store.len(), 3);
    let titles: Vec<&str> = store.items().iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["task 1", "task 3", "task 5"]);
}
