//! Store mutations flowing through the reminder queue into the dispatcher.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime};
use std::sync::{Arc, Mutex};
use todo_reminders::application::{FixedClock, NewTodo, TodoStore};
use todo_reminders::domain::{Priority, RecurrenceFrequency, Reminder};
use todo_reminders::infrastructure::repositories::MemoryTodoRepository;
use todo_reminders::infrastructure::scheduler::{MemoryReminderQueue, ReminderDispatcher, ReminderSink};

fn at(d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

#[derive(Default)]
struct Inbox {
    received: Mutex<Vec<Reminder>>,
}

#[async_trait]
impl ReminderSink for Inbox {
    async fn deliver(&self, reminder: &Reminder) -> Result<(), String> {
        self.received.lock().unwrap().push(reminder.clone());
        Ok(())
    }
}

struct Harness {
    store: TodoStore,
    queue: Arc<MemoryReminderQueue>,
    inbox: Arc<Inbox>,
    clock: Arc<FixedClock>,
    dispatcher: ReminderDispatcher,
}

fn harness() -> Harness {
    let queue = Arc::new(MemoryReminderQueue::new());
    let inbox = Arc::new(Inbox::default());
    let clock = Arc::new(FixedClock::new(at(16, 12)));
    let store = TodoStore::new(
        Arc::new(MemoryTodoRepository::new()),
        queue.clone(),
        clock.clone(),
    );
    let dispatcher = ReminderDispatcher::new(queue.clone(), inbox.clone(), clock.clone());
    Harness {
        store,
        queue,
        inbox,
        clock,
        dispatcher,
    }
}

fn titles(inbox: &Inbox) -> Vec<String> {
    inbox
        .received
        .lock()
        .unwrap()
        .iter()
        .map(|r| r.title.clone())
        .collect()
}

#[tokio::test]
async fn completed_items_are_never_reminded() {
    let mut h = harness();
    let report = h.store.add(NewTodo::new("Send report").due(at(17, 0).date(), None));
    h.store.add(NewTodo::new("Water plants").due(at(17, 0).date(), None));

    h.store.toggle_completion(report.id);

    h.clock.set(at(17, 10));
    h.dispatcher.dispatch_due().await.unwrap();
    assert_eq!(titles(&h.inbox), vec!["Water plants"]);
}

#[tokio::test]
async fn moving_a_due_date_replaces_the_reminder() {
    let mut h = harness();
    let dentist = h.store.add(NewTodo::new("Dentist").due(at(18, 0).date(), None));
    h.store.update_due_date(dentist.id, Some(at(20, 0).date()));
    assert_eq!(h.queue.pending_count().unwrap(), 1);

    h.clock.set(at(19, 12));
    h.dispatcher.dispatch_due().await.unwrap();
    assert!(titles(&h.inbox).is_empty());

    h.clock.set(at(20, 9));
    h.dispatcher.dispatch_due().await.unwrap();
    assert_eq!(titles(&h.inbox), vec!["Dentist"]);
}

#[tokio::test]
async fn deleted_items_are_not_reminded() {
    let mut h = harness();
    let a = h.store.add(NewTodo::new("a").due(at(17, 0).date(), None));
    h.store.add(NewTodo::new("b").due(at(17, 0).date(), None));
    h.store.delete(a.id);
    h.store.delete_at(&[0]);

    h.clock.advance(ChronoDuration::days(3));
    h.dispatcher.dispatch_due().await.unwrap();
    assert!(titles(&h.inbox).is_empty());
    assert_eq!(h.queue.pending_count().unwrap(), 0);
}

#[tokio::test]
async fn recurring_item_keeps_reminding_and_completion_rearms_it() {
    let mut h = harness();
    let gym = h.store.add(
        NewTodo::new("Gym")
            .due(at(16, 0).date(), None)
            .recurring(RecurrenceFrequency::Daily),
    );

    // 09:00 today already passed: armed for tomorrow
    assert_eq!(h.queue.pending_for(gym.id).unwrap().unwrap().fire_at, at(17, 9));
    h.dispatcher.dispatch_due().await.unwrap();
    assert!(titles(&h.inbox).is_empty());

    h.clock.set(at(17, 9));
    h.dispatcher.dispatch_due().await.unwrap();
    assert_eq!(titles(&h.inbox), vec!["Gym"]);
    assert_eq!(h.queue.pending_for(gym.id).unwrap().unwrap().fire_at, at(18, 9));

    // completing moves the item itself past now; still one reminder
    h.store.toggle_completion(gym.id);
    let item = h.store.get(gym.id).unwrap();
    assert_eq!(item.due_date, Some(at(18, 0).date()));
    assert!(!item.is_completed);
    assert_eq!(h.queue.pending_count().unwrap(), 1);
    assert_eq!(h.queue.pending_for(gym.id).unwrap().unwrap().fire_at, at(18, 9));
}

#[tokio::test]
async fn unrelated_edits_do_not_repeat_a_delivered_reminder() {
    let mut h = harness();
    let bill = h.store.add(NewTodo::new("Pay bill").due(at(17, 0).date(), None));

    h.clock.set(at(17, 10));
    h.dispatcher.dispatch_due().await.unwrap();
    assert_eq!(titles(&h.inbox), vec!["Pay bill"]);

    h.store.update_priority(bill.id, Priority::High);
    h.store.update_title(bill.id, "Pay the bill".to_string());
    h.dispatcher.dispatch_due().await.unwrap();

    assert_eq!(titles(&h.inbox), vec!["Pay bill"]);
    assert_eq!(h.queue.pending_count().unwrap(), 0);
}

#[tokio::test]
async fn renaming_a_recurring_item_keeps_its_next_occurrence() {
    let mut h = harness();
    let gym = h.store.add(
        NewTodo::new("Gym")
            .due(at(17, 0).date(), None)
            .recurring(RecurrenceFrequency::Daily),
    );

    h.clock.set(at(17, 10));
    h.dispatcher.dispatch_due().await.unwrap();
    assert_eq!(h.queue.pending_for(gym.id).unwrap().unwrap().fire_at, at(18, 9));

    h.store.update_title(gym.id, "Gym!".to_string());
    let pending = h.queue.pending_for(gym.id).unwrap().unwrap();
    assert_eq!(pending.fire_at, at(18, 9));
    assert_eq!(pending.title, "Gym!");

    h.dispatcher.dispatch_due().await.unwrap();
    assert_eq!(titles(&h.inbox), vec!["Gym"]);

    h.clock.set(at(18, 9));
    h.dispatcher.dispatch_due().await.unwrap();
    assert_eq!(titles(&h.inbox), vec!["Gym", "Gym!"]);
}

#[tokio::test]
async fn restart_does_not_repeat_missed_one_shot_reminders() {
    let repo = Arc::new(MemoryTodoRepository::new());
    let queue = Arc::new(MemoryReminderQueue::new());
    let clock = Arc::new(FixedClock::new(at(16, 12)));
    let mut store = TodoStore::new(repo.clone(), queue.clone(), clock.clone());
    store.add(NewTodo::new("Pay bill").due(at(17, 0).date(), None));
    store.add(NewTodo::new("Renew passport").due(at(25, 0).date(), None));

    clock.set(at(18, 8));
    let fresh_queue = Arc::new(MemoryReminderQueue::new());
    let reopened = TodoStore::new(repo, fresh_queue.clone(), clock);

    assert_eq!(reopened.rearm_reminders(), 1);
    assert_eq!(fresh_queue.peek_next().unwrap().unwrap().reminder.title, "Renew passport");
}
