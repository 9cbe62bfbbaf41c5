use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::application::clock::Clock;
use crate::application::{recurrence, reminder_planner};
use crate::domain::entities::TodoItem;
use crate::domain::repositories::{ReminderScheduler, TodoPersistence};
use crate::domain::value_objects::{Priority, RecurrenceFrequency};

/// Request to create a todo item. Defaults: Medium priority, no due date, not recurring.
#[derive(Debug, Clone, Default)]
pub struct NewTodo {
    pub title: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub recurring: bool,
    pub frequency: RecurrenceFrequency,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn due(mut self, date: NaiveDate, time: Option<NaiveTime>) -> Self {
        self.due_date = Some(date);
        self.due_time = time;
        self
    }

    pub fn recurring(mut self, frequency: RecurrenceFrequency) -> Self {
        self.recurring = true;
        self.frequency = frequency;
        self
    }
}

/// Owner of the ordered todo collection.
///
/// Every mutation saves the whole collection and keeps the item's reminder in sync.
/// Unknown ids are silent no-ops; persistence and scheduler failures are logged and the
/// in-memory state stays authoritative. Operations take `&mut self`, so a caller sharing
/// the store across threads wraps it in a single mutex.
pub struct TodoStore {
    items: Vec<TodoItem>,
    persistence: Arc<dyn TodoPersistence>,
    scheduler: Arc<dyn ReminderScheduler>,
    clock: Arc<dyn Clock>,
}

impl TodoStore {
    /// Loads the persisted collection; a failed load starts empty
    pub fn new(
        persistence: Arc<dyn TodoPersistence>,
        scheduler: Arc<dyn ReminderScheduler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let items = match persistence.load_all() {
            Ok(items) => {
                info!("Loaded {} todo items", items.len());
                items
            }
            Err(e) => {
                error!("Failed to load todo items, starting empty: {}", e);
                Vec::new()
            }
        };

        Self {
            items,
            persistence,
            scheduler,
            clock,
        }
    }

    // === QUERIES ===

    /// Items in display (insertion) order
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn get(&self, id: Uuid) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn overdue(&self, now: NaiveDateTime) -> Vec<&TodoItem> {
        self.items.iter().filter(|item| item.is_overdue(now)).collect()
    }

    /// High first; insertion order is kept within one priority
    pub fn sorted_by_priority(&self) -> Vec<&TodoItem> {
        let mut sorted: Vec<&TodoItem> = self.items.iter().collect();
        sorted.sort_by_key(|item| item.priority);
        sorted
    }

    // === MUTATIONS ===

    /// Appends a new item. The title is trusted; see `validate_title` for the caller-side check.
    pub fn add(&mut self, new: NewTodo) -> TodoItem {
        let item = TodoItem::new(
            new.title,
            new.priority,
            new.due_date,
            new.due_time,
            new.recurring,
            new.frequency,
        );
        debug!("Adding todo {} ({})", item.id, item.title);

        self.items.push(item.clone());
        self.persist();
        self.sync_reminder(&item);
        item
    }

    pub fn update_title(&mut self, id: Uuid, title: String) -> Option<TodoItem> {
        self.mutate(id, |item| item.title = title)
    }

    pub fn update_priority(&mut self, id: Uuid, priority: Priority) -> Option<TodoItem> {
        self.mutate(id, |item| item.priority = priority)
    }

    /// Setting a date keeps the time and recurrence; clearing it also clears both.
    pub fn update_due_date(&mut self, id: Uuid, date: Option<NaiveDate>) -> Option<TodoItem> {
        self.mutate(id, |item| {
            item.due_date = date;
            if date.is_none() {
                item.due_time = None;
                item.is_recurring = false;
            }
        })
    }

    /// Ignored (item returned unchanged) while the item has no due date.
    pub fn update_due_time(&mut self, id: Uuid, time: Option<NaiveTime>) -> Option<TodoItem> {
        let item = self.get(id)?;
        if item.due_date.is_none() {
            debug!("Ignoring due time for undated todo {}", id);
            return Some(item.clone());
        }
        self.mutate(id, |item| item.due_time = time)
    }

    /// Recurrence can only be switched on for an item that has a due date.
    pub fn set_recurrence(
        &mut self,
        id: Uuid,
        recurring: bool,
        frequency: RecurrenceFrequency,
    ) -> Option<TodoItem> {
        self.mutate(id, |item| {
            item.is_recurring = recurring && item.due_date.is_some();
            item.recurrence_frequency = frequency;
        })
    }

    /// Flips completion and returns the item's title (empty when the id is unknown).
    ///
    /// Completing a recurring item moves it to its next occurrence and reopens it, so a
    /// recurring item is never observed as completed.
    pub fn toggle_completion(&mut self, id: Uuid) -> String {
        let Some(index) = self.position(id) else {
            debug!("Toggle ignored, todo {} not found", id);
            return String::new();
        };
        let now = self.clock.now();

        let item = &mut self.items[index];
        item.is_completed = !item.is_completed;

        if item.is_completed {
            if let (Some(frequency), Some(due)) = (item.recurrence(), item.due_date_time()) {
                let next = recurrence::roll_forward(due, frequency, now);
                item.reschedule_to(next);
                item.is_completed = false;
                info!("Recurring todo {} continues on {}", item.id, next);
            }
        }

        let updated = item.clone();
        self.persist();
        self.sync_reminder(&updated);
        updated.title
    }

    pub fn delete(&mut self, id: Uuid) -> Option<TodoItem> {
        let index = self.position(id)?;
        let removed = self.items.remove(index);

        self.persist();
        self.cancel_reminder(removed.id);
        Some(removed)
    }

    /// Removes the items at `indices` (positions in the current order).
    /// Out-of-range and repeated indices are skipped. Returns removed items in their former order.
    pub fn delete_at(&mut self, indices: &[usize]) -> Vec<TodoItem> {
        let mut positions: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.items.len())
            .collect();
        positions.sort_unstable();
        positions.dedup();

        // highest first so earlier positions don't shift
        let mut removed: Vec<TodoItem> = positions
            .into_iter()
            .rev()
            .map(|i| self.items.remove(i))
            .collect();
        if removed.is_empty() {
            return removed;
        }
        removed.reverse();

        self.persist();
        for item in &removed {
            self.cancel_reminder(item.id);
        }
        removed
    }

    /// Schedules (or cancels) the reminder of every item; used after loading.
    /// One-shot items already past due are not re-armed. Returns how many reminders are armed.
    pub fn rearm_reminders(&self) -> usize {
        self.items
            .iter()
            .filter(|item| self.sync_reminder(item))
            .count()
    }

    // === HELPERS ===

    fn position(&self, id: Uuid) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn mutate<F>(&mut self, id: Uuid, change: F) -> Option<TodoItem>
    where
        F: FnOnce(&mut TodoItem),
    {
        let index = self.position(id)?;
        change(&mut self.items[index]);
        let updated = self.items[index].clone();

        self.persist();
        self.sync_reminder(&updated);
        Some(updated)
    }

    fn persist(&self) {
        if let Err(e) = self.persistence.save_all(&self.items) {
            error!("Failed to save {} todo items: {}", self.items.len(), e);
        }
    }

    // true when a reminder is armed for the item
    fn sync_reminder(&self, item: &TodoItem) -> bool {
        match reminder_planner::reminder_for(item, self.clock.now()) {
            Some(reminder) => match self.scheduler.schedule(reminder) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Failed to schedule reminder for todo {}: {}", item.id, e);
                    false
                }
            },
            None => {
                self.cancel_reminder(item.id);
                false
            }
        }
    }

    fn cancel_reminder(&self, id: Uuid) {
        if let Err(e) = self.scheduler.cancel(id) {
            warn!("Failed to cancel reminder for todo {}: {}", id, e);
        }
    }
}
