use chrono::NaiveDateTime;
use std::cmp::Ordering;
use uuid::Uuid;

use crate::domain::value_objects::RecurrenceFrequency;

/// A reminder request for one todo item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub item_id: Uuid,
    pub title: String,
    pub fire_at: NaiveDateTime,
    pub repeat: Option<RecurrenceFrequency>, // chained after firing when set
}

impl Reminder {
    pub fn new(item_id: Uuid, title: impl Into<String>, fire_at: NaiveDateTime) -> Self {
        Self {
            item_id,
            title: title.into(),
            fire_at,
            repeat: None,
        }
    }

    pub fn repeating(mut self, frequency: Option<RecurrenceFrequency>) -> Self {
        self.repeat = frequency;
        self
    }
}

/// Entry held by the reminder queue.
/// `generation` tells the live entry for an item apart from replaced ones (lazy deletion).
#[derive(Debug, Clone)]
pub struct ScheduledReminder {
    pub reminder: Reminder,
    pub generation: u64,
}

impl ScheduledReminder {
    pub fn new(reminder: Reminder, generation: u64) -> Self {
        Self {
            reminder,
            generation,
        }
    }

    pub fn item_id(&self) -> Uuid {
        self.reminder.item_id
    }

    pub fn fire_at(&self) -> NaiveDateTime {
        self.reminder.fire_at
    }
}

// natural order is by fire time, then by scheduling order; wrap in Reverse for a min-heap
impl PartialOrd for ScheduledReminder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledReminder {
    fn cmp(&self, other: &Self) -> Ordering {
        self.reminder
            .fire_at
            .cmp(&other.reminder.fire_at)
            .then(self.generation.cmp(&other.generation))
    }
}

impl PartialEq for ScheduledReminder {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation && self.reminder.item_id == other.reminder.item_id
    }
}

impl Eq for ScheduledReminder {}
