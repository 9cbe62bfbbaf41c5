use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{Priority, RecurrenceFrequency};

/// Hour of day used when an item has a due date but no explicit time
pub const DEFAULT_DUE_HOUR: u32 = 9;

pub fn default_due_time() -> NaiveTime {
    NaiveTime::from_hms_opt(DEFAULT_DUE_HOUR, 0, 0).unwrap_or(NaiveTime::MIN)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_time: Option<NaiveTime>,
    #[serde(default)]
    pub is_recurring: bool, // only meaningful with a due date
    #[serde(default)]
    pub recurrence_frequency: RecurrenceFrequency,
}

impl TodoItem {
    /// Builds a fresh, not yet completed item with a new id.
    /// A recurring flag without a due date is dropped so `is_recurring` always implies `due_date`.
    pub fn new(
        title: String,
        priority: Priority,
        due_date: Option<NaiveDate>,
        due_time: Option<NaiveTime>,
        is_recurring: bool,
        recurrence_frequency: RecurrenceFrequency,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            is_completed: false,
            priority,
            due_date,
            due_time: due_date.and(due_time),
            is_recurring: is_recurring && due_date.is_some(),
            recurrence_frequency,
        }
    }

    /// Due date combined with the due time (09:00 when no time is set)
    pub fn due_date_time(&self) -> Option<NaiveDateTime> {
        self.due_date
            .map(|date| date.and_time(self.due_time.unwrap_or_else(default_due_time)))
    }

    /// Overdue means due strictly before `now` and still open. Never stored.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        if self.is_completed {
            return false;
        }
        matches!(self.due_date_time(), Some(due) if due < now)
    }

    /// Recurrence that applies to this item, if any
    pub fn recurrence(&self) -> Option<RecurrenceFrequency> {
        (self.is_recurring && self.due_date.is_some()).then_some(self.recurrence_frequency)
    }

    /// Moves the item to a new due moment, keeping an explicit time only if one was set.
    pub(crate) fn reschedule_to(&mut self, due: NaiveDateTime) {
        self.due_date = Some(due.date());
        if self.due_time.is_some() {
            self.due_time = Some(due.time());
        }
    }
}
