use chrono::NaiveDateTime;

use crate::application::recurrence;
use crate::domain::entities::{Reminder, TodoItem};

/// Reminder an item should have at `now`.
///
/// Open items get one at their due moment. A recurring item whose due moment has passed is
/// reminded at its next occurrence; a one-shot item whose due moment has passed gets none,
/// since that reminder was already due.
pub fn reminder_for(item: &TodoItem, now: NaiveDateTime) -> Option<Reminder> {
    if item.is_completed {
        return None;
    }
    let due = item.due_date_time()?;
    let fire_at = match item.recurrence() {
        Some(frequency) => recurrence::next_occurrence(due, frequency, now),
        None if due > now => due,
        None => return None,
    };
    Some(Reminder::new(item.id, item.title.clone(), fire_at).repeating(item.recurrence()))
}

/// Follow-up for a reminder that just fired. Only repeating reminders chain.
pub fn chain_next(fired: &Reminder, now: NaiveDateTime) -> Option<Reminder> {
    let frequency = fired.repeat?;
    let next = recurrence::roll_forward(fired.fire_at, frequency, now);
    if next <= fired.fire_at {
        return None;
    }
    Some(Reminder {
        fire_at: next,
        ..fired.clone()
    })
}
