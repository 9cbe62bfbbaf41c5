use uuid::Uuid;

use crate::domain::entities::Reminder;

#[derive(Debug)]
pub enum SchedulerError {
    Unavailable(String),
}

impl std::fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SchedulerError::Unavailable(msg) => write!(f, "Scheduler unavailable: {}", msg),
        }
    }
}

impl std::error::Error for SchedulerError {}

/// Facility that arms one-shot reminders for todo items.
///
/// At most one reminder is pending per item: scheduling again replaces the previous one.
pub trait ReminderScheduler: Send + Sync {
    fn schedule(&self, reminder: Reminder) -> Result<(), SchedulerError>;

    /// Removes the pending reminder for `item_id`; no-op when there is none
    fn cancel(&self, item_id: Uuid) -> Result<(), SchedulerError>;
}
