use async_trait::async_trait;
use tracing::info;

use crate::domain::entities::Reminder;

/// Destination for reminders that have come due
#[async_trait]
pub trait ReminderSink: Send + Sync {
    async fn deliver(&self, reminder: &Reminder) -> Result<(), String>;
}

/// Delivers reminders to the log
#[derive(Debug, Clone, Default)]
pub struct LoggingReminderSink;

impl LoggingReminderSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReminderSink for LoggingReminderSink {
    async fn deliver(&self, reminder: &Reminder) -> Result<(), String> {
        info!(
            item_id = %reminder.item_id,
            due = %reminder.fire_at,
            "Reminder: {}",
            reminder.title
        );
        Ok(())
    }
}
