pub mod preferences;
pub mod scheduled_reminder;
pub mod todo_item;

pub use preferences::Preferences;
pub use scheduled_reminder::{Reminder, ScheduledReminder};
pub use todo_item::TodoItem;
