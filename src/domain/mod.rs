pub mod entities;
pub mod repositories;
pub mod validation;
pub mod value_objects;

pub use entities::{Preferences, Reminder, ScheduledReminder, TodoItem};
pub use repositories::{
    PersistenceError, PreferencesRepository, ReminderScheduler, SchedulerError, TodoPersistence,
};
pub use validation::{ValidationError, validate_title};
pub use value_objects::{Priority, RecurrenceFrequency, Theme};
