//! Todo list core with recurring due dates and local reminders.
//!
//! Layers: `domain` (entities, value objects, collaborator traits), `application`
//! (the todo store, recurrence arithmetic, reminder planning) and `infrastructure`
//! (JSON/SQLite persistence, the reminder queue and its tokio dispatcher).

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod utils;

pub use application::{Clock, FixedClock, NewTodo, PreferencesService, SystemClock, TodoStore};
pub use config::{AppConfig, StorageBackend};
pub use domain::{
    PersistenceError, Priority, RecurrenceFrequency, Reminder, ReminderScheduler, SchedulerError,
    Theme, TodoItem, TodoPersistence, ValidationError, validate_title,
};
