pub mod preferences_repository;
pub mod reminder_scheduler;
pub mod todo_persistence;

pub use preferences_repository::PreferencesRepository;
pub use reminder_scheduler::{ReminderScheduler, SchedulerError};
pub use todo_persistence::{PersistenceError, TODO_STORAGE_KEY, TodoPersistence};
