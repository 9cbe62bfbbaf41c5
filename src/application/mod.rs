pub mod clock;
pub mod preferences_service;
pub mod recurrence;
pub mod reminder_planner;
pub mod todo_store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use preferences_service::PreferencesService;
pub use todo_store::{NewTodo, TodoStore};
