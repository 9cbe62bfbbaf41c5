pub mod memory_reminder_queue;
pub mod reminder_dispatcher;
pub mod reminder_sink;

pub use memory_reminder_queue::MemoryReminderQueue;
pub use reminder_dispatcher::ReminderDispatcher;
pub use reminder_sink::{LoggingReminderSink, ReminderSink};
