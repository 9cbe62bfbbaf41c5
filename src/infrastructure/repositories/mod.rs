pub mod json_preferences_repository;
pub mod json_todo_repository;
pub mod memory_todo_repository;
pub mod sqlite_todo_repository;

pub use json_preferences_repository::JsonPreferencesRepository;
pub use json_todo_repository::JsonTodoRepository;
pub use memory_todo_repository::MemoryTodoRepository;
pub use sqlite_todo_repository::SqliteTodoRepository;
