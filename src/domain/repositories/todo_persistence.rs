use crate::domain::entities::TodoItem;

/// Storage key (file stem / table name) the whole collection is saved under
pub const TODO_STORAGE_KEY: &str = "todo_items";

#[derive(Debug)]
pub enum PersistenceError {
    Io(String),
    Serialization(String),
    Storage(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PersistenceError::Io(msg) => write!(f, "I/O error: {}", msg),
            PersistenceError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            PersistenceError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<std::io::Error> for PersistenceError {
    fn from(e: std::io::Error) -> Self {
        PersistenceError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        PersistenceError::Serialization(e.to_string())
    }
}

/// Saves and loads the full todo collection as one unit. Order must be preserved.
pub trait TodoPersistence: Send + Sync {
    /// Replace everything stored with `items`
    fn save_all(&self, items: &[TodoItem]) -> Result<(), PersistenceError>;

    /// Load the stored collection; missing data is an empty collection, not an error
    fn load_all(&self) -> Result<Vec<TodoItem>, PersistenceError>;
}
