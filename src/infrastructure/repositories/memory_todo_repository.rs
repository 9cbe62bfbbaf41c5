use std::sync::Mutex;

use crate::domain::entities::TodoItem;
use crate::domain::repositories::{PersistenceError, TodoPersistence};

/// Keeps the last saved snapshot in memory; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryTodoRepository {
    snapshot: Mutex<Vec<TodoItem>>,
}

impl MemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<TodoItem>) -> Self {
        Self {
            snapshot: Mutex::new(items),
        }
    }
}

impl TodoPersistence for MemoryTodoRepository {
    fn save_all(&self, items: &[TodoItem]) -> Result<(), PersistenceError> {
        let mut snapshot = self
            .snapshot
            .lock()
            .map_err(|_| PersistenceError::Storage("snapshot lock poisoned".to_string()))?;
        *snapshot = items.to_vec();
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<TodoItem>, PersistenceError> {
        self.snapshot
            .lock()
            .map(|snapshot| snapshot.clone())
            .map_err(|_| PersistenceError::Storage("snapshot lock poisoned".to_string()))
    }
}
