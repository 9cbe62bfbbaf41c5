use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::entities::TodoItem;
use crate::domain::repositories::{PersistenceError, TODO_STORAGE_KEY, TodoPersistence};

/// Stores the whole collection as one pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct JsonTodoRepository {
    file_path: PathBuf,
}

impl JsonTodoRepository {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    /// `<dir>/todo_items.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", TODO_STORAGE_KEY)))
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl TodoPersistence for JsonTodoRepository {
    fn save_all(&self, items: &[TodoItem]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(items)?;

        // create directory
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // write next to the target, then rename so a crash never leaves half a file
        let tmp_path = self.file_path.with_extension("json.tmp");
        fs::write(&tmp_path, json.as_bytes())?;
        fs::rename(&tmp_path, &self.file_path)?;

        debug!("Saved {} todo items to {:?}", items.len(), self.file_path);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<TodoItem>, PersistenceError> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.file_path)?;
        let items: Vec<TodoItem> = serde_json::from_str(&data)?;
        Ok(items)
    }
}
