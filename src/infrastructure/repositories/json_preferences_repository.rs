use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::domain::entities::Preferences;
use crate::domain::repositories::{PersistenceError, PreferencesRepository};

pub struct JsonPreferencesRepository {
    file_path: PathBuf,
}

impl JsonPreferencesRepository {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

impl PreferencesRepository for JsonPreferencesRepository {
    fn load(&self) -> Result<Option<Preferences>, PersistenceError> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.file_path)
            .map_err(|e| PersistenceError::Io(format!("Failed to read file: {}", e)))?;

        let preferences: Preferences = serde_json::from_str(&content).map_err(|e| {
            PersistenceError::Serialization(format!("Failed to parse JSON: {}", e))
        })?;

        Ok(Some(preferences))
    }

    fn save(&self, preferences: &Preferences) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(preferences).map_err(|e| {
            PersistenceError::Serialization(format!("Failed to serialize JSON: {}", e))
        })?;

        // create directory
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| PersistenceError::Io(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(&self.file_path, &json)
            .map_err(|e| PersistenceError::Io(format!("Failed to write file: {}", e)))?;

        debug!("Saved preferences to {:?}", self.file_path);
        Ok(())
    }
}

impl std::fmt::Debug for JsonPreferencesRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonPreferencesRepository")
            .field("file_path", &self.file_path)
            .finish()
    }
}
