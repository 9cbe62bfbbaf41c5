use crate::domain::entities::Preferences;
use crate::domain::repositories::todo_persistence::PersistenceError;

pub trait PreferencesRepository: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<Preferences>, PersistenceError>;

    fn save(&self, preferences: &Preferences) -> Result<(), PersistenceError>;
}
