use std::sync::Arc;
use tracing::{error, warn};

use crate::domain::entities::Preferences;
use crate::domain::repositories::PreferencesRepository;
use crate::domain::value_objects::Theme;

/// Appearance settings with the same best-effort persistence as the todo store
pub struct PreferencesService {
    repo: Arc<dyn PreferencesRepository>,
    current: Preferences,
}

impl PreferencesService {
    pub fn new(repo: Arc<dyn PreferencesRepository>) -> Self {
        let current = match repo.load() {
            Ok(Some(preferences)) => preferences,
            Ok(None) => Preferences::default(),
            Err(e) => {
                warn!("Failed to load preferences, using defaults: {}", e);
                Preferences::default()
            }
        };
        Self { repo, current }
    }

    pub fn theme(&self) -> Theme {
        self.current.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Theme {
        self.current.update_theme(theme);
        if let Err(e) = self.repo.save(&self.current) {
            error!("Failed to save preferences: {}", e);
        }
        self.current.theme
    }
}
