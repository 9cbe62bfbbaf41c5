use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Theme;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    pub updated_at: DateTime<Utc>,
}

impl Preferences {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            updated_at: Utc::now(),
        }
    }

    pub fn update_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.updated_at = Utc::now();
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl PartialEq for Preferences {
    fn eq(&self, other: &Self) -> bool {
        self.theme == other.theme
    }
}
