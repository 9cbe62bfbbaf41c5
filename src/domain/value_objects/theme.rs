use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::StoredEnum;

/// Appearance preference; `System` follows the platform setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }

    pub fn index(&self) -> i64 {
        match self {
            Theme::Light => 0,
            Theme::Dark => 1,
            Theme::System => 2,
        }
    }

    pub fn from_index(index: i64) -> Self {
        match index {
            0 => Theme::Light,
            1 => Theme::Dark,
            _ => Theme::System,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            _ => Theme::System,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Theme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match StoredEnum::deserialize(deserializer)? {
            StoredEnum::Index(i) => Theme::from_index(i),
            StoredEnum::Name(name) => Theme::from_name(&name),
        })
    }
}
