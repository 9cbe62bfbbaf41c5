use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::StoredEnum;

/// Importance of a todo item. Declaration order is display order (High first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Symbol name shown next to the item
    pub fn icon(&self) -> &'static str {
        match self {
            Priority::High => "arrow.up.circle.fill",
            Priority::Medium => "minus.circle.fill",
            Priority::Low => "arrow.down.circle.fill",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Priority::High => "red",
            Priority::Medium => "orange",
            Priority::Low => "green",
        }
    }

    /// Numeric index used by index-based storage backends
    pub fn index(&self) -> i64 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    /// Out-of-range indices decode to `Medium`.
    pub fn from_index(index: i64) -> Self {
        match index {
            0 => Priority::High,
            2 => Priority::Low,
            _ => Priority::Medium,
        }
    }

    /// Parses a display name case-insensitively; unknown names decode to `Medium`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match StoredEnum::deserialize(deserializer)? {
            StoredEnum::Index(i) => Priority::from_index(i),
            StoredEnum::Name(name) => Priority::from_name(&name),
        })
    }
}
