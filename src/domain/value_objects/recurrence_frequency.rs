use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::StoredEnum;

/// Calendar unit a recurrence advances by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarUnit {
    Day,
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecurrenceFrequency {
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceFrequency {
    pub const ALL: [RecurrenceFrequency; 4] = [
        RecurrenceFrequency::Daily,
        RecurrenceFrequency::Weekly,
        RecurrenceFrequency::Monthly,
        RecurrenceFrequency::Yearly,
    ];

    /// One recurrence step expressed as (unit, interval).
    pub fn step(&self) -> (CalendarUnit, u32) {
        match self {
            RecurrenceFrequency::Daily => (CalendarUnit::Day, 1),
            RecurrenceFrequency::Weekly => (CalendarUnit::Day, 7),
            RecurrenceFrequency::Monthly => (CalendarUnit::Month, 1),
            RecurrenceFrequency::Yearly => (CalendarUnit::Month, 12),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceFrequency::Daily => "Daily",
            RecurrenceFrequency::Weekly => "Weekly",
            RecurrenceFrequency::Monthly => "Monthly",
            RecurrenceFrequency::Yearly => "Yearly",
        }
    }

    pub fn index(&self) -> i64 {
        match self {
            RecurrenceFrequency::Daily => 0,
            RecurrenceFrequency::Weekly => 1,
            RecurrenceFrequency::Monthly => 2,
            RecurrenceFrequency::Yearly => 3,
        }
    }

    pub fn from_index(index: i64) -> Self {
        match index {
            0 => RecurrenceFrequency::Daily,
            2 => RecurrenceFrequency::Monthly,
            3 => RecurrenceFrequency::Yearly,
            _ => RecurrenceFrequency::Weekly,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "daily" => RecurrenceFrequency::Daily,
            "monthly" => RecurrenceFrequency::Monthly,
            "yearly" => RecurrenceFrequency::Yearly,
            _ => RecurrenceFrequency::Weekly,
        }
    }
}

impl fmt::Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecurrenceFrequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecurrenceFrequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match StoredEnum::deserialize(deserializer)? {
            StoredEnum::Index(i) => RecurrenceFrequency::from_index(i),
            StoredEnum::Name(name) => RecurrenceFrequency::from_name(&name),
        })
    }
}
