pub mod priority;
pub mod recurrence_frequency;
pub mod theme;

pub use priority::Priority;
pub use recurrence_frequency::{CalendarUnit, RecurrenceFrequency};
pub use theme::Theme;

use serde::Deserialize;

/// Wire shape accepted when decoding a closed enumeration: JSON files carry the display
/// name, older snapshots and the SQLite backend carry the numeric index.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum StoredEnum {
    Index(i64),
    Name(String),
}
