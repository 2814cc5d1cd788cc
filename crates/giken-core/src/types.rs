//! Shared domain types for the chat room.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

/// Weekday glyphs, Sunday first.
const WEEKDAYS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// One line of the transcript.
///
/// Entries are never edited after they are appended; the store only ever
/// appends new entries and evicts the oldest ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    /// Display label, `M/D(曜) HH:MM`.
    pub time: String,
    /// Speaker name (user or NPC).
    pub name: String,
    /// Message text.
    pub message: String,
    /// Verbal-tic suffix; empty when none.
    #[serde(default)]
    pub goobi: String,
}

impl ChatEntry {
    pub fn new(
        time: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
        goobi: impl Into<String>,
    ) -> Self {
        Self {
            time: time.into(),
            name: name.into(),
            message: message.into(),
            goobi: goobi.into(),
        }
    }

    /// Message text with the goobi appended as ` (tag)` when present.
    pub fn display_message(&self) -> String {
        if self.goobi.is_empty() {
            self.message.clone()
        } else {
            format!("{} ({})", self.message, self.goobi)
        }
    }
}

/// Format a timestamp as the transcript label, e.g. `3/7(金) 09:05`.
pub fn time_label<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    let weekday = WEEKDAYS[at.weekday().num_days_from_sunday() as usize];
    format!(
        "{}/{}({}) {:02}:{:02}",
        at.month(),
        at.day(),
        weekday,
        at.hour(),
        at.minute()
    )
}

/// Transcript label for the current local time.
pub fn now_label() -> String {
    time_label(&Local::now())
}
