//! Log records: one immutable row per withdrawal attempt.

use jiff::civil::{DateTime, DateTimeRound};
use jiff::{RoundMode, Unit, Zoned};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Text layout of a record timestamp, e.g. `2025-03-04 08:15:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of a single submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl Status {
    /// Canonical stored form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// A single withdrawal attempt, successful or not.
///
/// Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// The shift that produced this record.
    pub session: Uuid,
    #[serde(with = "timestamp_text")]
    pub timestamp: DateTime,
    pub station: String,
    pub item_code: String,
    pub quantity: u32,
    pub status: Status,
    pub message: String,
}

/// Local wall-clock time, truncated to whole seconds.
pub fn now() -> DateTime {
    let now = Zoned::now().datetime();
    now.round(
        DateTimeRound::new()
            .smallest(Unit::Second)
            .mode(RoundMode::Trunc),
    )
    .unwrap_or(now)
}

pub fn format_timestamp(at: DateTime) -> String {
    at.strftime(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(text: &str) -> Result<DateTime, jiff::Error> {
    DateTime::strptime(TIMESTAMP_FORMAT, text)
}

/// Serde adapter keeping timestamps in [`TIMESTAMP_FORMAT`].
mod timestamp_text {
    use jiff::civil::DateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(at: &DateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(*at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_timestamp(&text).map_err(de::Error::custom)
    }
}
