//! JSON document format for the task file.
//!
//! The file is one pretty-printed JSON array of task objects:
//!
//! ```json
//! [
//!   {
//!     "title": "Buy milk",
//!     "description": "",
//!     "dueDate": "2025-01-10",
//!     "priority": "MEDIUM",
//!     "status": "PENDING"
//!   }
//! ]
//! ```
//!
//! Unknown fields are ignored on decode and missing fields take the
//! [`Task`] defaults. A `null` document decodes to an empty list.

use super::task::Task;

pub fn encode(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tasks)
}

pub fn decode(content: &str) -> Result<Vec<Task>, serde_json::Error> {
    let tasks: Option<Vec<Task>> = serde_json::from_str(content)?;
    Ok(tasks.unwrap_or_default())
}

/// Serde adapter for the `dueDate` field: ISO-8601 calendar date, no time, no zone.
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.collect_str(&date.format(FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(text) => NaiveDate::parse_from_str(text.trim(), FORMAT)
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid dueDate `{}`: {}", text, e))),
            None => Ok(None),
        }
    }
}
