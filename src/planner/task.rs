use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::codec::iso_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
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
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Pending,
    Completed,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Pending, Status::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session-local identity of a task. Never written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One todo item.
///
/// Equality compares the five persisted fields only; use [`Task::id`] to ask
/// whether two values are the same task. Clones keep the id, so a task taken
/// from a query can be handed back to the store for `update` or `delete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    #[serde(skip)]
    id: TaskId,
    title: String,
    description: String,
    #[serde(with = "iso_date", skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
    priority: Priority,
    status: Status,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDate,
        priority: Priority,
    ) -> Self {
        Self {
            id: TaskId::generate(),
            title: title.into(),
            description: description.into(),
            due_date: Some(due_date),
            priority,
            status: Status::Pending,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// `None` only for records loaded from a file that lacked the field.
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_due_date(&mut self, due_date: NaiveDate) {
        self.due_date = Some(due_date);
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    /// Case-insensitive substring match on title or description.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

// Fields missing from a decoded record fall back to these; the id is always fresh.
impl Default for Task {
    fn default() -> Self {
        Self {
            id: TaskId::generate(),
            title: String::new(),
            description: String::new(),
            due_date: None,
            priority: Priority::default(),
            status: Status::default(),
        }
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.description == other.description
            && self.due_date == other.due_date
            && self.priority == other.priority
            && self.status == other.status
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let due = match self.due_date {
            Some(date) => date.format(iso_date::FORMAT).to_string(),
            None => "unset".to_string(),
        };
        write!(
            f,
            "{} (Due: {}, Priority: {}, Status: {})",
            self.title, due, self.priority, self.status
        )
    }
}
