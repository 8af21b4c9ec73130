use super::task::{Priority, Status, Task};
use std::fmt;

/// Which slice of the task list a query returns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Priority(Priority),
    Status(Status),
    Search(String),
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Priority(priority) => task.priority() == *priority,
            TaskFilter::Status(status) => task.status() == *status,
            TaskFilter::Search(keyword) => task.matches_keyword(keyword),
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskFilter::All => write!(f, "All"),
            TaskFilter::Priority(priority) => write!(f, "Priority: {}", priority),
            TaskFilter::Status(status) => write!(f, "Status: {}", status),
            TaskFilter::Search(keyword) => write!(f, "Search: \"{}\"", keyword),
        }
    }
}
