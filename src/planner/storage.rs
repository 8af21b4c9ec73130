use super::codec;
use super::filter::TaskFilter;
use super::task::{Priority, Status, Task, TaskId};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, warn};

pub const TASKS_FILE: &str = "tasks.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("could not write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("could not parse {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("could not encode tasks: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Reads the task file. A missing file is an empty list, not an error.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    codec::decode(&content).map_err(|source| StoreError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Truncates and rewrites the whole file.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), StoreError> {
    let json = codec::encode(tasks).map_err(StoreError::Encode)?;
    fs::write(path, json).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Ordered task list mirrored to a JSON file after every mutation.
///
/// No method fails: load and save errors are logged, the in-memory list
/// stays authoritative, and the latest failure is kept in
/// [`TaskStore::last_error`] until a save succeeds.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    path: PathBuf,
    last_error: Option<StoreError>,
}

impl TaskStore {
    /// Opens `tasks.json` in the working directory.
    pub fn new() -> Self {
        Self::open(TASKS_FILE)
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tasks, last_error) = match load_tasks(&path) {
            Ok(tasks) => {
                debug!(path = %path.display(), count = tasks.len(), "loaded tasks");
                (tasks, None)
            }
            Err(e) => {
                warn!(error = %e, "starting with an empty task list");
                (Vec::new(), Some(e))
            }
        };

        Self {
            tasks,
            path,
            last_error,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn last_error(&self) -> Option<&StoreError> {
        self.last_error.as_ref()
    }

    pub fn add(&mut self, task: Task) {
        debug!(id = %task.id(), title = task.title(), "add task");
        self.tasks.push(task);
        self.persist();
    }

    /// Replaces every stored copy of `task` (matched by id) and saves.
    ///
    /// An unknown task is accepted silently: nothing is replaced and the
    /// current list is written as is.
    pub fn update(&mut self, task: &Task) {
        let mut replaced = 0;
        for stored in self.tasks.iter_mut().filter(|t| t.id() == task.id()) {
            *stored = task.clone();
            replaced += 1;
        }
        debug!(id = %task.id(), replaced, "update task");
        self.persist();
    }

    /// Removes the first task with the same id. Absent tasks are a no-op
    /// apart from the save.
    pub fn delete(&mut self, task: &Task) {
        if let Some(index) = self.tasks.iter().position(|t| t.id() == task.id()) {
            self.tasks.remove(index);
            debug!(id = %task.id(), index, "delete task");
        }
        self.persist();
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn query(&self, filter: &TaskFilter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    pub fn get_all_tasks(&self) -> Vec<Task> {
        self.query(&TaskFilter::All)
    }

    pub fn get_tasks_by_priority(&self, priority: Priority) -> Vec<Task> {
        self.query(&TaskFilter::Priority(priority))
    }

    pub fn get_tasks_by_status(&self, status: Status) -> Vec<Task> {
        self.query(&TaskFilter::Status(status))
    }

    pub fn search_tasks(&self, keyword: &str) -> Vec<Task> {
        self.query(&TaskFilter::Search(keyword.to_string()))
    }

    fn persist(&mut self) {
        match save_tasks(&self.path, &self.tasks) {
            Ok(()) => self.last_error = None,
            Err(e) => {
                error!(error = %e, "failed to save tasks");
                self.last_error = Some(e);
            }
        }
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
