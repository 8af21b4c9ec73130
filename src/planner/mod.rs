pub mod codec;
pub mod filter;
pub mod storage;
pub mod task;
pub mod ui;

pub use filter::TaskFilter;
pub use storage::{StoreError, TaskStore, TASKS_FILE};
pub use task::{Priority, Status, Task, TaskId};
