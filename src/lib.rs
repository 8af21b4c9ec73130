//! TaskMate: a single-user task manager.
//!
//! Tasks live in an ordered [`planner::TaskStore`] that rewrites a
//! pretty-printed JSON file (`tasks.json` by default) after every change.
//! The binary puts a terminal planner in front of the store.

pub mod logging;
pub mod planner;
pub mod settings;
