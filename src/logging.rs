//! Diagnostic stream for the store and the planner.
//!
//! Events go to a log file because stderr is shared with the raw-mode
//! terminal. If the file cannot be opened, stderr is used instead.
//! `RUST_LOG` overrides the configured level.

use crate::settings::Settings;
use once_cell::sync::OnceCell;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const APP_DIR: &str = "taskmate";
const LOG_FILE_NAME: &str = "taskmate.log";

static LOG_DESTINATION: OnceCell<Option<PathBuf>> = OnceCell::new();

/// Installs the global subscriber once; later calls return the first result.
///
/// Returns the log file in use, or `None` when logging to stderr.
pub fn init_logging(settings: &Settings) -> Option<PathBuf> {
    LOG_DESTINATION
        .get_or_init(|| {
            let filter = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&settings.log_level))
                .unwrap_or_else(|_| EnvFilter::new("info"));

            let builder = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false);

            match log_file_path(settings).and_then(|path| open_log_file(&path).map(|f| (path, f))) {
                Some((path, file)) => {
                    let installed = builder
                        .with_ansi(false)
                        .with_writer(Mutex::new(file))
                        .try_init()
                        .is_ok();
                    installed.then_some(path)
                }
                None => {
                    let _ = builder.with_writer(io::stderr).try_init();
                    None
                }
            }
        })
        .clone()
}

fn log_file_path(settings: &Settings) -> Option<PathBuf> {
    if let Some(path) = &settings.log_file {
        return Some(path.clone());
    }
    let mut dir = dirs::data_local_dir()?;
    dir.push(APP_DIR);
    dir.push(LOG_FILE_NAME);
    Some(dir)
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
