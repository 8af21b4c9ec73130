use std::error::Error;
use taskmate::logging::init_logging;
use taskmate::planner::{ui, TaskStore};
use taskmate::settings::Settings;
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn Error>> {
    let (settings, settings_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    let log_file = init_logging(&settings);
    if let Some(e) = settings_error {
        warn!(error = %e, "invalid settings, using defaults");
    }
    info!(
        data_file = %settings.data_file.display(),
        version = env!("CARGO_PKG_VERSION"),
        "taskmate starting"
    );

    let mut store = TaskStore::open(settings.data_file.clone());
    ui::run_planner(&mut store)?;

    if let Some(e) = store.last_error() {
        eprintln!(
            "⚠️  Warning: changes may not be saved to {}: {}",
            store.path().display(),
            e
        );
        if let Some(path) = log_file {
            eprintln!("   See {} for details.", path.display());
        }
    }

    info!(tasks = store.len(), "taskmate exiting");
    Ok(())
}
