use crate::planner::TASKS_FILE;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const SETTINGS_BASENAME: &str = "taskmate";
const ENV_PREFIX: &str = "TASKMATE";

/// Runtime settings. Defaults, then `taskmate.{toml,json,...}` in the working
/// directory, then `TASKMATE_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub data_file: PathBuf,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(TASKS_FILE),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(SETTINGS_BASENAME))
    }

    /// `base` is the settings file path without extension.
    pub fn load_from(base: &Path) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        Config::builder()
            .set_default("data_file", defaults.data_file.to_string_lossy().into_owned())?
            .set_default("log_level", defaults.log_level)?
            .add_source(File::with_name(&base.to_string_lossy()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("taskmate")).unwrap();

        assert_eq!(settings.data_file, PathBuf::from("tasks.json"));
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.log_file, None);
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("taskmate.toml"),
            "data_file = \"/var/tmp/my-tasks.json\"\nlog_level = \"debug\"\nlog_file = \"/var/tmp/taskmate.log\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(&dir.path().join("taskmate")).unwrap();

        assert_eq!(settings.data_file, PathBuf::from("/var/tmp/my-tasks.json"));
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.log_file, Some(PathBuf::from("/var/tmp/taskmate.log")));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("taskmate.toml"), "data_file = [").unwrap();

        assert!(Settings::load_from(&dir.path().join("taskmate")).is_err());
    }
}
