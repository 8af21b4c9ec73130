// Runs in its own process: init_logging installs a process-wide subscriber once.
#[cfg(test)]
mod tests {
    use std::fs;
    use taskmate::logging::init_logging;
    use taskmate::settings::Settings;

    #[test]
    fn test_unopenable_log_file_falls_back_to_stderr() {
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("plain-file");
        fs::write(&blocker, "not a directory").unwrap();

        let settings = Settings {
            log_file: Some(blocker.join("logs").join("taskmate.log")),
            ..Settings::default()
        };

        assert_eq!(init_logging(&settings), None);
        tracing::info!("still logging to stderr");
    }
}
