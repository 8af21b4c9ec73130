// Environment variables are process-wide, so these checks live in their own test binary.
#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use taskmate::settings::Settings;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct EnvSettingsContext {
        temp_dir: TempDir,
    }

    impl TestContext for EnvSettingsContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            fs::write(
                temp_dir.path().join("taskmate.toml"),
                "data_file = \"from-toml.json\"\nlog_level = \"warn\"\n",
            )
            .unwrap();
            std::env::set_var("TASKMATE_DATA_FILE", "/tmp/from-env.json");
            std::env::set_var("TASKMATE_LOG_LEVEL", "trace");
            EnvSettingsContext { temp_dir }
        }

        fn teardown(self) {
            std::env::remove_var("TASKMATE_DATA_FILE");
            std::env::remove_var("TASKMATE_LOG_LEVEL");
        }
    }

    #[test_context(EnvSettingsContext)]
    #[test]
    fn test_env_overrides_toml_and_defaults(ctx: &mut EnvSettingsContext) {
        let settings = Settings::load_from(&ctx.temp_dir.path().join("taskmate")).unwrap();

        assert_eq!(settings.data_file, PathBuf::from("/tmp/from-env.json"));
        assert_eq!(settings.log_level, "trace");
        assert_eq!(settings.log_file, None);
    }
}
