#[cfg(test)]
mod tests {
    use focusbar::libs::config::{Config, FocusBarConfig, FocusBarSettings, DEFAULT_OPACITY, MAX_OPACITY, MIN_OPACITY};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
        path: PathBuf,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let path = temp_dir.path().join("config.json");
            ConfigTestContext {
                _temp_dir: temp_dir,
                path,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_reads_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.focus_bar(), FocusBarConfig::default());
        assert_eq!(FocusBarSettings::load_opacity_from(&ctx.path), DEFAULT_OPACITY);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_opacity_round_trip(ctx: &mut ConfigTestContext) {
        let stored = FocusBarSettings::save_opacity_to(&ctx.path, 0.65).unwrap();
        assert_eq!(stored, 0.65);
        assert_eq!(FocusBarSettings::load_opacity_from(&ctx.path), 0.65);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_opacity_is_clamped_on_save(ctx: &mut ConfigTestContext) {
        assert_eq!(FocusBarSettings::save_opacity_to(&ctx.path, 0.05).unwrap(), MIN_OPACITY);
        assert_eq!(FocusBarSettings::load_opacity_from(&ctx.path), MIN_OPACITY);

        assert_eq!(FocusBarSettings::save_opacity_to(&ctx.path, 3.0).unwrap(), MAX_OPACITY);
        assert_eq!(FocusBarSettings::load_opacity_from(&ctx.path), MAX_OPACITY);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_saving_opacity_keeps_other_settings(ctx: &mut ConfigTestContext) {
        let mut focus_bar = FocusBarConfig::default();
        focus_bar.set_opacity(0.9);
        focus_bar.refresh_interval = 30;
        focus_bar.width = 120;
        let config = Config {
            focus_bar: Some(focus_bar),
        };
        config.save_to(&ctx.path).unwrap();

        FocusBarSettings::save_opacity_to(&ctx.path, 0.4).unwrap();

        let focus_bar = Config::read_from(&ctx.path).unwrap().focus_bar();
        assert_eq!(focus_bar.opacity(), 0.4);
        assert_eq!(focus_bar.refresh_interval, 30);
        assert_eq!(focus_bar.width, 120);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_corrupt_file_falls_back(ctx: &mut ConfigTestContext) {
        std::fs::write(&ctx.path, "{ not json").unwrap();

        assert!(Config::read_from(&ctx.path).is_err());
        assert_eq!(FocusBarSettings::load_opacity_from(&ctx.path), DEFAULT_OPACITY);

        assert_eq!(FocusBarSettings::save_opacity_to(&ctx.path, 0.5).unwrap(), 0.5);
        assert_eq!(FocusBarSettings::load_opacity_from(&ctx.path), 0.5);
    }
}
