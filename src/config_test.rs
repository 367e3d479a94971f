#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;

    use tempfile::TempDir;

    use crate::config::{ConfigError, QsskitConfig, ValidateConfig};
    use crate::report::ReportFormat;
    use crate::rules::RuleSet;

    const FULL_CONFIG: &str = r#"
[validate]
strict = true
format = "json"
extensions = [".qss", "css"]
extra_properties = ["qproperty-icon"]
extra_pseudo_states = ["focus-within"]
extra_widgets = ["MyWidget"]

[version]
manifest = "app/package.json"
changelog = "docs/CHANGELOG.md"
maintainer = "Release Team"
"#;

    #[test]
    fn test_parse_full_config() {
        let config = QsskitConfig::from_str(FULL_CONFIG).unwrap();
        assert_eq!(config.validate.strict, Some(true));
        assert_eq!(config.validate.format, Some(ReportFormat::Json));
        assert_eq!(config.validate.effective_extensions(), vec!["qss", "css"]);
        assert_eq!(config.version.manifest_path(), PathBuf::from("app/package.json"));
        assert_eq!(config.version.changelog_path(), PathBuf::from("docs/CHANGELOG.md"));
        assert_eq!(config.version.maintainer.as_deref(), Some("Release Team"));

        let rules = config.validate.rule_set();
        assert!(rules.is_property("qproperty-icon"));
        assert!(rules.is_pseudo_state("focus-within"));
        assert!(rules.is_widget("MyWidget"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = QsskitConfig::from_str("").unwrap();
        assert!(!config.validate.effective_strict(false));
        assert_eq!(config.validate.effective_format(None), ReportFormat::Text);
        assert_eq!(config.validate.effective_extensions(), vec!["qss"]);
        assert_eq!(config.version.manifest_path(), PathBuf::from("package.json"));
        assert_eq!(config.version.changelog_path(), PathBuf::from("CHANGELOG.md"));
        assert!(Arc::ptr_eq(&config.validate.rule_set(), &RuleSet::builtin()));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(QsskitConfig::from_str("[validate]\nstrickt = true\n").is_err());
        assert!(QsskitConfig::from_str("[lint]\nstrict = true\n").is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let config = ValidateConfig {
            strict: Some(false),
            format: Some(ReportFormat::Json),
            ..Default::default()
        };
        assert!(config.effective_strict(true));
        assert!(!config.effective_strict(false));
        assert_eq!(config.effective_format(Some(ReportFormat::Text)), ReportFormat::Text);
        assert_eq!(config.effective_format(None), ReportFormat::Json);

        let strict_config = ValidateConfig {
            strict: Some(true),
            ..Default::default()
        };
        assert!(strict_config.effective_strict(false));
    }

    #[test]
    fn test_empty_extension_list_falls_back() {
        let config = ValidateConfig {
            extensions: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(config.effective_extensions(), vec!["qss"]);
    }

    #[test]
    fn test_load_from_path_missing_or_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("qsskit.toml");
        let config = QsskitConfig::load_from_path(&missing);
        assert!(config.validate.strict.is_none());

        fs::write(&missing, "[validate\nstrict = ").unwrap();
        let config = QsskitConfig::load_from_path(&missing);
        assert!(config.validate.strict.is_none());

        fs::write(&missing, "[validate]\nstrict = true\n").unwrap();
        let config = QsskitConfig::load_from_path(&missing);
        assert_eq!(config.validate.strict, Some(true));
    }

    #[test]
    fn test_load_required_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        match QsskitConfig::load_required(&path) {
            Err(ConfigError::Read { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected read error, got {:?}", other),
        }

        fs::write(&path, "[validate]\nformat = \"xml\"\n").unwrap();
        assert!(matches!(
            QsskitConfig::load(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }
}
