use crate::report::ReportFormat;
use crate::rules::RuleSet;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "qsskit.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct QsskitConfig {
    #[serde(default)]
    pub validate: ValidateConfig,
    #[serde(default)]
    pub version: VersionConfig,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ValidateConfig {
    pub strict: Option<bool>,
    pub format: Option<ReportFormat>,
    /// File extensions picked up when a directory is validated.
    pub extensions: Option<Vec<String>>,
    #[serde(default)]
    pub extra_properties: Vec<String>,
    #[serde(default)]
    pub extra_pseudo_states: Vec<String>,
    #[serde(default)]
    pub extra_widgets: Vec<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct VersionConfig {
    pub manifest: Option<PathBuf>,
    pub changelog: Option<PathBuf>,
    pub maintainer: Option<String>,
}

impl ValidateConfig {
    pub const DEFAULT_EXTENSIONS: &'static [&'static str] = &["qss"];

    /// CLI `--strict` can only switch strict mode on.
    pub fn effective_strict(&self, cli_strict: bool) -> bool {
        cli_strict || self.strict.unwrap_or(false)
    }

    pub fn effective_format(&self, cli_format: Option<ReportFormat>) -> ReportFormat {
        cli_format.or(self.format).unwrap_or_default()
    }

    pub fn effective_extensions(&self) -> Vec<String> {
        match &self.extensions {
            Some(exts) if !exts.is_empty() => exts
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
            _ => Self::DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Built-in reference tables extended with the configured names.
    pub fn rule_set(&self) -> Arc<RuleSet> {
        RuleSet::extended(
            &self.extra_properties,
            &self.extra_pseudo_states,
            &self.extra_widgets,
        )
    }
}

impl VersionConfig {
    pub fn manifest_path(&self) -> PathBuf {
        self.manifest.clone().unwrap_or_else(|| PathBuf::from("package.json"))
    }

    pub fn changelog_path(&self) -> PathBuf {
        self.changelog.clone().unwrap_or_else(|| PathBuf::from("CHANGELOG.md"))
    }
}

impl QsskitConfig {
    pub fn from_str(toml_content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_content)
    }

    /// Loads a config file the user asked for explicitly; any failure is an error.
    pub fn load_required(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads an optional config file, falling back to defaults.
    pub fn load_from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        "Failed to parse config file at {}: {}. Using default configuration.",
                        path.display(),
                        e
                    );
                    Self::default()
                }
            },
            Err(_) => {
                debug!("Config file at {} not found. Using default configuration.", path.display());
                Self::default()
            }
        }
    }

    /// Loads `--config` if given, otherwise `qsskit.toml` from the working directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_required(path),
            None => Ok(Self::load_from_path(Path::new(CONFIG_FILE_NAME))),
        }
    }
}
