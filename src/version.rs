//! Project version bookkeeping.
//!
//! The project version lives in the `version` field of a JSON manifest.
//! Every bump rewrites that field, stamps `config.lastUpdated`, and adds a
//! section to the top of a Markdown changelog.

use chrono::{Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use semver::Version;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

lazy_static! {
    static ref RE_VERSION: Regex = Regex::new(r"(\d+)\.(\d+)\.(\d+)").unwrap();

    // Heading of an existing release section, e.g. `## [1.2.0] - 2024-05-01`.
    static ref RE_RELEASE_HEADING: Regex =
        Regex::new(r"(?m)^## \[\d+\.\d+\.\d+\] - \d{4}-\d{2}-\d{2}").unwrap();
}

const DEFAULT_CHANGELOG: &str = "# Changelog\n\n";

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse manifest {path}: {source}")]
    ParseManifest {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Manifest {0} is not a JSON object")]
    ManifestNotObject(PathBuf),
    #[error("New major version {requested} must be greater than the current major version {current}")]
    MajorNotIncreasing { current: u64, requested: u64 },
    #[error("Version {0} cannot be bumped any further")]
    Overflow(Version),
}

/// The kind of change recorded in the changelog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Changed,
    Major,
}

impl ChangeKind {
    pub fn section_title(self) -> &'static str {
        match self {
            ChangeKind::Added => "Added",
            ChangeKind::Changed => "Changed",
            ChangeKind::Major => "Major Update",
        }
    }
}

/// Parses the first `MAJOR.MINOR.PATCH` in `raw`, falling back to `0.0.1`.
pub fn parse_version_lenient(raw: &str) -> Version {
    RE_VERSION
        .captures(raw)
        .and_then(|caps| {
            let part = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u64>().ok());
            Some(Version::new(part(1)?, part(2)?, part(3)?))
        })
        .unwrap_or_else(default_version)
}

fn default_version() -> Version {
    Version::new(0, 0, 1)
}

/// Version after adding a component: next minor, patch reset.
pub fn next_minor(current: &Version) -> Result<Version, VersionError> {
    let minor = current
        .minor
        .checked_add(1)
        .ok_or_else(|| VersionError::Overflow(current.clone()))?;
    Ok(Version::new(current.major, minor, 0))
}

/// Version after updating a component: next patch.
pub fn next_patch(current: &Version) -> Result<Version, VersionError> {
    let patch = current
        .patch
        .checked_add(1)
        .ok_or_else(|| VersionError::Overflow(current.clone()))?;
    Ok(Version::new(current.major, current.minor, patch))
}

/// Name of the branch that would keep the previous major line.
pub fn archive_branch_name(current: &Version) -> String {
    format!("v{}.x.x-archive", current.major)
}

/// Sets `version` and `config.lastUpdated` in a manifest, keeping key order.
pub fn update_manifest_json(
    manifest: &str,
    new_version: &Version,
    today: NaiveDate,
) -> Result<String, serde_json::Error> {
    let mut value: Value = serde_json::from_str(manifest)?;
    if let Value::Object(root) = &mut value {
        root.insert("version".to_string(), Value::String(new_version.to_string()));
        let config = root
            .entry("config")
            .or_insert_with(|| Value::Object(Map::new()));
        if !config.is_object() {
            *config = Value::Object(Map::new());
        }
        if let Value::Object(config) = config {
            config.insert(
                "lastUpdated".to_string(),
                Value::String(today.format("%Y-%m-%d").to_string()),
            );
        }
    }
    let mut out = serde_json::to_string_pretty(&value)?;
    out.push('\n');
    Ok(out)
}

/// Renders one changelog section.
pub fn render_changelog_entry(
    version: &Version,
    kind: ChangeKind,
    changes: &[String],
    maintainer: Option<&str>,
    today: NaiveDate,
) -> String {
    let date = today.format("%Y-%m-%d");
    let mut entry = format!("## [{}] - {}\n\n### {}\n", version, date, kind.section_title());
    for change in changes {
        entry.push_str(&format!("- {}\n", change));
    }
    entry.push_str("\n### Project Info\n");
    entry.push_str(&format!("- Version: {}\n", version));
    if let Some(maintainer) = maintainer {
        entry.push_str(&format!("- Maintainer: {}\n", maintainer));
    }
    entry.push_str(&format!("- Updated: {}\n\n---\n\n", date));
    entry
}

/// Puts `entry` in front of the newest release section, or appends it when
/// the changelog has none yet.
pub fn insert_changelog_entry(changelog: &str, entry: &str) -> String {
    match RE_RELEASE_HEADING.find(changelog) {
        Some(heading) => {
            let mut out = String::with_capacity(changelog.len() + entry.len());
            out.push_str(&changelog[..heading.start()]);
            out.push_str(entry);
            out.push_str(&changelog[heading.start()..]);
            out
        }
        None => format!("{}{}", changelog, entry),
    }
}

/// Snapshot of the current version and the versions the next bumps produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionStatus {
    pub current: Version,
    pub next_add: Version,
    pub next_update: Version,
}

/// Reads and rewrites the manifest and changelog of one project.
#[derive(Debug)]
pub struct VersionManager {
    manifest_path: PathBuf,
    changelog_path: PathBuf,
    maintainer: Option<String>,
    today: NaiveDate,
    current: Version,
}

impl VersionManager {
    /// Opens a project. A missing manifest means version `0.0.1`.
    pub fn open(manifest_path: &Path, changelog_path: &Path) -> Result<Self, VersionError> {
        let current = read_current_version(manifest_path)?;
        debug!("Current version from {}: {}", manifest_path.display(), current);
        Ok(Self {
            manifest_path: manifest_path.to_path_buf(),
            changelog_path: changelog_path.to_path_buf(),
            maintainer: None,
            today: Local::now().date_naive(),
            current,
        })
    }

    pub fn with_maintainer(mut self, maintainer: Option<String>) -> Self {
        self.maintainer = maintainer;
        self
    }

    /// Overrides the date stamped into the manifest and changelog.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn current(&self) -> &Version {
        &self.current
    }

    pub fn status(&self) -> Result<VersionStatus, VersionError> {
        Ok(VersionStatus {
            current: self.current.clone(),
            next_add: next_minor(&self.current)?,
            next_update: next_patch(&self.current)?,
        })
    }

    /// Fails unless `new_major` is above the current major version.
    pub fn check_major(&self, new_major: u64) -> Result<(), VersionError> {
        if new_major <= self.current.major {
            return Err(VersionError::MajorNotIncreasing {
                current: self.current.major,
                requested: new_major,
            });
        }
        Ok(())
    }

    /// Records a new component: minor bump.
    pub fn add_component(&mut self, name: &str, component_version: &str) -> Result<Version, VersionError> {
        let new_version = next_minor(&self.current)?;
        let changes = vec![
            format!("Added component: {} (version: {})", name, component_version),
            format!("Minor version bump: v{} -> v{}", self.current, new_version),
        ];
        self.apply(new_version, ChangeKind::Added, &changes)
    }

    /// Records a component update: patch bump.
    pub fn update_component(
        &mut self,
        name: &str,
        old_version: &str,
        new_component_version: &str,
    ) -> Result<Version, VersionError> {
        let new_version = next_patch(&self.current)?;
        let changes = vec![
            format!(
                "Updated component: {} ({} -> {})",
                name, old_version, new_component_version
            ),
            format!("Patch version bump: v{} -> v{}", self.current, new_version),
        ];
        self.apply(new_version, ChangeKind::Changed, &changes)
    }

    /// Starts a new major line at `new_major.0.0`.
    pub fn major_update(&mut self, new_major: u64, description: &str) -> Result<Version, VersionError> {
        self.check_major(new_major)?;
        let new_version = Version::new(new_major, 0, 0);
        let changes = vec![
            format!("Major update: {}", description),
            format!("Version jump: v{} -> v{}", self.current, new_version),
            format!("Archive branch: {}", archive_branch_name(&self.current)),
        ];
        self.apply(new_version, ChangeKind::Major, &changes)
    }

    fn apply(&mut self, new_version: Version, kind: ChangeKind, changes: &[String]) -> Result<Version, VersionError> {
        self.write_manifest(&new_version)?;
        self.write_changelog(&new_version, kind, changes)?;
        info!("Version bumped: {} -> {}", self.current, new_version);
        self.current = new_version.clone();
        Ok(new_version)
    }

    fn write_manifest(&self, new_version: &Version) -> Result<(), VersionError> {
        let path = &self.manifest_path;
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => "{}".to_string(),
            Err(source) => {
                return Err(VersionError::Read {
                    path: path.clone(),
                    source,
                })
            }
        };
        let value: Value = serde_json::from_str(&contents).map_err(|source| VersionError::ParseManifest {
            path: path.clone(),
            source,
        })?;
        if !value.is_object() {
            return Err(VersionError::ManifestNotObject(path.clone()));
        }
        let updated = update_manifest_json(&contents, new_version, self.today).map_err(|source| {
            VersionError::ParseManifest {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(path, updated).map_err(|source| VersionError::Write {
            path: path.clone(),
            source,
        })?;
        debug!("Updated {}", path.display());
        Ok(())
    }

    fn write_changelog(&self, new_version: &Version, kind: ChangeKind, changes: &[String]) -> Result<(), VersionError> {
        let path = &self.changelog_path;
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => DEFAULT_CHANGELOG.to_string(),
            Err(source) => {
                return Err(VersionError::Read {
                    path: path.clone(),
                    source,
                })
            }
        };
        let entry = render_changelog_entry(new_version, kind, changes, self.maintainer.as_deref(), self.today);
        fs::write(path, insert_changelog_entry(&contents, &entry)).map_err(|source| VersionError::Write {
            path: path.clone(),
            source,
        })?;
        debug!("Updated {}", path.display());
        Ok(())
    }
}

fn read_current_version(manifest_path: &Path) -> Result<Version, VersionError> {
    let contents = match fs::read_to_string(manifest_path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(default_version()),
        Err(source) => {
            return Err(VersionError::Read {
                path: manifest_path.to_path_buf(),
                source,
            })
        }
    };
    let value: Value = serde_json::from_str(&contents).map_err(|source| VersionError::ParseManifest {
        path: manifest_path.to_path_buf(),
        source,
    })?;
    Ok(value
        .get("version")
        .and_then(Value::as_str)
        .map(parse_version_lenient)
        .unwrap_or_else(default_version))
}
