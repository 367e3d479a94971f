//! Subcommand handlers behind the `qsskit` binary.

use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::CommandFactory;
use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use dialoguer::Confirm;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::cli::{Cli, Commands, CompletionsArgs, ValidateArgs, VersionArgs, VersionCommand};
use crate::config::QsskitConfig;
use crate::diagnostic::{count_severity, has_errors, Severity};
use crate::progress::{finish_progress_fail, finish_progress_success, start_file_progress};
use crate::report::{generate_multi_report, generate_report, FileReport, ReportFormat};
use crate::tables::{display_validation_summary, display_version_status};
use crate::ui_style::{summary_line, Colors, Print, Symbols};
use crate::util::find_stylesheets;
use crate::validator::StylesheetValidator;
use crate::version::{archive_branch_name, VersionManager};

/// Dispatches a parsed command line.
pub fn run(cli: Cli) -> Result<ExitCode> {
    let config = QsskitConfig::load(cli.config.as_deref())?;
    debug!("Loaded configuration: {:?}", config);

    match &cli.command {
        Commands::Validate(args) => run_validate(args, &config),
        Commands::Version(args) => run_version(args, &config),
        Commands::Completions(args) => run_completions(args),
    }
}

/// Validation settings after merging the config file and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateSettings {
    pub strict: bool,
    pub format: ReportFormat,
}

impl ValidateSettings {
    pub fn resolve(args: &ValidateArgs, config: &QsskitConfig) -> Self {
        Self {
            strict: config.validate.effective_strict(args.strict),
            format: config.validate.effective_format(args.format),
        }
    }
}

pub fn run_validate(args: &ValidateArgs, config: &QsskitConfig) -> Result<ExitCode> {
    let failed = validate_path(args, config)?;
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Validates the file or directory named in `args` and writes the report.
///
/// Returns true when any error-severity diagnostic was found.
pub fn validate_path(args: &ValidateArgs, config: &QsskitConfig) -> Result<bool> {
    if args.fix_auto {
        warn!("--fix-auto is accepted for compatibility but does not modify any file");
    }

    let settings = ValidateSettings::resolve(args, config);
    let rules = config.validate.rule_set();
    debug!(
        "Rule set: {} properties, {} pseudo-states, {} widgets",
        rules.property_count(),
        rules.pseudo_state_count(),
        rules.widget_count()
    );
    let validator = StylesheetValidator::new(rules);
    info!(
        "{} Validating {} (strict: {})",
        Symbols::check(),
        args.path.display(),
        settings.strict
    );

    if args.path.is_dir() {
        validate_directory(&validator, args, config, settings)
    } else {
        validate_single(&validator, args, settings)
    }
}

fn validate_single(validator: &StylesheetValidator, args: &ValidateArgs, settings: ValidateSettings) -> Result<bool> {
    let diagnostics = validator.validate_file(&args.path, settings.strict);
    let report = generate_report(&diagnostics, settings.format)?;
    write_report(&report, args.output.as_deref())?;

    if args.output.is_some() {
        let errors = count_severity(&diagnostics, Severity::Error);
        let warnings = count_severity(&diagnostics, Severity::Warning);
        let summary = summary_line(errors, warnings);
        if errors > 0 {
            Print::error(&summary);
        } else if warnings > 0 {
            Print::warning(&summary);
        } else {
            Print::success(&summary);
        }
    }
    Ok(has_errors(&diagnostics))
}

fn validate_directory(
    validator: &StylesheetValidator,
    args: &ValidateArgs,
    config: &QsskitConfig,
    settings: ValidateSettings,
) -> Result<bool> {
    let extensions = config.validate.effective_extensions();
    let files = find_stylesheets(&args.path, &extensions)?;
    if files.is_empty() {
        Print::warning(&format!(
            "No style sheets ({}) found in {}",
            extensions.join(", "),
            args.path.display()
        ));
        return Ok(false);
    }

    let pb = start_file_progress(files.len() as u64, "Validating style sheets");
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|file| {
            let diagnostics = validator.validate_file(file, settings.strict);
            pb.inc(1);
            FileReport {
                file: file.clone(),
                diagnostics,
            }
        })
        .collect();

    let failed_files = reports.iter().filter(|r| r.error_count() > 0).count();
    if failed_files > 0 {
        finish_progress_fail(&pb, &format!("{} of {} files have errors", failed_files, reports.len()));
    } else {
        finish_progress_success(&pb, &format!("{} files validated", reports.len()));
    }

    let report = generate_multi_report(&reports, settings.format)?;
    write_report(&report, args.output.as_deref())?;

    if args.output.is_none() && settings.format == ReportFormat::Text {
        println!();
        if let Err(e) = display_validation_summary(&reports) {
            warn!("Failed to print summary table: {}", e);
        }
    }
    Ok(failed_files > 0)
}

/// Writes a report to `output`, or to stdout when no path is given.
pub fn write_report(report: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .wrap_err_with(|| format!("Failed to create directory {}", parent.display()))?;
            }
            fs::write(path, report).wrap_err_with(|| format!("Failed to write report to {}", path.display()))?;
            Print::success(&format!("Report saved to {}", Colors::code(path.display())));
        }
        None => println!("{}", report),
    }
    Ok(())
}

pub fn run_version(args: &VersionArgs, config: &QsskitConfig) -> Result<ExitCode> {
    let manifest = args.manifest.clone().unwrap_or_else(|| config.version.manifest_path());
    let changelog = args.changelog.clone().unwrap_or_else(|| config.version.changelog_path());
    let mut manager = VersionManager::open(&manifest, &changelog)?.with_maintainer(config.version.maintainer.clone());

    match &args.command {
        VersionCommand::Status => {
            Print::section(format!("{} Version status", Symbols::version()));
            if let Err(e) = display_version_status(&manager.status()?) {
                warn!("Failed to print version table: {}", e);
            }
        }
        VersionCommand::Add {
            name,
            component_version,
        } => {
            let new_version = manager.add_component(name, component_version)?;
            Print::success(&format!("Added {}; version is now {}", name, Colors::code(format!("v{}", new_version))));
        }
        VersionCommand::Update {
            name,
            old_version,
            new_version,
        } => {
            let bumped = manager.update_component(name, old_version, new_version)?;
            Print::success(&format!("Updated {}; version is now {}", name, Colors::code(format!("v{}", bumped))));
        }
        VersionCommand::Major {
            major,
            description,
            yes,
        } => {
            manager.check_major(*major)?;
            if !*yes && !confirm_major(manager.current(), *major)? {
                Print::warning("Major version update cancelled");
                return Ok(ExitCode::FAILURE);
            }
            let archive = archive_branch_name(manager.current());
            let new_version = manager.major_update(*major, description)?;
            Print::success(&format!("Version is now {}", Colors::code(format!("v{}", new_version))));
            Print::info(&format!(
                "Previous major line can be kept on branch {}",
                Colors::code(archive)
            ));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn confirm_major(current: &semver::Version, major: u64) -> Result<bool> {
    if !crate::util::is_stdout_tty() {
        bail!("Refusing to start a new major version without a terminal; pass --yes to confirm");
    }
    Confirm::new()
        .with_prompt(format!("Bump version v{} -> v{}.0.0?", current, major))
        .default(false)
        .interact()
        .wrap_err("Failed to read confirmation")
}

pub fn run_completions(args: &CompletionsArgs) -> Result<ExitCode> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, name, &mut io::stdout());
    Ok(ExitCode::SUCCESS)
}
