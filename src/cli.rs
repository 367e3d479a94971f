use anstyle::{AnsiColor, Style};
use clap::builder::Styles;
use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::report::ReportFormat;

fn cli_styles() -> Styles {
    Styles::styled()
        .header(Style::new().bold().underline())
        .usage(Style::new().bold().underline())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default())
        .error(AnsiColor::Red.on_default().bold())
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Yellow.on_default())
}

#[derive(Parser, Debug)]
#[clap(author, version, about, styles = cli_styles())]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[clap(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to a config file (defaults to ./qsskit.toml when present).
    #[clap(long, global = true, env = "QSSKIT_CONFIG")]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a Qt style sheet (or a directory of them) for common mistakes.
    Validate(ValidateArgs),
    /// Show or bump the project version recorded in the manifest and changelog.
    Version(VersionArgs),
    /// Print a shell completion script.
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Style sheet file, or a directory searched recursively.
    pub path: PathBuf,

    /// Write the report to this file instead of stdout.
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Report format.
    #[clap(long, short, value_enum)]
    pub format: Option<ReportFormat>,

    /// Also report unknown property names.
    #[clap(long, action)]
    pub strict: bool,

    /// Accepted for compatibility; files are never modified.
    #[clap(long = "fix-auto", action)]
    pub fix_auto: bool,
}

#[derive(Debug, Args)]
pub struct VersionArgs {
    /// JSON manifest holding the `version` field.
    #[clap(long)]
    pub manifest: Option<PathBuf>,

    /// Markdown changelog receiving new release sections.
    #[clap(long)]
    pub changelog: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: VersionCommand,
}

#[derive(Subcommand, Debug)]
pub enum VersionCommand {
    /// Show the current version and the next versions.
    Status,
    /// Record a new component (minor bump).
    Add {
        /// Component name.
        name: String,
        /// Component version.
        #[clap(default_value = "v1.0.0")]
        component_version: String,
    },
    /// Record a component update (patch bump).
    Update {
        /// Component name.
        name: String,
        /// Previous component version.
        old_version: String,
        /// New component version.
        new_version: String,
    },
    /// Start a new major version.
    Major {
        /// New major version number.
        major: u64,
        /// What changed.
        description: String,
        /// Do not ask for confirmation.
        #[clap(long, short, action)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[clap(value_enum)]
    pub shell: Shell,
}
