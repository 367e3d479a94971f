//! Tooling for Qt projects: a style sheet validator and a version bumper.

// Core
pub mod diagnostic;
pub mod report;
pub mod rules;
pub mod validator;
pub mod version;

// Command line
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod progress;
pub mod tables;
pub mod ui_style;
pub mod util;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod validator_test;

// Re-export color_eyre::Result for convenience
pub use color_eyre::Result;

pub use diagnostic::{Category, Diagnostic, Severity};
pub use report::{generate_report, ReportFormat};
pub use validator::StylesheetValidator;
