use crate::diagnostic::{count_severity, Diagnostic, Severity};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

const BANNER_WIDTH: usize = 50;
const GROUP_RULE_WIDTH: usize = 30;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Output format of a validation report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Diagnostics of one file, used when a whole directory is validated.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn error_count(&self) -> usize {
        count_severity(&self.diagnostics, Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        count_severity(&self.diagnostics, Severity::Warning)
    }
}

/// Renders the diagnostics of a single validation run.
pub fn generate_report(diagnostics: &[Diagnostic], format: ReportFormat) -> Result<String, ReportError> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(diagnostics)?),
        ReportFormat::Text => Ok(text_report(diagnostics)),
    }
}

/// Renders the results of validating several files.
pub fn generate_multi_report(reports: &[FileReport], format: ReportFormat) -> Result<String, ReportError> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
        ReportFormat::Text => Ok(reports
            .iter()
            .map(|r| format!("File: {}\n{}", r.file.display(), text_report(&r.diagnostics)))
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}

fn group_title(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "ERRORS",
        Severity::Warning => "WARNINGS",
        Severity::Info => "INFO",
    }
}

fn text_report(diagnostics: &[Diagnostic]) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut lines = vec![
        banner.clone(),
        "Qt Style Sheet Validation Report".to_string(),
        banner,
        format!("Errors: {}", count_severity(diagnostics, Severity::Error)),
        format!("Warnings: {}", count_severity(diagnostics, Severity::Warning)),
        format!("Total: {}", diagnostics.len()),
        String::new(),
    ];

    if diagnostics.is_empty() {
        lines.push("Style sheet passed validation.".to_string());
        return lines.join("\n");
    }

    for severity in Severity::ALL {
        let group: Vec<&Diagnostic> = diagnostics.iter().filter(|d| d.severity == severity).collect();
        if group.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("{}:", group_title(severity)));
        lines.push("-".repeat(GROUP_RULE_WIDTH));
        for d in group {
            lines.push(format!("{}:{} - {}", d.line, d.column, d.message));
        }
    }

    lines.join("\n")
}
