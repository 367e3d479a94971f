//! Module for displaying structured data in tables

use cli_table::{print_stdout, Cell, Color, Style, Table};

use crate::report::FileReport;
use crate::version::VersionStatus;

/// Display a per-file summary after validating a directory
pub fn display_validation_summary(reports: &[FileReport]) -> Result<(), Box<dyn std::error::Error>> {
    let mut table = vec![];

    for report in reports {
        let errors = report.error_count();
        let warnings = report.warning_count();
        let status_cell = if errors > 0 {
            "Failed".cell().foreground_color(Some(Color::Red))
        } else if warnings > 0 {
            "Warnings".cell().foreground_color(Some(Color::Yellow))
        } else {
            "Passed".cell().foreground_color(Some(Color::Green))
        };

        table.push(vec![
            report.file.display().to_string().cell(),
            errors.cell(),
            warnings.cell(),
            status_cell,
        ]);
    }

    let table = table.table()
        .title(vec![
            "File".cell().bold(true),
            "Errors".cell().bold(true),
            "Warnings".cell().bold(true),
            "Status".cell().bold(true),
        ])
        .bold(true);

    print_stdout(table)?;
    Ok(())
}

/// Display the current version and what the next bumps would produce
pub fn display_version_status(status: &VersionStatus) -> Result<(), Box<dyn std::error::Error>> {
    let current = &status.current;
    let table = vec![
        vec!["Current".cell(), format!("v{}", current).cell()],
        vec!["Major".cell(), current.major.cell()],
        vec!["Minor".cell(), current.minor.cell()],
        vec!["Patch".cell(), current.patch.cell()],
        vec!["Next add".cell(), format!("v{}", status.next_add).cell()],
        vec!["Next update".cell(), format!("v{}", status.next_update).cell()],
    ]
    .table()
    .title(vec!["Field".cell().bold(true), "Value".cell().bold(true)])
    .bold(true);

    print_stdout(table)?;
    Ok(())
}
