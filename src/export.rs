use crate::models::AccountReport;
use anyhow::Result;
use clap::ValueEnum;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One pretty-printed JSON array
    Json,
    /// One JSON object per account and line
    JsonLines,
    /// One row per account, permission set and principal
    Csv,
}

const CSV_HEADER: [&str; 7] = [
    "account_id",
    "account_name",
    "permission_set_arn",
    "permission_set_name",
    "principal_type",
    "principal_id",
    "principal_name",
];

/// Export the report to a file
pub fn export_report(reports: &[AccountReport], format: ExportFormat, path: &Path) -> Result<String> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = BufWriter::new(File::create(path)?);
    write_report(reports, format, &mut file)?;
    file.flush()?;

    Ok(path.to_string_lossy().to_string())
}

/// Write the report to any writer (e.g. stdout)
pub fn write_report<W: Write>(reports: &[AccountReport], format: ExportFormat, out: &mut W) -> Result<()> {
    match format {
        ExportFormat::Json => write_json(reports, out),
        ExportFormat::JsonLines => write_json_lines(reports, out),
        ExportFormat::Csv => write_csv(reports, out),
    }
}

fn write_json<W: Write>(reports: &[AccountReport], out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out)?;
    Ok(())
}

fn write_json_lines<W: Write>(reports: &[AccountReport], out: &mut W) -> Result<()> {
    for report in reports {
        serde_json::to_writer(&mut *out, report)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_csv<W: Write>(reports: &[AccountReport], out: &mut W) -> Result<()> {
    // Write header
    writeln!(out, "{}", CSV_HEADER.join(","))?;

    // Write rows
    for report in reports {
        for entry in &report.user_assignments {
            for principal in &entry.attached_users {
                let row = [
                    report.account_id.as_str(),
                    report.account_name.as_str(),
                    entry.permission_set_arn.as_str(),
                    entry.permission_set_name.as_str(),
                    principal.principal_type.as_str(),
                    principal.id.as_str(),
                    principal.name.as_str(),
                ];
                let line: Vec<String> = row.iter().map(|field| csv_field(field)).collect();
                writeln!(out, "{}", line.join(","))?;
            }
        }
    }

    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
