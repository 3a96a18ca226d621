//! CSV serialization of reconciled link records
//!
//! One header row, then one row per record in collection order. Fields are
//! quoted when they contain a comma, quote, or line break.

use crate::aggregate::LinkRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing the export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Column names, in the fixed export order
const HEADER: [&str; 3] = ["Page URL", "Page Title", "Link URL"];

/// Writes the reconciled records as CSV to the given path
///
/// # Arguments
///
/// * `records` - The reconciled link records, in final collection order
/// * `output_path` - Path where the CSV file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the export
/// * `Err(ExportError)` - Failed to create or write the file
pub fn export_csv(records: &[LinkRecord], output_path: &Path) -> ExportResult<()> {
    let csv = format_csv(records);

    let mut file = File::create(output_path)?;
    file.write_all(csv.as_bytes())?;

    Ok(())
}

/// Formats the records as a CSV string, header row included
pub fn format_csv(records: &[LinkRecord]) -> String {
    let mut out = String::new();

    out.push_str(&HEADER.join(","));
    out.push('\n');

    for record in records {
        out.push_str(&escape_field(&record.page_url));
        out.push(',');
        out.push_str(&escape_field(&record.page_title));
        out.push(',');
        out.push_str(&escape_field(&record.link_url));
        out.push('\n');
    }

    out
}

/// Quotes a field when it contains a delimiter, quote, or line break
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
