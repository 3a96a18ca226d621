//! Output module for the tabular export
//!
//! Serializes the reconciled link records into a flat CSV file with a fixed
//! three-column header.

mod csv;

pub use csv::{export_csv, format_csv, ExportError};
