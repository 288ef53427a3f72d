//! CSV and JSON export of grid rows.
//!
//! Exports take the rows returned by [`DataGrid::export`](crate::DataGrid::export),
//! i.e. every filtered and sorted row rather than just the visible page.
//! Cells are written in display form: booleans as `Yes` / `No`, timestamps as
//! [`TIMESTAMP_FORMAT`](crate::value::TIMESTAMP_FORMAT), missing values empty.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::column::Column;
use crate::value::CellValue;

/// Errors raised while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The CSV writer failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The underlying writer failed.
    #[error("export I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
    /// JSON array of objects keyed by column key.
    Json,
}

impl ExportFormat {
    /// File extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// MIME type.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }
}

/// Display form of a value inside an export.
#[must_use]
pub fn export_text(value: Option<&CellValue>) -> String {
    match value {
        None | Some(CellValue::Null) => String::new(),
        Some(CellValue::Bool(true)) => "Yes".to_string(),
        Some(CellValue::Bool(false)) => "No".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Writes `rows` as CSV into `writer`.
///
/// # Errors
///
/// Returns [`ExportError`] if writing fails.
pub fn write_csv<R, W: io::Write>(
    writer: W,
    columns: &[Column<R>],
    rows: &[&R],
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(columns.iter().map(Column::title))?;
    for row in rows {
        csv.write_record(
            columns
                .iter()
                .map(|column| export_text(column.value(row).as_ref())),
        )?;
    }
    csv.flush()?;
    debug!(rows = rows.len(), columns = columns.len(), "Exported CSV");
    Ok(())
}

/// Renders `rows` as a CSV string.
///
/// # Errors
///
/// Returns [`ExportError`] if writing fails.
pub fn to_csv<R>(columns: &[Column<R>], rows: &[&R]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, columns, rows)?;
    String::from_utf8(buffer)
        .map_err(|err| ExportError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// Builds JSON objects keyed by column key.
///
/// Values keep their native JSON type; missing values become `null`.
#[must_use]
pub fn to_json_value<R>(columns: &[Column<R>], rows: &[&R]) -> serde_json::Value {
    let objects = rows
        .iter()
        .map(|row| {
            let object: serde_json::Map<String, serde_json::Value> = columns
                .iter()
                .map(|column| {
                    let value = column
                        .value(row)
                        .and_then(|v| serde_json::to_value(v).ok())
                        .unwrap_or(serde_json::Value::Null);
                    (column.key().to_string(), value)
                })
                .collect();
            serde_json::Value::Object(object)
        })
        .collect();
    serde_json::Value::Array(objects)
}

/// Renders `rows` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if serialization fails.
pub fn to_json<R>(columns: &[Column<R>], rows: &[&R]) -> Result<String, ExportError> {
    let json = serde_json::to_string_pretty(&to_json_value(columns, rows))?;
    debug!(rows = rows.len(), "Exported JSON");
    Ok(json)
}

/// Renders `rows` in `format`.
///
/// # Errors
///
/// Returns [`ExportError`] if rendering fails.
pub fn export<R>(
    format: ExportFormat,
    columns: &[Column<R>],
    rows: &[&R],
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Csv => to_csv(columns, rows),
        ExportFormat::Json => to_json(columns, rows),
    }
}
