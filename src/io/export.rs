//! Export normalized series and chart rows.
//!
//! CSV output uses the same `date,value` layout the ingest path accepts, so an
//! export can be uploaded again as-is. JSON output is meant for the
//! presentation layer or downstream scripts.

use std::fmt::Write as _;
use std::fs::File;
use std::path::Path;

use crate::domain::YearlySeries;
use crate::error::{DataError, ErrorKind};
use crate::report::ChartRow;

/// Render series as `date,value` text (header included).
pub fn series_to_csv(series: &[YearlySeries]) -> String {
    let mut out = String::from("date,value\n");
    for s in series {
        for p in s.points() {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{},{}", p.date.format("%Y-%m-%d"), p.value);
        }
    }
    out
}

/// Write series (points and derived statistics) to a JSON file.
pub fn write_series_json(path: &Path, series: &[YearlySeries]) -> Result<(), DataError> {
    let file = File::create(path).map_err(|e| {
        DataError::new(
            ErrorKind::Io,
            format!("Failed to create series JSON '{}': {e}", path.display()),
        )
    })?;
    serde_json::to_writer_pretty(file, series)
        .map_err(|e| DataError::new(ErrorKind::Io, format!("Failed to write series JSON: {e}")))
}

/// Write chart rows to a JSON file.
pub fn write_chart_rows_json(path: &Path, rows: &[ChartRow]) -> Result<(), DataError> {
    let file = File::create(path).map_err(|e| {
        DataError::new(
            ErrorKind::Io,
            format!("Failed to create chart JSON '{}': {e}", path.display()),
        )
    })?;
    serde_json::to_writer_pretty(file, rows)
        .map_err(|e| DataError::new(ErrorKind::Io, format!("Failed to write chart JSON: {e}")))
}
