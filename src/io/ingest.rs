//! Row normalization into yearly series.
//!
//! Turns the string rows produced by `io::parse` into `YearlySeries` records:
//! - optional header row (first cell mentions "date")
//! - row-level validation: malformed rows (bad date, non-finite or negative
//!   value) are dropped, never fatal
//! - grouping by calendar year, ascending by date within each year
//! - deterministic output (pure function of the input rows)

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::domain::{DataPoint, SeriesShape, YearlySeries};
use crate::io::parse;

pub const DEFAULT_DATE_COLUMN: usize = 0;
pub const DEFAULT_VALUE_COLUMN: usize = 1;

/// Conversion output plus bookkeeping about dropped rows.
#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub series: Vec<YearlySeries>,
    /// Data rows examined (header excluded).
    pub rows_read: usize,
    pub rows_dropped: usize,
}

/// Convert parsed rows using the default `date,value` column layout.
pub fn convert(rows: &[Vec<String>]) -> Vec<YearlySeries> {
    convert_columns(rows, DEFAULT_DATE_COLUMN, DEFAULT_VALUE_COLUMN)
}

pub fn convert_columns(rows: &[Vec<String>], date_column: usize, value_column: usize) -> Vec<YearlySeries> {
    convert_with_report(rows, date_column, value_column).series
}

/// Parse and convert raw text in one step.
pub fn ingest_text(text: &str) -> ConvertReport {
    let rows = parse::parse(text);
    convert_with_report(&rows, DEFAULT_DATE_COLUMN, DEFAULT_VALUE_COLUMN)
}

pub fn convert_with_report(rows: &[Vec<String>], date_column: usize, value_column: usize) -> ConvertReport {
    let skip = usize::from(has_header(rows));

    let mut by_year: BTreeMap<i32, Vec<DataPoint>> = BTreeMap::new();
    let mut rows_read = 0usize;
    let mut rows_dropped = 0usize;

    for (idx, row) in rows.iter().enumerate().skip(skip) {
        rows_read += 1;
        match parse_row(row, date_column, value_column) {
            Some(point) => by_year.entry(point.date.year()).or_default().push(point),
            None => {
                rows_dropped += 1;
                debug!("dropping malformed row {}: {:?}", idx + 1, row);
            }
        }
    }

    let series = by_year
        .into_iter()
        .map(|(year, points)| YearlySeries::from_points(year, points, SeriesShape::Dated))
        .collect();

    ConvertReport {
        series,
        rows_read,
        rows_dropped,
    }
}

fn has_header(rows: &[Vec<String>]) -> bool {
    rows.first()
        .and_then(|row| row.first())
        .is_some_and(|cell| cell.to_ascii_lowercase().contains("date"))
}

fn parse_row(row: &[String], date_column: usize, value_column: usize) -> Option<DataPoint> {
    let date = parse_date(row.get(date_column)?)?;
    let value = parse_value(row.get(value_column)?)?;
    Some(DataPoint::new(date, value))
}

/// Strict `YYYY-MM-DD`; the date must also exist on the calendar.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Finite, non-negative price.
fn parse_value(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 { Some(v) } else { None }
}
