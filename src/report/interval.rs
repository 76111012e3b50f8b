//! Month-interval filtering and cross-year merging for charting.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::domain::{IntervalRange, SeriesShape, YearlySeries};

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One x-axis position shared by all years: a (month, day) with each year's
/// value at that position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub month: u32,
    pub day: u32,
    /// Series label (`y2020`) -> value.
    pub values: BTreeMap<String, f64>,
}

impl ChartRow {
    /// Axis label such as `Jun 01`.
    pub fn label(&self) -> String {
        let month = MONTH_ABBR
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("???");
        format!("{month} {:02}", self.day)
    }
}

/// Restrict each series to `interval` and merge points on a shared month-day
/// axis, ascending by `(month, day)`.
///
/// If one series has two points on the same month-day, the later one wins.
pub fn apply_interval(series: &[YearlySeries], interval: IntervalRange) -> Vec<ChartRow> {
    let mut rows: BTreeMap<(u32, u32), BTreeMap<String, f64>> = BTreeMap::new();

    for s in series {
        let label = s.label();
        match s.shape() {
            SeriesShape::FixedMonthly => {
                for month in interval.start()..=interval.end() {
                    if let Some(p) = s.points().get(month as usize - 1) {
                        rows.entry((month, p.date.day()))
                            .or_default()
                            .insert(label.clone(), p.value);
                    }
                }
            }
            SeriesShape::Dated => {
                for p in s.points().iter().filter(|p| interval.contains(p.date.month())) {
                    rows.entry((p.date.month(), p.date.day()))
                        .or_default()
                        .insert(label.clone(), p.value);
                }
            }
        }
    }

    rows.into_iter()
        .map(|((month, day), values)| ChartRow { month, day, values })
        .collect()
}
