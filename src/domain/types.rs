//! Shared domain types.
//!
//! These types are kept small and serializable so the presentation layer can
//! consume them directly (or via the JSON exports in `io::export`).

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::Serialize;

use crate::error::{DataError, ErrorKind};

/// Round to two decimal places (half away from zero).
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Percentage change from `start` to `end`, rounded to two decimals.
///
/// A zero start price has no meaningful relative change; it yields `0.0`.
pub fn percent_change(start: f64, end: f64) -> f64 {
    if start == 0.0 {
        debug!("zero start price; percentage change pinned to 0.0");
        return 0.0;
    }
    round2((end - start) / start * 100.0)
}

/// A single dated observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl DataPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// How the points of a series line up with calendar months.
///
/// Resolved once when the series is built so the interval filter never has to
/// guess from the point count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesShape {
    /// Exactly one point per calendar month, January first.
    FixedMonthly,
    /// Arbitrary dated observations.
    Dated,
}

/// One calendar year of prices plus its derived statistics.
///
/// Built once and never mutated; new source data produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlySeries {
    year: i32,
    shape: SeriesShape,
    points: Vec<DataPoint>,
    start_price: f64,
    end_price: f64,
    high_price: f64,
    low_price: f64,
    percentage_change: f64,
}

impl YearlySeries {
    /// Build a series from points belonging to `year`.
    ///
    /// Points dated in another year are dropped. The rest are sorted ascending
    /// by date (stable, so same-day points keep their input order).
    pub fn from_points(year: i32, mut points: Vec<DataPoint>, shape: SeriesShape) -> Self {
        let before = points.len();
        points.retain(|p| p.date.year() == year);
        if points.len() != before {
            debug!("dropped {} point(s) outside {year}", before - points.len());
        }
        points.sort_by_key(|p| p.date);

        let start_price = points.first().map(|p| p.value).unwrap_or(0.0);
        let end_price = points.last().map(|p| p.value).unwrap_or(0.0);

        let (high_price, low_price) = if points.is_empty() {
            (0.0, 0.0)
        } else {
            points.iter().fold((f64::NEG_INFINITY, f64::INFINITY), |(hi, lo), p| {
                (hi.max(p.value), lo.min(p.value))
            })
        };

        Self {
            year,
            shape,
            percentage_change: percent_change(start_price, end_price),
            points,
            start_price,
            end_price,
            high_price,
            low_price,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn shape(&self) -> SeriesShape {
        self.shape
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn start_price(&self) -> f64 {
        self.start_price
    }

    pub fn end_price(&self) -> f64 {
        self.end_price
    }

    pub fn high_price(&self) -> f64 {
        self.high_price
    }

    pub fn low_price(&self) -> f64 {
        self.low_price
    }

    pub fn percentage_change(&self) -> f64 {
        self.percentage_change
    }

    /// Label used as the per-year key in chart rows (e.g. `y2020`).
    pub fn label(&self) -> String {
        format!("y{}", self.year)
    }
}

/// Opaque asset-class identifier (`nasdaq`, `gold`, a registered sub-index, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AssetClass(String);

impl AssetClass {
    pub const NASDAQ: &'static str = "nasdaq";
    pub const DOW_JONES: &'static str = "dowjones";
    pub const NIFTY50: &'static str = "nifty50";
    pub const GOLD: &'static str = "gold";
    pub const SILVER: &'static str = "silver";

    /// Identifiers are trimmed and lowercased.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetClass {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// How synthetic values are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Whole units (index points).
    Whole,
    /// Two decimals (commodity prices).
    Cents,
}

impl Rounding {
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Rounding::Whole => x.round(),
            Rounding::Cents => round2(x),
        }
    }
}

/// Per-year parameters of the synthetic random walk.
///
/// `volatility` and `trend` are monthly fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegimeParams {
    pub base: f64,
    pub volatility: f64,
    pub trend: f64,
}

impl RegimeParams {
    pub const fn new(base: f64, volatility: f64, trend: f64) -> Self {
        Self {
            base,
            volatility,
            trend,
        }
    }

    fn is_valid(&self) -> bool {
        self.base.is_finite()
            && self.base > 0.0
            && self.volatility.is_finite()
            && self.volatility >= 0.0
            && self.trend.is_finite()
    }
}

/// Everything needed to generate or locate data for one asset class.
#[derive(Debug, Clone, Serialize)]
pub struct AssetProfile {
    pub asset: AssetClass,
    pub display_name: String,
    /// Display label only; values are never converted.
    pub currency: String,
    pub rounding: Rounding,
    /// Multiplicative band used to jitter the opening value of each year.
    pub seed_band: (f64, f64),
    pub years: RangeInclusive<i32>,
    pub regimes: BTreeMap<i32, RegimeParams>,
    /// Used for years missing from `regimes`.
    pub default_regime: RegimeParams,
    /// Location relative to the configured source root.
    pub source_path: String,
}

impl AssetProfile {
    pub fn regime_for(&self, year: i32) -> RegimeParams {
        self.regimes.get(&year).copied().unwrap_or(self.default_regime)
    }

    /// Check that the profile can drive synthetic generation: a finite seed
    /// band with `0 < lo <= hi`, and finite regimes with a positive base and
    /// non-negative volatility.
    pub fn validate(&self) -> Result<(), DataError> {
        let (lo, hi) = self.seed_band;
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo <= hi) {
            return Err(DataError::new(
                ErrorKind::InvalidInput,
                format!("Invalid seed band ({lo}, {hi}) for '{}'.", self.asset),
            ));
        }
        if !self.default_regime.is_valid() {
            return Err(DataError::new(
                ErrorKind::InvalidInput,
                format!("Invalid default regime for '{}'.", self.asset),
            ));
        }
        if let Some((year, _)) = self.regimes.iter().find(|(_, r)| !r.is_valid()) {
            return Err(DataError::new(
                ErrorKind::InvalidInput,
                format!("Invalid regime for '{}' in {year}.", self.asset),
            ));
        }
        Ok(())
    }
}

/// Ordered, duplicate-free list of selected years.
///
/// Order matters to consumers (legend/color assignment), so this is a
/// sequence rather than a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearSelection {
    years: Vec<i32>,
    max_selections: usize,
}

impl YearSelection {
    pub fn new(max_selections: usize) -> Self {
        Self {
            years: Vec::new(),
            max_selections,
        }
    }

    /// The comparison shown before the user picks anything: 2008, 2020, 2024.
    pub const DEFAULT_YEARS: [i32; 3] = [2008, 2020, 2024];

    /// `DEFAULT_YEARS`, cut to `max_selections`.
    pub fn default_comparison(max_selections: usize) -> Self {
        Self {
            years: Self::DEFAULT_YEARS.iter().copied().take(max_selections).collect(),
            max_selections,
        }
    }

    /// Build a selection from `years`, dropping duplicates.
    pub fn from_years(years: &[i32], max_selections: usize) -> Result<Self, DataError> {
        let mut selection = Self::new(max_selections);
        for &year in years {
            selection.try_add(year)?;
        }
        Ok(selection)
    }

    /// Append `year`. Re-adding a selected year is a no-op.
    pub fn try_add(&mut self, year: i32) -> Result<(), DataError> {
        if self.contains(year) {
            return Ok(());
        }
        if self.years.len() >= self.max_selections {
            return Err(DataError::new(
                ErrorKind::InvalidInput,
                format!("At most {} years can be selected.", self.max_selections),
            ));
        }
        self.years.push(year);
        Ok(())
    }

    pub fn remove(&mut self, year: i32) -> bool {
        let before = self.years.len();
        self.years.retain(|&y| y != year);
        self.years.len() != before
    }

    /// Remove `year` if selected, otherwise add it. Returns whether it is
    /// selected afterwards.
    pub fn toggle(&mut self, year: i32) -> Result<bool, DataError> {
        if self.remove(year) {
            return Ok(false);
        }
        self.try_add(year)?;
        Ok(true)
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn max_selections(&self) -> usize {
        self.max_selections
    }
}

/// Inclusive month range, `1 <= start <= end <= 12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntervalRange {
    start: u32,
    end: u32,
}

impl IntervalRange {
    pub fn new(start: u32, end: u32) -> Result<Self, DataError> {
        if !(1..=12).contains(&start) || !(1..=12).contains(&end) {
            return Err(DataError::new(
                ErrorKind::InvalidInput,
                format!("Interval months must be within 1-12 (got {start}-{end})."),
            ));
        }
        if start > end {
            return Err(DataError::new(
                ErrorKind::InvalidInput,
                format!("Interval start {start} is after end {end}."),
            ));
        }
        Ok(Self { start, end })
    }

    /// January through December.
    pub fn full() -> Self {
        Self { start: 1, end: 12 }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Move the start bound (clamped to 1-12); pushes `end` forward if needed.
    pub fn set_start(&mut self, month: u32) {
        self.start = month.clamp(1, 12);
        if self.start > self.end {
            self.end = self.start;
        }
    }

    /// Move the end bound (clamped to 1-12); pulls `start` back if needed.
    pub fn set_end(&mut self, month: u32) {
        self.end = month.clamp(1, 12);
        if self.end < self.start {
            self.start = self.end;
        }
    }

    pub fn contains(&self, month: u32) -> bool {
        (self.start..=self.end).contains(&month)
    }

    pub fn is_full(&self) -> bool {
        self.start == 1 && self.end == 12
    }
}

impl Default for IntervalRange {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn series_derives_statistics_from_sorted_points() {
        let series = YearlySeries::from_points(
            2023,
            vec![
                DataPoint::new(d(2023, 12, 1), 90.0),
                DataPoint::new(d(2023, 1, 1), 100.0),
                DataPoint::new(d(2023, 6, 1), 150.0),
            ],
            SeriesShape::Dated,
        );

        assert_eq!(series.points()[0].date, d(2023, 1, 1));
        assert_eq!(series.start_price(), 100.0);
        assert_eq!(series.end_price(), 90.0);
        assert_eq!(series.high_price(), 150.0);
        assert_eq!(series.low_price(), 90.0);
        assert_eq!(series.percentage_change(), -10.0);
        assert_eq!(series.label(), "y2023");
    }

    #[test]
    fn empty_series_has_zero_prices() {
        let series = YearlySeries::from_points(2020, Vec::new(), SeriesShape::Dated);
        assert_eq!(series.start_price(), 0.0);
        assert_eq!(series.end_price(), 0.0);
        assert_eq!(series.percentage_change(), 0.0);
    }

    #[test]
    fn points_from_other_years_are_dropped() {
        let series = YearlySeries::from_points(
            2023,
            vec![
                DataPoint::new(d(2023, 3, 1), 100.0),
                DataPoint::new(d(2022, 12, 30), 5.0),
                DataPoint::new(d(2023, 9, 1), 120.0),
                DataPoint::new(d(2024, 1, 2), 900.0),
            ],
            SeriesShape::Dated,
        );

        assert_eq!(series.points().len(), 2);
        assert_eq!(series.start_price(), 100.0);
        assert_eq!(series.end_price(), 120.0);
        assert_eq!(series.high_price(), 120.0);
        assert_eq!(series.low_price(), 100.0);
        assert_eq!(series.percentage_change(), 20.0);
    }

    #[test]
    fn zero_start_price_pins_change_to_zero() {
        assert_eq!(percent_change(0.0, 50.0), 0.0);
        assert_eq!(percent_change(200.0, 201.0), 0.5);
        assert_eq!(percent_change(3.0, 4.0), 33.33);
    }

    #[test]
    fn year_selection_keeps_insertion_order_and_limit() {
        let mut sel = YearSelection::from_years(&[2020, 2008, 2020], 3).unwrap();
        assert_eq!(sel.years(), &[2020, 2008]);

        sel.try_add(2015).unwrap();
        let err = sel.try_add(2001).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        assert!(!sel.toggle(2008).unwrap());
        assert!(sel.toggle(2001).unwrap());
        assert_eq!(sel.years(), &[2020, 2015, 2001]);
    }

    #[test]
    fn default_comparison_is_cut_to_limit() {
        assert_eq!(YearSelection::default_comparison(3).years(), &[2008, 2020, 2024]);
        assert_eq!(YearSelection::default_comparison(2).years(), &[2008, 2020]);
        assert!(YearSelection::default_comparison(0).is_empty());
    }

    #[test]
    fn profile_validation_rejects_bad_band_and_regimes() {
        let mut profile = AssetProfile {
            asset: AssetClass::new("custom"),
            display_name: "Custom".to_string(),
            currency: "USD".to_string(),
            rounding: Rounding::Whole,
            seed_band: (0.95, 1.05),
            years: 2001..=2024,
            regimes: BTreeMap::new(),
            default_regime: RegimeParams::new(100.0, 0.05, 0.0),
            source_path: "data/custom.csv".to_string(),
        };
        assert!(profile.validate().is_ok());

        profile.seed_band = (1.05, 0.95);
        assert_eq!(profile.validate().unwrap_err().kind(), ErrorKind::InvalidInput);
        profile.seed_band = (f64::NAN, 1.0);
        assert!(profile.validate().is_err());
        profile.seed_band = (1.0, 1.0);
        assert!(profile.validate().is_ok());

        profile.regimes.insert(2010, RegimeParams::new(100.0, f64::NAN, 0.0));
        assert!(profile.validate().is_err());
        profile.regimes.clear();
        profile.default_regime = RegimeParams::new(-1.0, 0.05, 0.0);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn interval_bounds_drag_instead_of_swapping() {
        let mut range = IntervalRange::new(3, 5).unwrap();
        range.set_start(9);
        assert_eq!((range.start(), range.end()), (9, 9));

        range.set_end(2);
        assert_eq!((range.start(), range.end()), (2, 2));

        range.set_end(40);
        assert_eq!(range.end(), 12);

        assert!(IntervalRange::new(7, 6).is_err());
        assert!(IntervalRange::new(0, 6).is_err());
        assert!(IntervalRange::full().is_full());
    }

    #[test]
    fn asset_class_ids_are_normalized() {
        assert_eq!(AssetClass::new(" NASDAQ "), AssetClass::from("nasdaq"));
    }
}
