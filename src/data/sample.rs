//! Synthetic yearly series from per-year regime parameters.
//!
//! Each year is an independent twelve-step multiplicative random walk:
//! `v *= 1 + trend + u * volatility` with `u ~ U(-1, 1)`, starting from the
//! regime base jittered by the profile's seed band.

use chrono::NaiveDate;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Uniform;

use crate::domain::{AssetProfile, DataPoint, SeriesShape, YearlySeries};

const MONTHS: u32 = 12;

/// Generate every supported year for `profile`.
///
/// Uses a fresh entropy-seeded generator, so two calls give different data.
pub fn generate(profile: &AssetProfile) -> Vec<YearlySeries> {
    let mut rng = StdRng::from_entropy();
    generate_with_rng(profile, &mut rng)
}

/// Generate every supported year for `profile` using a caller-supplied RNG.
pub fn generate_with_rng<R: Rng + ?Sized>(profile: &AssetProfile, rng: &mut R) -> Vec<YearlySeries> {
    profile
        .years
        .clone()
        .filter_map(|year| generate_year(profile, year, rng))
        .collect()
}

/// Generate a single year. Returns `None` for years chrono cannot represent
/// and for a seed band that cannot be sampled.
pub fn generate_year<R: Rng + ?Sized>(profile: &AssetProfile, year: i32, rng: &mut R) -> Option<YearlySeries> {
    let regime = profile.regime_for(year);
    let (lo, hi) = profile.seed_band;
    if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
        return None;
    }
    let step = Uniform::new_inclusive(-1.0, 1.0);

    let mut current = regime.base * rng.gen_range(lo..=hi);
    let mut points = Vec::with_capacity(MONTHS as usize);

    for month in 1..=MONTHS {
        let shock: f64 = step.sample(rng);
        current *= 1.0 + regime.trend + shock * regime.volatility;
        current = current.max(0.0);

        let date = NaiveDate::from_ymd_opt(year, month, 1)?;
        points.push(DataPoint::new(date, profile.rounding.apply(current)));
    }

    Some(YearlySeries::from_points(year, points, SeriesShape::FixedMonthly))
}
