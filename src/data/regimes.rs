//! Per-year regime tables for the built-in asset classes.
//!
//! Each entry is `(year, base, monthly volatility, monthly trend)`. The NASDAQ
//! table models the dot-com unwind (2001-2003), the steady 2004-2007 climb
//! (`2800 + 500/yr`), the 2008 crash, the 2010-2019 bull run (`4000 + 600/yr`)
//! and the 2020 rebound. The other tables follow rough opening levels. The
//! numbers are illustrative, not a market model.

use std::collections::BTreeMap;

use crate::domain::{AssetClass, AssetProfile, RegimeParams, Rounding};

pub const FIRST_YEAR: i32 = 2001;
pub const LAST_YEAR: i32 = 2024;

const EQUITY_BAND: (f64, f64) = (0.95, 1.05);
const METAL_BAND: (f64, f64) = (0.97, 1.03);

type Row = (i32, f64, f64, f64);

const NASDAQ: &[Row] = &[
    (2001, 4000.0, 0.18, -0.03),
    (2002, 3000.0, 0.16, -0.04),
    (2003, 2500.0, 0.13, 0.02),
    (2004, 2800.0, 0.09, 0.015),
    (2005, 3300.0, 0.09, 0.015),
    (2006, 3800.0, 0.09, 0.015),
    (2007, 4300.0, 0.09, 0.015),
    (2008, 4500.0, 0.20, -0.04),
    (2009, 3000.0, 0.15, 0.03),
    (2010, 4000.0, 0.08, 0.02),
    (2011, 4600.0, 0.08, 0.02),
    (2012, 5200.0, 0.08, 0.02),
    (2013, 5800.0, 0.08, 0.02),
    (2014, 6400.0, 0.08, 0.02),
    (2015, 7000.0, 0.08, 0.02),
    (2016, 7600.0, 0.08, 0.02),
    (2017, 8200.0, 0.08, 0.02),
    (2018, 8800.0, 0.08, 0.02),
    (2019, 9400.0, 0.08, 0.02),
    (2020, 9000.0, 0.15, 0.04),
    (2021, 12500.0, 0.08, 0.03),
    (2022, 15000.0, 0.12, -0.02),
    (2023, 14000.0, 0.09, 0.025),
    (2024, 17500.0, 0.08, 0.015),
];

const DOW_JONES: &[Row] = &[
    (2001, 10790.0, 0.050, -0.006),
    (2002, 10020.0, 0.055, -0.015),
    (2003, 8340.0, 0.040, 0.019),
    (2004, 10450.0, 0.025, 0.003),
    (2005, 10780.0, 0.025, -0.001),
    (2006, 10720.0, 0.020, 0.013),
    (2007, 12460.0, 0.030, 0.005),
    (2008, 13260.0, 0.065, -0.033),
    (2009, 8770.0, 0.055, 0.015),
    (2010, 10430.0, 0.040, 0.009),
    (2011, 11670.0, 0.045, 0.004),
    (2012, 12220.0, 0.030, 0.006),
    (2013, 13100.0, 0.025, 0.020),
    (2014, 16440.0, 0.025, 0.006),
    (2015, 17830.0, 0.035, -0.002),
    (2016, 17430.0, 0.030, 0.011),
    (2017, 19880.0, 0.020, 0.019),
    (2018, 24720.0, 0.045, -0.005),
    (2019, 23330.0, 0.030, 0.018),
    (2020, 28640.0, 0.075, 0.006),
    (2021, 30600.0, 0.030, 0.015),
    (2022, 36340.0, 0.050, -0.007),
    (2023, 33150.0, 0.030, 0.011),
    (2024, 37690.0, 0.025, 0.011),
];

const NIFTY50: &[Row] = &[
    (2001, 1260.0, 0.070, -0.014),
    (2002, 1060.0, 0.050, 0.003),
    (2003, 1090.0, 0.050, 0.046),
    (2004, 1880.0, 0.060, 0.009),
    (2005, 2080.0, 0.040, 0.027),
    (2006, 2840.0, 0.050, 0.029),
    (2007, 3970.0, 0.060, 0.039),
    (2008, 6140.0, 0.090, -0.060),
    (2009, 2960.0, 0.080, 0.051),
    (2010, 5200.0, 0.040, 0.015),
    (2011, 6130.0, 0.050, -0.021),
    (2012, 4640.0, 0.040, 0.022),
    (2013, 5900.0, 0.040, 0.005),
    (2014, 6300.0, 0.035, 0.023),
    (2015, 8280.0, 0.040, -0.003),
    (2016, 7960.0, 0.040, 0.002),
    (2017, 8190.0, 0.025, 0.023),
    (2018, 10530.0, 0.035, 0.003),
    (2019, 10860.0, 0.035, 0.010),
    (2020, 12180.0, 0.080, 0.011),
    (2021, 13980.0, 0.040, 0.018),
    (2022, 17350.0, 0.045, 0.003),
    (2023, 18100.0, 0.030, 0.015),
    (2024, 21700.0, 0.030, 0.007),
];

const GOLD: &[Row] = &[
    (2001, 272.0, 0.025, 0.002),
    (2002, 278.0, 0.030, 0.020),
    (2003, 343.0, 0.030, 0.016),
    (2004, 415.0, 0.030, 0.004),
    (2005, 427.0, 0.030, 0.015),
    (2006, 517.0, 0.045, 0.018),
    (2007, 632.0, 0.035, 0.024),
    (2008, 834.0, 0.060, 0.004),
    (2009, 870.0, 0.040, 0.019),
    (2010, 1100.0, 0.030, 0.022),
    (2011, 1405.0, 0.050, 0.008),
    (2012, 1590.0, 0.035, 0.005),
    (2013, 1660.0, 0.045, -0.023),
    (2014, 1220.0, 0.035, -0.001),
    (2015, 1180.0, 0.035, -0.009),
    (2016, 1075.0, 0.040, 0.007),
    (2017, 1150.0, 0.025, 0.010),
    (2018, 1300.0, 0.025, -0.001),
    (2019, 1280.0, 0.030, 0.014),
    (2020, 1520.0, 0.045, 0.019),
    (2021, 1900.0, 0.030, -0.003),
    (2022, 1800.0, 0.035, 0.000),
    (2023, 1825.0, 0.030, 0.010),
    (2024, 2065.0, 0.030, 0.022),
];

const SILVER: &[Row] = &[
    (2001, 4.6, 0.040, -0.001),
    (2002, 4.6, 0.040, 0.003),
    (2003, 4.8, 0.050, 0.019),
    (2004, 6.0, 0.070, 0.012),
    (2005, 6.8, 0.050, 0.023),
    (2006, 8.9, 0.080, 0.030),
    (2007, 12.9, 0.060, 0.012),
    (2008, 14.8, 0.100, -0.018),
    (2009, 11.3, 0.070, 0.035),
    (2010, 16.9, 0.060, 0.052),
    (2011, 30.6, 0.100, -0.008),
    (2012, 28.2, 0.060, 0.006),
    (2013, 30.0, 0.070, -0.030),
    (2014, 19.5, 0.060, -0.016),
    (2015, 15.7, 0.055, -0.010),
    (2016, 13.8, 0.070, 0.012),
    (2017, 16.2, 0.050, 0.005),
    (2018, 17.2, 0.040, -0.008),
    (2019, 15.5, 0.050, 0.012),
    (2020, 17.9, 0.090, 0.033),
    (2021, 26.4, 0.055, -0.010),
    (2022, 23.3, 0.060, 0.003),
    (2023, 24.0, 0.050, 0.000),
    (2024, 23.8, 0.060, 0.017),
];

/// Regime used for years outside a table.
pub const DEFAULT_REGIME: RegimeParams = RegimeParams::new(10000.0, 0.08, 0.01);

fn table(rows: &[Row]) -> BTreeMap<i32, RegimeParams> {
    rows.iter()
        .map(|&(year, base, volatility, trend)| (year, RegimeParams::new(base, volatility, trend)))
        .collect()
}

/// Default relative location of an asset's external data.
pub fn default_source_path(asset: &AssetClass) -> String {
    format!("data/{}.csv", asset.as_str())
}

fn builtin(id: &str, display_name: &str, currency: &str, rounding: Rounding, rows: &[Row]) -> AssetProfile {
    let asset = AssetClass::new(id);
    let seed_band = match rounding {
        Rounding::Whole => EQUITY_BAND,
        Rounding::Cents => METAL_BAND,
    };
    AssetProfile {
        source_path: default_source_path(&asset),
        asset,
        display_name: display_name.to_string(),
        currency: currency.to_string(),
        rounding,
        seed_band,
        years: FIRST_YEAR..=LAST_YEAR,
        regimes: table(rows),
        default_regime: DEFAULT_REGIME,
    }
}

/// Profiles for the five built-in asset classes.
pub fn builtin_profiles() -> Vec<AssetProfile> {
    vec![
        builtin(AssetClass::NASDAQ, "NASDAQ-100", "USD", Rounding::Whole, NASDAQ),
        builtin(AssetClass::DOW_JONES, "Dow Jones", "USD", Rounding::Whole, DOW_JONES),
        builtin(AssetClass::NIFTY50, "Nifty 50", "INR", Rounding::Whole, NIFTY50),
        builtin(AssetClass::GOLD, "Gold", "USD", Rounding::Cents, GOLD),
        builtin(AssetClass::SILVER, "Silver", "USD", Rounding::Cents, SILVER),
    ]
}

/// Profile for an identifier with no registered strategy: generic regime,
/// whole-unit rounding, the standard year range.
pub fn fallback_profile(asset: &AssetClass) -> AssetProfile {
    AssetProfile {
        source_path: default_source_path(asset),
        asset: asset.clone(),
        display_name: asset.as_str().to_string(),
        currency: "USD".to_string(),
        rounding: Rounding::Whole,
        seed_band: EQUITY_BAND,
        years: FIRST_YEAR..=LAST_YEAR,
        regimes: BTreeMap::new(),
        default_regime: DEFAULT_REGIME,
    }
}
