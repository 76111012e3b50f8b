//! Plain-text summaries for terminals and log lines.
//!
//! Formatting lives here so the numeric code stays free of presentation
//! concerns.

use crate::data::repository::{Resolution, SeriesOrigin};
use crate::domain::{AssetProfile, YearlySeries, round2};
use crate::report::stats::Projection;

/// Shortest decimal rendering of `x` with `,` between thousands groups of the
/// integer part (`1234567.5` -> `1,234,567.5`).
pub fn format_number(x: f64) -> String {
    let text = x.to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(text.len() + int.len() / 3);
    out.push_str(sign);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Percentage rounded to two decimals; `+` only for strictly positive values
/// (`5.2` -> `+5.2%`, `0` -> `0%`).
pub fn format_percentage(p: f64) -> String {
    let p = round2(p);
    if p > 0.0 {
        format!("+{p}%")
    } else if p == 0.0 {
        "0%".to_string()
    } else {
        format!("{p}%")
    }
}

/// One-line description of where a resolution's data came from.
pub fn format_origin(origin: &SeriesOrigin) -> String {
    match origin {
        SeriesOrigin::Upload => "loaded from uploaded file".to_string(),
        SeriesOrigin::External { locator } => format!("loaded from {locator}"),
        SeriesOrigin::Synthetic => "simulated data".to_string(),
        SeriesOrigin::Fallback { reason } => format!("fell back to simulated data ({reason})"),
    }
}

/// Table of yearly statistics, one row per series.
pub fn format_series_table(series: &[YearlySeries], currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<6} {:>12} {:>12} {:>12} {:>12} {:>9}\n",
        "year", "start", "end", "high", "low", "change"
    ));
    for s in series {
        out.push_str(&format!(
            "{:<6} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>8.2}%\n",
            s.year(),
            s.start_price(),
            s.end_price(),
            s.high_price(),
            s.low_price(),
            s.percentage_change(),
        ));
    }
    out.push_str(&format!("(prices in {currency})\n"));
    out
}

/// Summary block for a resolution and its projection.
pub fn format_projection(profile: &AssetProfile, resolution: &Resolution, projection: &Projection) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ({}) ===\n", profile.display_name, profile.asset));
    out.push_str(&format!("Source: {}\n", format_origin(&resolution.origin)));
    out.push_str(&format!(
        "Best year:  {} ({})\n",
        projection.best.year(),
        format_percentage(projection.best.percentage_change())
    ));
    out.push_str(&format!(
        "Worst year: {} ({})\n",
        projection.worst.year(),
        format_percentage(projection.worst.percentage_change())
    ));
    out.push_str(&format!(
        "Max high:   {} {}\n",
        format_number(projection.max_high),
        profile.currency
    ));
    out.push_str(&format!("Avg change: {}\n", format_percentage(projection.avg_change)));

    out
}
