//! Cross-year summary figures.

use serde::Serialize;

use crate::domain::YearlySeries;

/// Summary over a selection of yearly series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub best: YearlySeries,
    pub worst: YearlySeries,
    pub max_high: f64,
    pub avg_change: f64,
}

/// Best/worst year by percentage change, highest high and mean change.
///
/// Ties go to the earliest series in input order. Returns `None` for an
/// empty selection.
pub fn project_statistics(series: &[YearlySeries]) -> Option<Projection> {
    let first = series.first()?;

    let mut best = first;
    let mut worst = first;
    let mut max_high = first.high_price();
    let mut total_change = 0.0;

    for s in series {
        if s.percentage_change() > best.percentage_change() {
            best = s;
        }
        if s.percentage_change() < worst.percentage_change() {
            worst = s;
        }
        max_high = max_high.max(s.high_price());
        total_change += s.percentage_change();
    }

    Some(Projection {
        best: best.clone(),
        worst: worst.clone(),
        max_high,
        avg_change: total_change / series.len() as f64,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{DataPoint, SeriesShape};

    /// Series whose start/end give exactly `change` percent, peaking at `high`.
    fn series(year: i32, change: f64, high: f64) -> YearlySeries {
        let d = |m| NaiveDate::from_ymd_opt(year, m, 1).unwrap();
        YearlySeries::from_points(
            year,
            vec![
                DataPoint::new(d(1), 100.0),
                DataPoint::new(d(6), high),
                DataPoint::new(d(12), 100.0 + change),
            ],
            SeriesShape::Dated,
        )
    }

    #[test]
    fn best_worst_and_average() {
        let input = vec![series(2019, 5.2, 130.0), series(2020, -3.1, 140.0)];
        let p = project_statistics(&input).unwrap();

        assert_eq!(p.best.percentage_change(), 5.2);
        assert_eq!(p.worst.percentage_change(), -3.1);
        assert!((p.avg_change - 1.05).abs() < 1e-9);
        assert_eq!(p.max_high, 140.0);
    }

    #[test]
    fn ties_keep_first_in_input_order() {
        let input = vec![series(2021, 4.0, 120.0), series(2018, 4.0, 120.0), series(2015, -1.0, 120.0)];
        let p = project_statistics(&input).unwrap();
        assert_eq!(p.best.year(), 2021);

        let input = vec![series(2010, -2.0, 110.0), series(2011, -2.0, 110.0)];
        let p = project_statistics(&input).unwrap();
        assert_eq!(p.worst.year(), 2010);
        assert_eq!(p.best.year(), 2010);
    }

    #[test]
    fn empty_selection_has_no_projection() {
        assert!(project_statistics(&[]).is_none());
    }

    #[test]
    fn zero_start_year_counts_as_flat() {
        let d = |m| NaiveDate::from_ymd_opt(2021, m, 1).unwrap();
        let from_zero = YearlySeries::from_points(
            2021,
            vec![DataPoint::new(d(1), 0.0), DataPoint::new(d(12), 80.0)],
            SeriesShape::Dated,
        );

        let p = project_statistics(std::slice::from_ref(&from_zero)).unwrap();
        assert_eq!(p.best.year(), 2021);
        assert_eq!(p.avg_change, 0.0);
        assert_eq!(p.max_high, 80.0);

        let input = vec![from_zero, series(2019, 5.2, 130.0), series(2020, -3.1, 140.0)];
        let p = project_statistics(&input).unwrap();
        assert_eq!(p.best.year(), 2019);
        assert_eq!(p.worst.year(), 2020);
        assert!(p.avg_change.is_finite());
        assert!((p.avg_change - 0.7).abs() < 1e-9);
    }
}
