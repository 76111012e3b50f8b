//! Shared query pipeline used by any front-end.
//!
//! resolve -> interval filter -> statistics
//!
//! The presentation layer only has to render the returned output.

use serde::Serialize;

use crate::data::{Resolution, SeriesRepository};
use crate::domain::{AssetClass, IntervalRange, YearSelection};
use crate::report::{ChartRow, Projection, apply_interval, project_statistics};

/// One chart request: an asset class, the selected years and a month range.
#[derive(Debug, Clone)]
pub struct Query {
    pub asset: AssetClass,
    pub years: YearSelection,
    pub interval: IntervalRange,
}

/// Everything the presentation layer needs for one query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutput {
    pub resolution: Resolution,
    pub rows: Vec<ChartRow>,
    /// `None` when no series were resolved.
    pub projection: Option<Projection>,
}

/// Run a single query.
pub fn run_query(repository: &SeriesRepository, query: &Query) -> QueryOutput {
    let resolution = repository.resolve(&query.asset, query.years.years());
    finish(resolution, query.interval)
}

/// Run several queries, resolving their asset classes in parallel.
pub fn run_queries(repository: &SeriesRepository, queries: &[Query]) -> Vec<QueryOutput> {
    let requests: Vec<(AssetClass, Vec<i32>)> = queries
        .iter()
        .map(|q| (q.asset.clone(), q.years.years().to_vec()))
        .collect();

    repository
        .resolve_many(&requests)
        .into_iter()
        .zip(queries)
        .map(|(resolution, query)| finish(resolution, query.interval))
        .collect()
}

fn finish(resolution: Resolution, interval: IntervalRange) -> QueryOutput {
    let rows = apply_interval(&resolution.series, interval);
    let projection = project_statistics(&resolution.series);
    QueryOutput {
        resolution,
        rows,
        projection,
    }
}
