//! Caller-facing query surface.
//!
//! The presentation layer talks to a `Session`, which owns the repository
//! (and therefore the session's uploads) and exposes the four operations it
//! needs: resolve series, apply a month interval, project statistics and
//! ingest an upload.

use crate::data::SeriesRepository;
use crate::domain::{AssetClass, IntervalRange, SessionConfig, YearSelection, YearlySeries};
use crate::error::DataError;
use crate::report::{ChartRow, Projection};

pub mod pipeline;

pub use pipeline::{Query, QueryOutput};

pub struct Session {
    repository: SeriesRepository,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, DataError> {
        Ok(Self {
            repository: SeriesRepository::new(config)?,
        })
    }

    /// Session configured from the environment (see `SessionConfig::from_env`).
    pub fn from_env() -> Result<Self, DataError> {
        Self::new(SessionConfig::from_env()?)
    }

    pub fn with_repository(repository: SeriesRepository) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &SeriesRepository {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut SeriesRepository {
        &mut self.repository
    }

    /// Empty year selection sized by the session's configured limit.
    pub fn new_selection(&self) -> YearSelection {
        YearSelection::new(self.repository.config().max_selections)
    }

    /// The default comparison years, within the session's limit.
    pub fn default_selection(&self) -> YearSelection {
        YearSelection::default_comparison(self.repository.config().max_selections)
    }

    pub fn get_series(&self, asset: &str, years: &[i32]) -> Vec<YearlySeries> {
        self.repository.get_series(&AssetClass::new(asset), years)
    }

    pub fn apply_interval(&self, series: &[YearlySeries], interval: IntervalRange) -> Vec<ChartRow> {
        crate::report::apply_interval(series, interval)
    }

    pub fn project_statistics(&self, series: &[YearlySeries]) -> Option<Projection> {
        crate::report::project_statistics(series)
    }

    pub fn ingest_upload(&mut self, raw_text: &str, asset: &str) -> Result<Vec<YearlySeries>, DataError> {
        self.repository.ingest_upload(raw_text, &AssetClass::new(asset))
    }

    pub fn query(&self, query: &Query) -> QueryOutput {
        pipeline::run_query(&self.repository, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_round_trip() {
        let mut session = Session::new(SessionConfig::seeded(9)).unwrap();

        let mut years = session.new_selection();
        years.try_add(2020).unwrap();
        years.try_add(2009).unwrap();

        let series = session.get_series("NASDAQ", years.years());
        assert_eq!(series.len(), 2);
        assert_eq!(session.apply_interval(&series, IntervalRange::full()).len(), 12);
        assert!(session.project_statistics(&series).is_some());

        let defaults = session.default_selection();
        assert_eq!(defaults.years(), &[2008, 2020, 2024]);
        assert_eq!(session.get_series("gold", defaults.years()).len(), 3);

        let uploaded = session
            .ingest_upload("date,value\n2020-01-01,10\n2020-02-01,12\n", "nasdaq")
            .unwrap();
        assert_eq!(session.get_series("nasdaq", &[2020]), uploaded);
    }
}
