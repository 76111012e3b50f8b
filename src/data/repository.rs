//! Series resolution: uploads, external sources, synthetic fallback.
//!
//! Resolution never fails from the caller's point of view. Every path that
//! cannot produce series for the requested years ends in synthetic data, and
//! the returned `SeriesOrigin` says which path was taken.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::data::registry::AssetRegistry;
use crate::data::sample::{generate, generate_with_rng};
use crate::data::source::{SeriesSource, source_for};
use crate::domain::{AssetClass, AssetProfile, SessionConfig, YearlySeries};
use crate::error::{DataError, ErrorKind};
use crate::io::ingest::ingest_text;

/// Where a resolution's series came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeriesOrigin {
    /// Session upload for this asset class.
    Upload,
    /// Configured external source.
    External { locator: String },
    /// No external source configured.
    Synthetic,
    /// External data was unusable; synthetic data substituted.
    Fallback { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub asset: AssetClass,
    pub series: Vec<YearlySeries>,
    pub origin: SeriesOrigin,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, SeriesOrigin::Fallback { .. })
    }

    /// True when the data came from an upload or external source.
    pub fn is_loaded(&self) -> bool {
        matches!(self.origin, SeriesOrigin::Upload | SeriesOrigin::External { .. })
    }
}

pub struct SeriesRepository {
    config: SessionConfig,
    registry: AssetRegistry,
    source: Option<Box<dyn SeriesSource>>,
    uploads: HashMap<AssetClass, Vec<YearlySeries>>,
}

impl SeriesRepository {
    /// Build a repository for `config`, with the built-in asset classes.
    pub fn new(config: SessionConfig) -> Result<Self, DataError> {
        let source = match &config.source {
            Some(root) => Some(source_for(root, config.fetch_timeout)?),
            None => None,
        };
        Ok(Self {
            config,
            registry: AssetRegistry::with_builtins(),
            source,
            uploads: HashMap::new(),
        })
    }

    /// Use a caller-provided source instead of the one in `config`.
    pub fn with_source(config: SessionConfig, source: Box<dyn SeriesSource>) -> Self {
        Self {
            config,
            registry: AssetRegistry::with_builtins(),
            source: Some(source),
            uploads: HashMap::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AssetRegistry {
        &mut self.registry
    }

    /// Series for `asset` restricted to `years`, ascending by year.
    pub fn get_series(&self, asset: &AssetClass, years: &[i32]) -> Vec<YearlySeries> {
        self.resolve(asset, years).series
    }

    /// Resolve `asset` for `years` and report where the data came from.
    pub fn resolve(&self, asset: &AssetClass, years: &[i32]) -> Resolution {
        let profile = self.registry.profile_or_fallback(asset);

        if let Some(uploaded) = self.uploads.get(asset) {
            let series = filter_years(uploaded, years);
            if !series.is_empty() {
                info!("{asset}: {} series from upload", series.len());
                return Resolution {
                    asset: asset.clone(),
                    series,
                    origin: SeriesOrigin::Upload,
                };
            }
            return self.fallback(&profile, years, "upload has no data for the requested years".to_string());
        }

        let Some(source) = &self.source else {
            debug!("{asset}: no external source configured, generating");
            return Resolution {
                asset: asset.clone(),
                series: self.synthetic(&profile, years),
                origin: SeriesOrigin::Synthetic,
            };
        };

        match fetch_external(source.as_ref(), &profile, years) {
            Ok(series) => {
                let locator = source.locate(&profile);
                info!("{asset}: {} series loaded from {locator}", series.len());
                Resolution {
                    asset: asset.clone(),
                    series,
                    origin: SeriesOrigin::External { locator },
                }
            }
            Err(err) => self.fallback(&profile, years, err.to_string()),
        }
    }

    /// Resolve several asset classes in parallel. Output follows request order.
    pub fn resolve_many(&self, requests: &[(AssetClass, Vec<i32>)]) -> Vec<Resolution> {
        requests
            .par_iter()
            .map(|(asset, years)| self.resolve(asset, years))
            .collect()
    }

    /// Parse and aggregate an uploaded file for `asset`.
    ///
    /// On success the result replaces any earlier upload for that asset class
    /// for the rest of the session. An upload with no usable rows is rejected
    /// and leaves the previous state in place.
    pub fn ingest_upload(&mut self, raw_text: &str, asset: &AssetClass) -> Result<Vec<YearlySeries>, DataError> {
        let report = ingest_text(raw_text);
        if report.series.is_empty() {
            warn!(
                "{asset}: upload rejected, {} of {} rows unusable",
                report.rows_dropped, report.rows_read
            );
            return Err(DataError::new(
                ErrorKind::EmptyResult,
                format!("Upload for '{asset}' contains no valid date,value rows."),
            ));
        }

        info!(
            "{asset}: upload accepted ({} years, {} rows dropped)",
            report.series.len(),
            report.rows_dropped
        );
        self.uploads.insert(asset.clone(), report.series.clone());
        Ok(report.series)
    }

    /// Forget the upload for `asset`. Returns whether one existed.
    pub fn clear_upload(&mut self, asset: &AssetClass) -> bool {
        self.uploads.remove(asset).is_some()
    }

    pub fn has_upload(&self, asset: &AssetClass) -> bool {
        self.uploads.contains_key(asset)
    }

    fn fallback(&self, profile: &AssetProfile, years: &[i32], reason: String) -> Resolution {
        warn!("{}: falling back to simulated data: {reason}", profile.asset);
        Resolution {
            asset: profile.asset.clone(),
            series: self.synthetic(profile, years),
            origin: SeriesOrigin::Fallback { reason },
        }
    }

    fn synthetic(&self, profile: &AssetProfile, years: &[i32]) -> Vec<YearlySeries> {
        let all = match self.config.sample_seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(asset_seed(&profile.asset, seed));
                generate_with_rng(profile, &mut rng)
            }
            None => generate(profile),
        };
        filter_years(&all, years)
    }
}

fn fetch_external(
    source: &dyn SeriesSource,
    profile: &AssetProfile,
    years: &[i32],
) -> Result<Vec<YearlySeries>, DataError> {
    let text = source.fetch_text(profile)?;
    if text.trim().is_empty() {
        return Err(DataError::new(ErrorKind::EmptyResult, "empty payload"));
    }

    let report = ingest_text(&text);
    if report.series.is_empty() {
        return Err(DataError::new(
            ErrorKind::EmptyResult,
            format!("no valid rows ({} dropped)", report.rows_dropped),
        ));
    }

    let series = filter_years(&report.series, years);
    if series.is_empty() {
        return Err(DataError::new(
            ErrorKind::EmptyResult,
            "source has no data for the requested years",
        ));
    }
    Ok(series)
}

fn filter_years(series: &[YearlySeries], years: &[i32]) -> Vec<YearlySeries> {
    series
        .iter()
        .filter(|s| years.contains(&s.year()))
        .cloned()
        .collect()
}

/// Per-asset seed so each asset class draws its own stream from one session seed.
fn asset_seed(asset: &AssetClass, seed: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    asset.hash(&mut hasher);
    seed.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceRoot;

    struct FixedSource {
        body: Result<String, DataError>,
    }

    impl FixedSource {
        fn ok(body: &str) -> Self {
            Self {
                body: Ok(body.to_string()),
            }
        }

        fn failing() -> Self {
            Self {
                body: Err(DataError::new(ErrorKind::Fetch, "connection refused")),
            }
        }
    }

    impl SeriesSource for FixedSource {
        fn fetch_text(&self, _profile: &AssetProfile) -> Result<String, DataError> {
            self.body.clone()
        }

        fn locate(&self, profile: &AssetProfile) -> String {
            format!("fixed://{}", profile.source_path)
        }
    }

    const CSV: &str = "date,value\n2020-01-02,100\n2020-12-31,110\n2021-01-04,110\n2021-12-30,99\n";

    fn nasdaq() -> AssetClass {
        AssetClass::new("nasdaq")
    }

    #[test]
    fn synthetic_when_no_source_configured() {
        let repo = SeriesRepository::new(SessionConfig::seeded(1)).unwrap();
        let res = repo.resolve(&nasdaq(), &[2008, 2001, 2020]);

        assert_eq!(res.origin, SeriesOrigin::Synthetic);
        let years: Vec<i32> = res.series.iter().map(|s| s.year()).collect();
        assert_eq!(years, vec![2001, 2008, 2020]);
    }

    #[test]
    fn seeded_sessions_are_reproducible() {
        let repo = SeriesRepository::new(SessionConfig::seeded(42)).unwrap();
        assert_eq!(
            repo.get_series(&nasdaq(), &[2010]),
            repo.get_series(&nasdaq(), &[2010])
        );
    }

    #[test]
    fn external_source_is_used_and_filtered() {
        let repo = SeriesRepository::with_source(SessionConfig::seeded(1), Box::new(FixedSource::ok(CSV)));
        let res = repo.resolve(&nasdaq(), &[2021]);

        assert_eq!(
            res.origin,
            SeriesOrigin::External {
                locator: "fixed://data/nasdaq.csv".to_string()
            }
        );
        assert_eq!(res.series.len(), 1);
        assert_eq!(res.series[0].percentage_change(), -10.0);
        assert!(res.is_loaded());
    }

    #[test]
    fn fetch_failure_falls_back_to_synthetic() {
        let repo = SeriesRepository::with_source(SessionConfig::seeded(1), Box::new(FixedSource::failing()));
        let res = repo.resolve(&AssetClass::new("gold"), &[2012, 2013]);

        assert!(res.is_fallback());
        assert_eq!(res.series.len(), 2);
        match res.origin {
            SeriesOrigin::Fallback { reason } => assert!(reason.contains("connection refused")),
            other => panic!("unexpected origin {other:?}"),
        }
    }

    #[test]
    fn empty_or_header_only_payload_falls_back() {
        for body in ["", "date,value\n", "garbage\nmore garbage"] {
            let repo = SeriesRepository::with_source(SessionConfig::seeded(1), Box::new(FixedSource::ok(body)));
            let res = repo.resolve(&nasdaq(), &[2020]);
            assert!(res.is_fallback(), "body {body:?} should fall back");
            assert_eq!(res.series.len(), 1);
        }
    }

    #[test]
    fn missing_requested_years_fall_back() {
        let repo = SeriesRepository::with_source(SessionConfig::seeded(1), Box::new(FixedSource::ok(CSV)));
        let res = repo.resolve(&nasdaq(), &[2015]);
        assert!(res.is_fallback());
        assert_eq!(res.series[0].year(), 2015);
    }

    #[test]
    fn upload_takes_precedence_over_source() {
        let mut repo = SeriesRepository::with_source(SessionConfig::seeded(1), Box::new(FixedSource::failing()));
        let uploaded = repo.ingest_upload(CSV, &nasdaq()).unwrap();
        assert_eq!(uploaded.len(), 2);

        let res = repo.resolve(&nasdaq(), &[2020, 2021]);
        assert_eq!(res.origin, SeriesOrigin::Upload);
        assert_eq!(res.series, uploaded);

        // Other asset classes are unaffected.
        assert!(repo.resolve(&AssetClass::new("gold"), &[2020]).is_fallback());

        assert!(repo.clear_upload(&nasdaq()));
        assert!(repo.resolve(&nasdaq(), &[2020]).is_fallback());
    }

    #[test]
    fn empty_upload_is_rejected_and_keeps_previous() {
        let mut repo = SeriesRepository::new(SessionConfig::seeded(1)).unwrap();
        repo.ingest_upload(CSV, &nasdaq()).unwrap();

        let err = repo.ingest_upload("date,value\n", &nasdaq()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResult);
        assert_eq!(repo.resolve(&nasdaq(), &[2020]).origin, SeriesOrigin::Upload);
    }

    #[test]
    fn inverted_seed_band_cannot_break_resolution() {
        let mut repo = SeriesRepository::new(SessionConfig::seeded(4)).unwrap();
        let custom = AssetClass::new("custom");
        let mut profile = repo.registry().profile_or_fallback(&custom);
        profile.seed_band = (1.05, 0.95);

        let err = repo.registry_mut().register(profile).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let res = repo.resolve(&custom, &[2020]);
        assert_eq!(res.origin, SeriesOrigin::Synthetic);
        assert_eq!(res.series.len(), 1);
        assert_eq!(res.series[0].points().len(), 12);
    }

    #[test]
    fn resolve_many_keeps_request_order() {
        let repo = SeriesRepository::new(SessionConfig::seeded(3)).unwrap();
        let requests = vec![
            (AssetClass::new("silver"), vec![2011]),
            (AssetClass::new("dowjones"), vec![2008, 2009]),
            (AssetClass::new("nifty50"), vec![2020]),
        ];
        let out = repo.resolve_many(&requests);

        let assets: Vec<&str> = out.iter().map(|r| r.asset.as_str()).collect();
        assert_eq!(assets, vec!["silver", "dowjones", "nifty50"]);
        assert_eq!(out[1].series.len(), 2);
    }

    #[test]
    fn directory_source_from_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/silver.csv"), CSV).unwrap();

        let config = SessionConfig::seeded(1).with_source(SourceRoot::Directory(dir.path().to_path_buf()));
        let repo = SeriesRepository::new(config).unwrap();

        assert!(repo.resolve(&AssetClass::new("silver"), &[2020]).is_loaded());
        assert!(repo.resolve(&AssetClass::new("gold"), &[2020]).is_fallback());
    }
}
