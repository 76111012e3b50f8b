//! Session-scoped configuration.
//!
//! Everything that used to be ambient state (which source is active, how many
//! years may be compared, whether generation is seeded) lives here and is
//! handed to the repository explicitly.

use std::time::Duration;

use crate::error::{DataError, ErrorKind};

pub const ENV_SOURCE: &str = "YEARLY_SERIES_SOURCE";
pub const ENV_SEED: &str = "YEARLY_SERIES_SEED";
pub const ENV_MAX_YEARS: &str = "YEARLY_SERIES_MAX_YEARS";
pub const ENV_FETCH_TIMEOUT: &str = "YEARLY_SERIES_FETCH_TIMEOUT_SECS";

const DEFAULT_MAX_SELECTIONS: usize = 3;
const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Where external series are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRoot {
    /// `http(s)://` base URL; asset paths are appended.
    Http(String),
    /// Local directory; asset paths are joined onto it.
    Directory(std::path::PathBuf),
}

impl SourceRoot {
    /// Classify a locator string. URLs with an http scheme go over the network,
    /// anything else is treated as a directory.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Some(SourceRoot::Http(raw.trim_end_matches('/').to_string()))
        } else {
            Some(SourceRoot::Directory(raw.into()))
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// `None` means synthetic data only.
    pub source: Option<SourceRoot>,
    pub max_selections: usize,
    /// Fixed seed for synthetic generation; `None` draws from OS entropy.
    pub sample_seed: Option<u64>,
    pub fetch_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            source: None,
            max_selections: DEFAULT_MAX_SELECTIONS,
            sample_seed: None,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl SessionConfig {
    /// Synthetic-only session with a fixed seed (useful for demos and tests).
    pub fn seeded(seed: u64) -> Self {
        Self {
            sample_seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: SourceRoot) -> Self {
        self.source = Some(source);
        self
    }

    /// Load configuration from the environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, DataError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DataError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_SOURCE) {
            config.source = SourceRoot::parse(&raw);
        }

        if let Some(raw) = lookup(ENV_SEED) {
            let seed = raw.trim().parse::<u64>().map_err(|e| {
                DataError::new(ErrorKind::InvalidInput, format!("Invalid {ENV_SEED} '{raw}': {e}"))
            })?;
            config.sample_seed = Some(seed);
        }

        if let Some(raw) = lookup(ENV_MAX_YEARS) {
            let max = raw.trim().parse::<usize>().map_err(|e| {
                DataError::new(ErrorKind::InvalidInput, format!("Invalid {ENV_MAX_YEARS} '{raw}': {e}"))
            })?;
            if max == 0 {
                return Err(DataError::new(
                    ErrorKind::InvalidInput,
                    format!("{ENV_MAX_YEARS} must be > 0."),
                ));
            }
            config.max_selections = max;
        }

        if let Some(raw) = lookup(ENV_FETCH_TIMEOUT) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                DataError::new(
                    ErrorKind::InvalidInput,
                    format!("Invalid {ENV_FETCH_TIMEOUT} '{raw}': {e}"),
                )
            })?;
            config.fetch_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_synthetic_only() {
        let config = SessionConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.source.is_none());
        assert_eq!(config.max_selections, 3);
        assert!(config.sample_seed.is_none());
    }

    #[test]
    fn reads_source_and_seed() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            (ENV_SOURCE, "https://example.org/series/"),
            (ENV_SEED, "42"),
            (ENV_MAX_YEARS, "8"),
        ]))
        .unwrap();
        assert_eq!(
            config.source,
            Some(SourceRoot::Http("https://example.org/series".to_string()))
        );
        assert_eq!(config.sample_seed, Some(42));
        assert_eq!(config.max_selections, 8);
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = SessionConfig::from_lookup(lookup_from(&[(ENV_SEED, "abc")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(SessionConfig::from_lookup(lookup_from(&[(ENV_MAX_YEARS, "0")])).is_err());
    }

    #[test]
    fn non_url_source_is_a_directory() {
        assert_eq!(
            SourceRoot::parse("./data"),
            Some(SourceRoot::Directory("./data".into()))
        );
        assert_eq!(SourceRoot::parse("  "), None);
    }
}
