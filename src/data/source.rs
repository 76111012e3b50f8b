//! External series sources (HTTP or local directory).

use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::domain::{AssetProfile, SourceRoot};
use crate::error::{DataError, ErrorKind};

/// Fetches the raw delimited text for one asset class.
pub trait SeriesSource: Send + Sync {
    fn fetch_text(&self, profile: &AssetProfile) -> Result<String, DataError>;

    /// Human-readable locator for `profile` (used in log lines).
    fn locate(&self, profile: &AssetProfile) -> String;
}

pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::new(ErrorKind::Fetch, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl SeriesSource for HttpSource {
    fn fetch_text(&self, profile: &AssetProfile) -> Result<String, DataError> {
        let url = self.locate(profile);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::new(ErrorKind::Fetch, format!("Request to {url} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(DataError::new(
                ErrorKind::Fetch,
                format!("Request to {url} failed with status {}.", resp.status()),
            ));
        }

        resp.text()
            .map_err(|e| DataError::new(ErrorKind::Fetch, format!("Failed to read body from {url}: {e}")))
    }

    fn locate(&self, profile: &AssetProfile) -> String {
        format!("{}/{}", self.base_url, profile.source_path.trim_start_matches('/'))
    }
}

pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SeriesSource for FileSource {
    fn fetch_text(&self, profile: &AssetProfile) -> Result<String, DataError> {
        let path = self.root.join(&profile.source_path);
        std::fs::read_to_string(&path).map_err(|e| {
            DataError::new(
                ErrorKind::Fetch,
                format!("Failed to read '{}': {e}", path.display()),
            )
        })
    }

    fn locate(&self, profile: &AssetProfile) -> String {
        self.root.join(&profile.source_path).display().to_string()
    }
}

/// Build the source described by `root`.
pub fn source_for(root: &SourceRoot, timeout: Duration) -> Result<Box<dyn SeriesSource>, DataError> {
    match root {
        SourceRoot::Http(url) => Ok(Box::new(HttpSource::new(url.clone(), timeout)?)),
        SourceRoot::Directory(dir) => Ok(Box::new(FileSource::new(dir.clone()))),
    }
}
