//! Source acquisition: local files or the open data portal's CSV endpoint.
//!
//! One attempt per load, no retries. Remote bodies are cached on disk for the
//! current calendar day so repeated runs do not hit the portal again.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cache::SourceCache;
use crate::error::{IngestError, Result};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Philadelphia open data export of test results by collection date.
pub const DEFAULT_CASES_URL: &str = "https://phl.carto.com/api/v2/sql?filename=covid_cases_by_date&format=csv&skipfields=cartodb_id,the_geom,the_geom_webmercator&q=SELECT%20*%20FROM%20covid_cases_by_date";

/// Philadelphia open data export of hospitalizations by date.
pub const DEFAULT_HOSPITALIZATIONS_URL: &str = "https://phl.carto.com/api/v2/sql?filename=covid_hospitalizations_by_date&format=csv&skipfields=cartodb_id,the_geom,the_geom_webmercator&q=SELECT%20*%20FROM%20covid_hospitalizations_by_date";

/// Where a dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Source {
    File { path: PathBuf },
    Url { url: String },
}

impl Source {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url { url: url.into() }
    }

    /// Interpret a command-line argument: `http(s)://` is a URL, anything
    /// else a path.
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::url(value)
        } else {
            Self::file(value)
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url { .. })
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path } => write!(f, "{}", path.display()),
            Self::Url { url } => f.write_str(url),
        }
    }
}

/// Fetches source bodies, consulting an optional same-day cache for remote
/// sources.
pub struct SourceClient {
    client: Client,
    cache: Option<SourceCache>,
}

impl SourceClient {
    pub fn new(cache: Option<SourceCache>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| IngestError::unavailable("http client", error))?;
        Ok(Self { client, cache })
    }

    /// Return the body of `source` as text.
    ///
    /// `dataset` names the cache entry; `today` keys it. Files are always
    /// read directly.
    pub fn fetch_text(&self, dataset: &str, source: &Source, today: NaiveDate) -> Result<String> {
        match source {
            Source::File { path } => {
                debug!(dataset, path = %path.display(), "reading source file");
                fs::read_to_string(path)
                    .map_err(|error| IngestError::unavailable(source.to_string(), error))
            }
            Source::Url { url } => {
                if let Some(body) = self.cache.as_ref().and_then(|c| c.load(dataset, today)) {
                    debug!(dataset, %today, "using cached source body");
                    return Ok(body);
                }
                let body = self.download(url)?;
                if let Some(cache) = &self.cache
                    && let Err(error) = cache.store(dataset, today, &body)
                {
                    warn!(dataset, %error, "failed to cache source body");
                }
                Ok(body)
            }
        }
    }

    fn download(&self, url: &str) -> Result<String> {
        let started = Instant::now();
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, concat!("covid-trends/", env!("CARGO_PKG_VERSION")))
            .send()
            .map_err(|error| IngestError::unavailable(url, error))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(IngestError::unavailable(url, format!("HTTP {status}")));
        }

        let body = response
            .text()
            .map_err(|error| IngestError::unavailable(url, error))?;
        info!(
            url,
            bytes = body.len(),
            duration_ms = started.elapsed().as_millis(),
            "downloaded source"
        );
        Ok(body)
    }
}
