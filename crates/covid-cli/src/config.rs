//! Configuration file handling.
//!
//! The file lives in the platform config directory unless `--config` points
//! elsewhere:
//! - Linux: ~/.config/covid-trends/config.toml
//! - macOS: ~/Library/Application Support/org.covid-trends.covid-trends/config.toml
//! - Windows: %APPDATA%/covid-trends/covid-trends/config/config.toml

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use covid_ingest::{DEFAULT_CASES_URL, DEFAULT_HOSPITALIZATIONS_URL, Source};

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "covid-trends";
const APP_NAME: &str = "covid-trends";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: SourcesConfig,
    pub cache: CacheConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub cases: Source,
    pub hospitalizations: Source,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            cases: Source::url(DEFAULT_CASES_URL),
            hospitalizations: Source::url(DEFAULT_HOSPITALIZATIONS_URL),
        }
    }
}

impl SourcesConfig {
    /// Replace the named sources with command-line values. A value starting
    /// with `http://` or `https://` is a URL, anything else a path.
    pub fn apply_overrides(&mut self, cases: Option<&str>, hospitalizations: Option<&str>) {
        if let Some(value) = cases {
            self.cases = Source::parse(value);
        }
        if let Some(value) = hospitalizations {
            self.hospitalizations = Source::parse(value);
        }
    }

    /// True when at least one source is downloaded.
    pub fn any_remote(&self) -> bool {
        self.cases.is_remote() || self.hospitalizations.is_remote()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Keep downloaded bodies on disk for the rest of the day.
    pub enabled: bool,
    /// Defaults to the platform cache directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

impl CacheConfig {
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        self.dir.clone().or_else(default_cache_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Trailing window used for peaks in `summary`. Counted in rows, so a
    /// source with missing dates spans more calendar days.
    pub window_days: usize,
    /// Rows shown by `cases` and `hospitalizations`.
    pub rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            rows: 14,
        }
    }
}

/// A configuration together with the file it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub path: Option<PathBuf>,
    /// False when no file existed and defaults were used.
    pub from_file: bool,
}

pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

pub fn default_cache_dir() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME).map(|dirs| dirs.cache_dir().to_path_buf())
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse configuration")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize configuration")
    }
}

/// Load the configuration.
///
/// An explicit path must exist. The default path may be absent, in which
/// case defaults are used. A file that exists but does not parse is always
/// an error.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let (path, required) = match explicit {
        Some(path) => (Some(path.to_path_buf()), true),
        None => (config_path(), false),
    };
    let Some(path) = path else {
        debug!("no platform config directory, using defaults");
        return Ok(LoadedConfig {
            config: Config::default(),
            path: None,
            from_file: false,
        });
    };

    match fs::read_to_string(&path) {
        Ok(text) => {
            let config = Config::from_toml(&text)
                .with_context(|| format!("invalid config file {}", path.display()))?;
            info!(path = %path.display(), "loaded configuration");
            Ok(LoadedConfig {
                config,
                path: Some(path),
                from_file: true,
            })
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound && !required => {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(LoadedConfig {
                config: Config::default(),
                path: Some(path),
                from_file: false,
            })
        }
        Err(error) => {
            Err(error).with_context(|| format!("read config file {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_portal() {
        let config = Config::default();
        assert!(config.sources.cases.is_remote());
        assert!(config.cache.enabled);
        assert_eq!(config.display.window_days, 30);
        assert_eq!(config.display.rows, 14);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config = Config::from_toml(
            r#"
            [sources]
            cases = { path = "data/cases.csv" }

            [display]
            rows = 7
            "#,
        )
        .expect("parse");

        assert_eq!(config.sources.cases, Source::file("data/cases.csv"));
        assert_eq!(
            config.sources.hospitalizations,
            Source::url(DEFAULT_HOSPITALIZATIONS_URL)
        );
        assert_eq!(config.display.rows, 7);
        assert_eq!(config.display.window_days, 30);
    }

    #[test]
    fn overrides_replace_only_the_named_source() {
        let mut sources = SourcesConfig::default();
        sources.apply_overrides(Some("data/cases.csv"), None);

        assert_eq!(sources.cases, Source::file("data/cases.csv"));
        assert!(!sources.cases.is_remote());
        assert_eq!(sources.hospitalizations, Source::url(DEFAULT_HOSPITALIZATIONS_URL));
        assert!(sources.any_remote());

        sources.apply_overrides(None, Some("data/hosp.csv"));
        assert!(!sources.any_remote());

        sources.apply_overrides(Some("https://example.org/cases.csv"), None);
        assert_eq!(sources.cases, Source::url("https://example.org/cases.csv"));
    }

    #[test]
    fn serialized_defaults_parse_back() {
        let config = Config::default();
        let text = config.to_toml().expect("serialize");
        assert_eq!(Config::from_toml(&text).expect("parse"), config);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = load_config(Some(&dir.path().join("absent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display]\nrows = \"many\"\n").expect("write");

        let error = load_config(Some(&path)).unwrap_err();
        assert!(format!("{error:#}").contains("invalid config file"));
    }
}
