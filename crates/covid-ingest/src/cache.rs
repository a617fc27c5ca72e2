//! Same-day on-disk cache of downloaded source bodies.
//!
//! Entries are named `<dataset>-<YYYY-MM-DD>.csv`. Only the entry for the
//! current day is ever read; storing a new entry prunes older ones for the
//! same dataset.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct SourceCache {
    dir: PathBuf,
}

impl SourceCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn entry_path(&self, dataset: &str, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{dataset}-{}.csv", date.format("%Y-%m-%d")))
    }

    /// Cached body for `dataset` on `date`, if one was stored.
    pub fn load(&self, dataset: &str, date: NaiveDate) -> Option<String> {
        let path = self.entry_path(dataset, date);
        match fs::read_to_string(&path) {
            Ok(body) => Some(body),
            Err(error) if error.kind() == io::ErrorKind::NotFound => None,
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to read cache entry");
                None
            }
        }
    }

    /// Store `body` as the entry for `date` and drop older entries.
    pub fn store(&self, dataset: &str, date: NaiveDate, body: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.entry_path(dataset, date);
        fs::write(&path, body)?;
        debug!(path = %path.display(), "stored cache entry");
        self.prune(dataset, &path);
        Ok(())
    }

    fn prune(&self, dataset: &str, keep: &Path) {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return;
        };
        let prefix = format!("{dataset}-");
        for entry in entries.flatten() {
            let path = entry.path();
            if path == keep {
                continue;
            }
            let is_stale = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&prefix) && name.ends_with(".csv"));
            if is_stale && let Err(error) = fs::remove_file(&path) {
                warn!(path = %path.display(), %error, "failed to prune cache entry");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 3, day).unwrap()
    }

    #[test]
    fn load_misses_until_stored() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cache = SourceCache::new(dir.path().join("cache"));

        assert_eq!(cache.load("cases", date(1)), None);
        cache.store("cases", date(1), "a,b\n").expect("store");
        assert_eq!(cache.load("cases", date(1)).as_deref(), Some("a,b\n"));
        assert_eq!(cache.load("cases", date(2)), None);
    }

    #[test]
    fn store_prunes_older_entries_for_the_same_dataset() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cache = SourceCache::new(dir.path());

        cache.store("cases", date(1), "old").expect("store");
        cache.store("hospitalizations", date(1), "other").expect("store");
        cache.store("cases", date(2), "new").expect("store");

        assert!(!cache.entry_path("cases", date(1)).exists());
        assert!(cache.entry_path("cases", date(2)).exists());
        assert!(cache.entry_path("hospitalizations", date(1)).exists());
    }
}
