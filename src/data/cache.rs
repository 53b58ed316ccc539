//! Session cache for load results.
//!
//! The dashboard recomputes everything on every interaction, so reading the CSV each time
//! would dominate frame time. Results are memoized per path and dropped when the file's
//! modification time changes or the user asks for a reload.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::loader::{LoadOutcome, load_table};

struct CachedLoad {
    modified: Option<SystemTime>,
    outcome: Arc<LoadOutcome>,
}

/// Memoized `load_table` results keyed by file path.
#[derive(Default)]
pub struct TableCache {
    entries: HashMap<PathBuf, CachedLoad>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached outcome for `path`, loading it first if needed.
    ///
    /// A missing file is cached as well and retried once the file appears.
    pub fn get_or_load(&mut self, path: &Path) -> Arc<LoadOutcome> {
        let modified = modified_time(path);

        if let Some(entry) = self.entries.get(path) {
            if entry.modified == modified {
                return Arc::clone(&entry.outcome);
            }
            log::debug!("Cached table for {} is stale, reloading", path.display());
        }

        let outcome = Arc::new(load_table(path));
        self.entries.insert(
            path.to_path_buf(),
            CachedLoad {
                modified,
                outcome: Arc::clone(&outcome),
            },
        );
        outcome
    }

    /// Drop every cached result.
    pub fn clear(&mut self) {
        log::debug!("Clearing {} cached tables", self.entries.len());
        self.entries.clear();
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    const CONTENT: &str = "timestamp,Bytes,Elapsed Time (sec)\n2024-01-01 10:00:00,5,1\n";

    #[test]
    fn test_repeated_loads_share_result() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, CONTENT).unwrap();

        let mut cache = TableCache::new();
        let first = cache.get_or_load(&path);
        let second = cache.get_or_load(&path);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.entries.len(), 1);
    }

    #[test]
    fn test_clear_forces_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, CONTENT).unwrap();

        let mut cache = TableCache::new();
        let first = cache.get_or_load(&path);
        cache.clear();
        assert!(cache.entries.is_empty());
        let second = cache.get_or_load(&path);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.table, second.table);
    }

    #[test]
    fn test_modified_file_is_reloaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, CONTENT).unwrap();

        let mut cache = TableCache::new();
        assert_eq!(cache.get_or_load(&path).table.len(), 1);

        fs::write(&path, format!("{}2024-01-01 11:00:00,7,2\n", CONTENT)).unwrap();
        let later = SystemTime::now() + Duration::from_secs(5);
        fs::File::options().write(true).open(&path).unwrap().set_modified(later).unwrap();

        assert_eq!(cache.get_or_load(&path).table.len(), 2);
    }

    #[test]
    fn test_file_appearing_after_miss() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");

        let mut cache = TableCache::new();
        assert!(cache.get_or_load(&path).table.is_empty());

        fs::write(&path, CONTENT).unwrap();
        assert_eq!(cache.get_or_load(&path).table.len(), 1);
    }
}
