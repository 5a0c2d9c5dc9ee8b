use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tradernotes_models::cache_schema::{self, CacheFile};

use crate::error::CacheError;

/// JSON file holding one world's trader cache.
///
/// Writes go to a sibling temp file first and are renamed into place,
/// so a failed save never leaves a half-written cache behind.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for the save identified by `world_id` under the host data directory.
    pub fn for_world(data_dir: &Path, world_id: &str) -> Self {
        Self::new(cache_schema::cache_file_path(data_dir, world_id))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the cache file.
    pub fn load(&self) -> Result<CacheFile, CacheError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CacheError::NotFound(self.path.clone()))
            }
            Err(e) => {
                return Err(CacheError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        Ok(serde_json::from_str(&text)?)
    }

    /// Like [`load`](Self::load), but any failure yields an empty cache.
    pub fn load_or_empty(&self) -> CacheFile {
        match self.load() {
            Ok(records) => {
                tracing::info!(path = %self.path.display(), count = records.len(), "Loaded trader cache");
                records
            }
            Err(CacheError::NotFound(_)) => {
                tracing::info!(path = %self.path.display(), "No trader cache yet, starting empty");
                CacheFile::new()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Discarding unreadable trader cache");
                CacheFile::new()
            }
        }
    }

    /// Write all records as indented JSON, creating the directory if needed.
    pub fn save(&self, records: &CacheFile) -> Result<(), CacheError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| CacheError::Io {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| CacheError::Io {
            path: tmp.clone(),
            source: e,
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| CacheError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradernotes_models::{Position, TradeOffer, TraderId, TraderKind, TraderRecord};

    fn sample_records() -> CacheFile {
        let mut discovered = TraderRecord::new(TraderId(101), "Olga", TraderKind::Artisan);
        discovered.funds = 340;
        discovered.discovered = true;
        discovered.last_updated_at = 12.5;
        discovered.next_refresh_at = 15.25;
        discovered.position = Position::new(512.5, 110.0, -230.5);
        discovered.sells = vec![TradeOffer {
            name: "Linen".to_string(),
            stock: 4,
            unit_stack_size: 8,
            price: 3,
            sold_out: false,
        }];
        discovered.wants = vec![TradeOffer {
            name: "Bone".to_string(),
            stock: 0,
            unit_stack_size: 16,
            price: 1,
            sold_out: true,
        }];

        let tracked = TraderRecord::new(TraderId(-7), "Bram", TraderKind::Unknown);

        let mut records = CacheFile::new();
        records.insert(discovered.id, discovered);
        records.insert(tracked.id, tracked);
        records
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::for_world(dir.path(), "world-1");
        let records = sample_records();

        store.save(&records).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn save_creates_mod_data_dir_and_indents() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::for_world(dir.path(), "");
        store.save(&sample_records()).unwrap();

        let expected = dir.path().join("ModData/tradernotes_cache.default.json");
        assert_eq!(store.path(), expected.as_path());
        let text = fs::read_to_string(&expected).unwrap();
        assert!(text.contains("\n  \"-7\": {"));
        assert!(!expected.with_extension("json.tmp").exists());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::for_world(dir.path(), "nowhere");
        assert!(matches!(store.load(), Err(CacheError::NotFound(_))));
        assert!(store.load_or_empty().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "{ this is not json").unwrap();
        let store = CacheStore::new(&path);

        assert!(matches!(store.load(), Err(CacheError::Json(_))));
        assert!(store.load_or_empty().is_empty());
    }

    #[test]
    fn save_into_blocked_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "a file, not a directory").unwrap();
        let store = CacheStore::for_world(&blocker, "w");

        assert!(matches!(
            store.save(&sample_records()),
            Err(CacheError::Io { .. })
        ));
    }
}
