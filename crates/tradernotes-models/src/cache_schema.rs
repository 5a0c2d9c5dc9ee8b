use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::trader::{TraderId, TraderRecord};

/// On-disk cache layout: trader id → record, serialized as indented JSON.
///
/// ```json
/// {
///   "1234": {
///     "id": 1234,
///     "display_name": "Olga",
///     "trader_type": "artisan",
///     "funds": 140,
///     "discovered": true,
///     ...
///   }
/// }
/// ```
pub type CacheFile = BTreeMap<TraderId, TraderRecord>;

/// Directory under the host data path holding cache files.
pub const CACHE_DIR: &str = "ModData";
/// World identity used when the save reports none.
pub const DEFAULT_WORLD_ID: &str = "default";
/// Configuration file name, looked up in the host config directory.
pub const CONFIG_FILE_NAME: &str = "tradernotes.toml";

/// `tradernotes_cache.{world_id}.json`, one file per save.
pub fn cache_file_name(world_id: &str) -> String {
    let world_id = world_id.trim();
    let world_id = if world_id.is_empty() {
        DEFAULT_WORLD_ID
    } else {
        world_id
    };
    format!("tradernotes_cache.{world_id}.json")
}

pub fn cache_file_path(data_dir: &Path, world_id: &str) -> PathBuf {
    data_dir.join(CACHE_DIR).join(cache_file_name(world_id))
}
