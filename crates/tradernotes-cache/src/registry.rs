use std::collections::btree_map::Entry;

use tradernotes_models::cache_schema::CacheFile;
use tradernotes_models::{Position, TraderId, TraderRecord};

/// In-memory trader cache for the current world session.
///
/// Records are only ever added or updated; the whole map is replaced
/// when a new session loads its cache file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraderRegistry {
    records: CacheFile,
}

impl TraderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: TraderId) -> Option<&TraderRecord> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: TraderId) -> bool {
        self.records.contains_key(&id)
    }

    /// Existing record for `id`, or a new one built by `create`.
    pub fn get_or_insert_with(
        &mut self,
        id: TraderId,
        create: impl FnOnce() -> TraderRecord,
    ) -> &mut TraderRecord {
        match self.records.entry(id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                tracing::debug!(trader_id = %id, "Tracking new trader");
                entry.insert(create())
            }
        }
    }

    /// Move a known trader. Unknown ids are ignored; returns whether a record was touched.
    pub fn update_position(&mut self, id: TraderId, position: Position) -> bool {
        match self.records.get_mut(&id) {
            Some(record) => {
                record.position = position;
                true
            }
            None => false,
        }
    }

    /// Records whose offers have been captured at least once.
    pub fn discovered(&self) -> impl Iterator<Item = &TraderRecord> {
        self.records.values().filter(|r| r.discovered)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn replace_all(&mut self, records: CacheFile) {
        self.records = records;
    }

    pub fn records(&self) -> &CacheFile {
        &self.records
    }
}
