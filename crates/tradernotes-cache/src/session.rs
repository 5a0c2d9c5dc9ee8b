use tradernotes_models::{Position, TraderId};

use crate::registry::TraderRegistry;
use crate::store::CacheStore;
use crate::updater::{ChangeDetector, TraderObservation};

/// The trader cache of one world session: the registry plus the file it is persisted to.
///
/// Written by the observation scheduler, read by the map overlay.
#[derive(Debug, Default)]
pub struct TraderCache {
    registry: TraderRegistry,
    store: Option<CacheStore>,
    detector: ChangeDetector,
}

impl TraderCache {
    pub fn new(detector: ChangeDetector) -> Self {
        Self {
            registry: TraderRegistry::new(),
            store: None,
            detector,
        }
    }

    /// Start a world session: drop whatever is cached and load the world's file.
    pub fn begin_session(&mut self, store: CacheStore) {
        self.registry.replace_all(store.load_or_empty());
        tracing::info!(
            path = %store.path().display(),
            traders = self.registry.len(),
            "Trader cache session started"
        );
        self.store = Some(store);
    }

    /// Flush and forget the current session.
    pub fn end_session(&mut self) {
        self.flush();
        self.registry.clear();
        self.store = None;
        tracing::info!("Trader cache session ended");
    }

    pub fn in_session(&self) -> bool {
        self.store.is_some()
    }

    /// Write the registry to disk. Failures are logged and the in-memory
    /// registry stays authoritative until the next successful write.
    pub fn flush(&self) -> bool {
        let Some(store) = &self.store else {
            tracing::debug!("No cache session, skipping flush");
            return false;
        };
        match store.save(self.registry.records()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(path = %store.path().display(), error = %e, "Failed to save trader cache");
                false
            }
        }
    }

    /// Apply an observation; persists when the record changed.
    pub fn record(&mut self, obs: &TraderObservation, now: f64) -> bool {
        let changed = self.detector.apply(&mut self.registry, obs, now);
        if changed {
            self.flush();
        }
        changed
    }

    /// Track a loaded trader's live position. Not persisted on its own.
    pub fn update_position(&mut self, id: TraderId, position: Position) -> bool {
        self.registry.update_position(id, position)
    }

    pub fn registry(&self) -> &TraderRegistry {
        &self.registry
    }

    pub fn store(&self) -> Option<&CacheStore> {
        self.store.as_ref()
    }
}
