//! TraderNotes - remembers what every trader sells and buys
//!
//! Watches trade sessions, keeps a per-world cache of trader offers on disk
//! and renders them as world map markers with hover tooltips.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tradernotes::TraderNotes;
//! use tradernotes::observer::test_support::FakeWorld;
//! use tradernotes::models::Position;
//!
//! let mut notes = TraderNotes::start(Path::new("ModConfig/tradernotes.toml"));
//! notes.enter_world(Path::new("."), "my-world");
//! let mut world = FakeWorld::with_player(Position::new(0.0, 110.0, 0.0));
//! notes.on_tick(&mut world);
//! notes.leave_world();
//! ```

pub mod overlay;

pub use tradernotes_cache as cache;
pub use tradernotes_models as models;
pub use tradernotes_observer as observer;

use std::path::Path;

use tradernotes_cache::{CacheStore, ChangeDetector, TraderCache};
use tradernotes_models::{BuiltinLang, Localizer, TraderNotesConfig};
use tradernotes_observer::{ObservationScheduler, TickReport, WorldHost};

use crate::overlay::OverlayPresenter;

/// The mod as the host sees it: one instance per game client.
pub struct TraderNotes {
    config: TraderNotesConfig,
    cache: TraderCache,
    scheduler: ObservationScheduler,
    lang: Box<dyn Localizer>,
}

impl TraderNotes {
    /// Load (or create) the config file and set up an idle cache.
    pub fn start(config_path: &Path) -> Self {
        let config = tradernotes_observer::config::load_or_default(config_path);
        Self::with_config(config, Box::new(BuiltinLang))
    }

    /// Like [`start`](Self::start), but never writes: a missing or unreadable
    /// config file just means defaults.
    pub fn start_read_only(config_path: &Path) -> Self {
        let config = tradernotes_observer::config::read_config(config_path).unwrap_or_default();
        Self::with_config(config, Box::new(BuiltinLang))
    }

    pub fn with_config(config: TraderNotesConfig, lang: Box<dyn Localizer>) -> Self {
        let cache = TraderCache::new(ChangeDetector::from_config(&config.observer));
        let scheduler = ObservationScheduler::with_localizer(config.observer.clone(), lang.as_ref());
        Self {
            config,
            cache,
            scheduler,
            lang,
        }
    }

    /// Level finalized: open the world's cache file.
    pub fn enter_world(&mut self, data_dir: &Path, world_id: &str) {
        self.scheduler.reset_session();
        let store = CacheStore::for_world(data_dir, world_id);
        tracing::info!(world = world_id, path = %store.path().display(), "Entering world");
        self.cache.begin_session(store);
    }

    /// Leaving the world: flush and forget its traders.
    pub fn leave_world(&mut self) {
        if self.cache.in_session() {
            tracing::info!(traders = self.cache.registry().len(), "Leaving world");
        }
        self.cache.end_session();
        self.scheduler.reset_session();
    }

    /// Host tick callback, once per `observer.tick_interval_ms`.
    pub fn on_tick<H: WorldHost>(&mut self, host: &mut H) -> TickReport {
        self.scheduler.tick(host, &mut self.cache)
    }

    pub fn presenter(&self) -> OverlayPresenter<'_> {
        OverlayPresenter::new(&self.config, self.lang.as_ref())
    }

    pub fn config(&self) -> &TraderNotesConfig {
        &self.config
    }

    pub fn cache(&self) -> &TraderCache {
        &self.cache
    }

    pub fn scheduler(&self) -> &ObservationScheduler {
        &self.scheduler
    }
}
