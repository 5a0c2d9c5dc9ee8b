use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tradernotes_cache::{TraderCache, TraderObservation};
use tradernotes_models::lang::keys;
use tradernotes_models::{BuiltinLang, Localizer, ObserverConfig, TraderId};

use crate::host::{TraderEntity, WorldHost};
use crate::snapshot::OfferSnapshotBuilder;

/// What a single tick did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub session_open: bool,
    /// Traders whose cached record changed (and was flushed).
    pub changed: Vec<TraderId>,
    /// Known traders whose live position was refreshed.
    pub positions_updated: usize,
}

/// Polls the world at a fixed cadence and feeds what it sees into the trader cache.
#[derive(Debug)]
pub struct ObservationScheduler {
    config: ObserverConfig,
    builder: OfferSnapshotBuilder,
    default_trader_name: String,
    session_was_open: bool,
    overlay_registered: bool,
}

impl ObservationScheduler {
    pub fn new(config: ObserverConfig) -> Self {
        Self::with_localizer(config, &BuiltinLang)
    }

    pub fn with_localizer(config: ObserverConfig, lang: &dyn Localizer) -> Self {
        Self {
            config,
            builder: OfferSnapshotBuilder::with_localizer(lang),
            default_trader_name: lang.get(keys::TRADER_DEFAULT_NAME),
            session_was_open: false,
            overlay_registered: false,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.config.tick_interval_ms.max(1))
    }

    pub fn overlay_registered(&self) -> bool {
        self.overlay_registered
    }

    /// Forget per-session state so the next world registers its overlay again.
    pub fn reset_session(&mut self) {
        self.session_was_open = false;
        self.overlay_registered = false;
    }

    /// Run one observation pass.
    pub fn tick<H: WorldHost>(&mut self, host: &mut H, cache: &mut TraderCache) -> TickReport {
        if !self.overlay_registered && host.try_register_overlay() {
            self.overlay_registered = true;
            tracing::info!("Trader map layer registered");
        }

        let mut report = TickReport::default();
        let Some(player) = host.player_position() else {
            return report;
        };
        let now = host.world_time();
        let open_slots = host.open_trade_inventory();
        let session_open = open_slots.is_some();
        report.session_open = session_open;

        // The tick right after the dialog closes still runs, to catch the final funds.
        if session_open || self.session_was_open {
            let is_trader = |e: &H::Entity| e.is_trader();
            match host.nearest_entity(player, self.config.search_radius, &is_trader) {
                Some(trader) => {
                    let slots = open_slots.or_else(|| trader.inventory());
                    let obs = self.observe(trader, slots, session_open);
                    if cache.record(&obs, now) {
                        report.changed.push(obs.id);
                    }
                }
                None => {
                    tracing::debug!(radius = self.config.search_radius, "No trader near open trade session");
                }
            }
        }
        self.session_was_open = session_open;

        for entity in host.loaded_entities() {
            if !entity.is_trader() {
                continue;
            }
            let id = entity.entity_id();
            if !cache.update_position(id, entity.position()) {
                continue;
            }
            report.positions_updated += 1;

            if self.config.live_update && !session_open {
                let obs = self.observe(entity, entity.inventory(), false);
                if cache.record(&obs, now) {
                    report.changed.push(id);
                }
            }
        }

        report
    }

    /// Tick every interval until `cancel` fires.
    pub async fn run<H: WorldHost>(
        &mut self,
        host: &mut H,
        cache: &mut TraderCache,
        cancel: CancellationToken,
    ) {
        let mut interval = tokio::time::interval(self.interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::info!(interval_ms = self.interval().as_millis() as u64, "Observation scheduler started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Observation scheduler shutting down");
                    break;
                }
                _ = interval.tick() => {
                    let report = self.tick(host, cache);
                    if !report.changed.is_empty() {
                        tracing::debug!(changed = report.changed.len(), "Tick updated traders");
                    }
                }
            }
        }
    }

    fn observe<E: TraderEntity>(
        &self,
        trader: &E,
        slots: Option<&[E::Slot]>,
        session_open: bool,
    ) -> TraderObservation {
        TraderObservation {
            id: trader.entity_id(),
            display_name: trader
                .name_tag()
                .unwrap_or_else(|| self.default_trader_name.clone()),
            tag_text: trader.trader_tag().unwrap_or_default(),
            code_text: trader.code_path().to_string(),
            funds: trader.funds(),
            refresh_remaining: session_open.then(|| trader.refresh_remaining()),
            offers: slots.map(|slots| self.builder.build(slots)),
            position: trader.position(),
        }
    }
}
