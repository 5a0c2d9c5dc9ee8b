use tradernotes_models::{classify, ObserverConfig, OfferSnapshot, Position, TraderId, TraderRecord};

use crate::registry::TraderRegistry;

/// Refresh-time differences at or below this many days are not a change.
pub const DEFAULT_REFRESH_TOLERANCE: f64 = 0.01;

/// What one tick saw of a single trader.
#[derive(Debug, Clone, PartialEq)]
pub struct TraderObservation {
    pub id: TraderId,
    /// Name used only when the trader is seen for the first time.
    pub display_name: String,
    pub tag_text: String,
    pub code_text: String,
    pub funds: u32,
    /// Days until the trader restocks. Only set while a trade session is open.
    pub refresh_remaining: Option<f64>,
    /// Offers captured this tick, if the inventory was readable.
    pub offers: Option<OfferSnapshot>,
    pub position: Position,
}

/// Folds observations into the registry and reports whether anything changed.
#[derive(Debug, Clone, Copy)]
pub struct ChangeDetector {
    refresh_tolerance: f64,
}

impl Default for ChangeDetector {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_TOLERANCE)
    }
}

impl ChangeDetector {
    pub fn new(refresh_tolerance_days: f64) -> Self {
        Self {
            refresh_tolerance: refresh_tolerance_days.abs(),
        }
    }

    pub fn from_config(config: &ObserverConfig) -> Self {
        Self::new(config.refresh_tolerance_days)
    }

    pub fn refresh_tolerance(&self) -> f64 {
        self.refresh_tolerance
    }

    /// Apply `obs` to the registry at world time `now`.
    ///
    /// Returns true when the stored record was modified and should be persisted.
    /// Position is only taken from the observation when something else changed.
    pub fn apply(&self, registry: &mut TraderRegistry, obs: &TraderObservation, now: f64) -> bool {
        let kind = classify(&obs.tag_text, &obs.code_text);
        let record = registry.get_or_insert_with(obs.id, || {
            TraderRecord::new(obs.id, obs.display_name.clone(), kind)
        });
        let mut changed = false;

        if record.trader_type != kind {
            record.trader_type = kind;
            changed = true;
        }

        if record.funds != obs.funds {
            record.funds = obs.funds;
            changed = true;
        }

        if let Some(remaining) = obs.refresh_remaining {
            let target = now + remaining;
            if (record.next_refresh_at - target).abs() > self.refresh_tolerance {
                record.next_refresh_at = target;
                changed = true;
            }
        }

        if let Some(offers) = &obs.offers {
            if !record.offers_match(offers) {
                record.sells = offers.sells.clone();
                record.wants = offers.wants.clone();
                record.discovered = true;
                record.last_updated_at = now;
                changed = true;
            }
        }

        if changed {
            record.position = obs.position;
            tracing::debug!(
                trader_id = %obs.id,
                funds = record.funds,
                sells = record.sells.len(),
                wants = record.wants.len(),
                "Trader state changed"
            );
        }

        changed
    }
}
