use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classifier::TraderKind;
use crate::offer::{OfferSnapshot, TradeOffer};

/// Host entity identity of a trader. Used as the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraderId(pub i64);

impl fmt::Display for TraderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// World coordinates in blocks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Everything remembered about one trader.
///
/// Times are world-calendar days (the host's "total days" clock), not wall time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraderRecord {
    pub id: TraderId,
    pub display_name: String,
    #[serde(default)]
    pub trader_type: TraderKind,
    #[serde(default)]
    pub funds: u32,
    /// Set once real offer contents have been captured. Never cleared.
    #[serde(default)]
    pub discovered: bool,
    /// World time of the last offer capture.
    #[serde(default)]
    pub last_updated_at: f64,
    /// Absolute world time at which the trader's offers roll over.
    #[serde(default)]
    pub next_refresh_at: f64,
    #[serde(default)]
    pub sells: Vec<TradeOffer>,
    #[serde(default)]
    pub wants: Vec<TradeOffer>,
    #[serde(default)]
    pub position: Position,
}

impl TraderRecord {
    /// A freshly tracked trader: not yet discovered, no offers.
    pub fn new(id: TraderId, display_name: impl Into<String>, trader_type: TraderKind) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            trader_type,
            funds: 0,
            discovered: false,
            last_updated_at: 0.0,
            next_refresh_at: 0.0,
            sells: Vec::new(),
            wants: Vec::new(),
            position: Position::default(),
        }
    }

    /// Whether the stored lists match `snapshot` entry for entry, in order.
    pub fn offers_match(&self, snapshot: &OfferSnapshot) -> bool {
        self.sells == snapshot.sells && self.wants == snapshot.wants
    }

    pub fn days_until_refresh(&self, now: f64) -> f64 {
        self.next_refresh_at - now
    }
}
