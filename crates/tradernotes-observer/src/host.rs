//! The read-only view of the game world the observer works against.
//!
//! The host (game client) implements these traits; `test_support` has in-memory fakes.

use serde_json::{Map, Value};
use tradernotes_models::{Position, TraderId};

use crate::error::ObserverError;

/// Structured offer data carried by a dedicated trade slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeItem {
    pub stock: u32,
    pub price: u32,
}

/// A named group of generic item attributes, e.g. `tradeprops`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeTree {
    values: Map<String, Value>,
}

impl AttributeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON object. Anything else is not an attribute tree.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(values) => Some(Self { values }),
            _ => None,
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Integer value of `key`. Floats are truncated; other types read as absent.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        let value = self.values.get(key)?;
        value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
    }
}

/// One slot of a trader inventory.
pub trait InventorySlot {
    /// No item stack in this slot.
    fn is_empty(&self) -> bool;
    /// Collectible code path of the stack, e.g. `gear-rusty`.
    fn item_code(&self) -> &str;
    fn stack_size(&self) -> u32;
    /// The slot is greyed out and cannot be traded right now.
    fn draw_unavailable(&self) -> bool;
    /// Structured trade data, present on dedicated trade slots.
    fn trade_item(&self) -> Option<TradeItem>;
    fn attribute_group(&self, group: &str) -> Option<&AttributeTree>;
    fn item_name(&self) -> Result<String, ObserverError>;
    /// Name of the stack wrapped under `tradeprops/stack`, if there is one.
    fn trade_stack_name(&self) -> Result<Option<String>, ObserverError>;
}

/// A loaded entity that may be a trader.
pub trait TraderEntity {
    type Slot: InventorySlot;

    fn entity_id(&self) -> TraderId;
    fn is_trader(&self) -> bool;
    /// Name shown on the entity's name tag.
    fn name_tag(&self) -> Option<String>;
    /// Free-text `traderTag` attribute.
    fn trader_tag(&self) -> Option<String>;
    /// Entity code path, e.g. `humanoid-trader-artisan`.
    fn code_path(&self) -> &str;
    fn position(&self) -> Position;
    /// Currency in the trader's money slot, 0 when the slot is empty.
    fn funds(&self) -> u32;
    /// World days until the trader's offers roll over.
    fn refresh_remaining(&self) -> f64;
    fn inventory(&self) -> Option<&[Self::Slot]>;
}

/// The client-side world.
pub trait WorldHost {
    type Entity: TraderEntity;

    /// Monotonic world calendar time in days.
    fn world_time(&self) -> f64;
    /// `None` while no player entity exists (loading screens, spectating).
    fn player_position(&self) -> Option<Position>;
    fn loaded_entities(&self) -> Vec<&Self::Entity>;
    fn nearest_entity(
        &self,
        origin: Position,
        radius: f64,
        predicate: &dyn Fn(&Self::Entity) -> bool,
    ) -> Option<&Self::Entity>;
    /// Slots of the trade dialog the player has open, if any.
    fn open_trade_inventory(&self) -> Option<&[<Self::Entity as TraderEntity>::Slot]>;
    /// Add the trader layer to the world map. Returns false while the map
    /// system is not ready yet; called again on later ticks.
    fn try_register_overlay(&mut self) -> bool;
}
