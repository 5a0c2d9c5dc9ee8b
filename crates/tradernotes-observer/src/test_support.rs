//! In-memory implementations of the host traits for tests and demos.

use tradernotes_models::{Position, TraderId};

use crate::error::ObserverError;
use crate::host::{AttributeTree, InventorySlot, TradeItem, TraderEntity, WorldHost};

/// A scripted inventory slot.
#[derive(Debug, Clone, Default)]
pub struct FakeSlot {
    /// `None` means the slot is empty.
    pub code: Option<String>,
    pub name: String,
    pub stack_size: u32,
    pub unavailable: bool,
    pub trade_item: Option<TradeItem>,
    pub attributes: Vec<(String, AttributeTree)>,
    pub trade_stack_name: Option<String>,
    pub name_fails: bool,
}

impl FakeSlot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn item(code: &str, name: &str, stack_size: u32) -> Self {
        Self {
            code: Some(code.to_string()),
            name: name.to_string(),
            stack_size,
            ..Self::default()
        }
    }

    pub fn with_trade_item(mut self, stock: u32, price: u32) -> Self {
        self.trade_item = Some(TradeItem { stock, price });
        self
    }

    pub fn with_attributes(mut self, group: &str, tree: AttributeTree) -> Self {
        self.attributes.push((group.to_string(), tree));
        self
    }

    pub fn with_trade_stack_name(mut self, name: &str) -> Self {
        self.trade_stack_name = Some(name.to_string());
        self
    }

    pub fn with_broken_name(mut self) -> Self {
        self.name_fails = true;
        self
    }

    pub fn sold_out(mut self) -> Self {
        self.unavailable = true;
        self
    }
}

impl InventorySlot for FakeSlot {
    fn is_empty(&self) -> bool {
        self.code.is_none()
    }

    fn item_code(&self) -> &str {
        self.code.as_deref().unwrap_or("")
    }

    fn stack_size(&self) -> u32 {
        self.stack_size
    }

    fn draw_unavailable(&self) -> bool {
        self.unavailable
    }

    fn trade_item(&self) -> Option<TradeItem> {
        self.trade_item
    }

    fn attribute_group(&self, group: &str) -> Option<&AttributeTree> {
        self.attributes
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, tree)| tree)
    }

    fn item_name(&self) -> Result<String, ObserverError> {
        if self.name_fails {
            return Err(ObserverError::ItemName(format!(
                "no collectible for {}",
                self.item_code()
            )));
        }
        Ok(self.name.clone())
    }

    fn trade_stack_name(&self) -> Result<Option<String>, ObserverError> {
        if self.name_fails {
            return Err(ObserverError::ItemName("unresolvable trade stack".to_string()));
        }
        Ok(self.trade_stack_name.clone())
    }
}

/// A scripted trader (or, with `is_trader = false`, any other entity).
#[derive(Debug, Clone)]
pub struct FakeTrader {
    pub id: TraderId,
    pub is_trader: bool,
    pub name_tag: Option<String>,
    pub trader_tag: Option<String>,
    pub code: String,
    pub position: Position,
    pub funds: u32,
    pub refresh_remaining: f64,
    pub inventory: Option<Vec<FakeSlot>>,
}

impl FakeTrader {
    pub fn new(id: i64, code: &str, position: Position) -> Self {
        Self {
            id: TraderId(id),
            is_trader: true,
            name_tag: None,
            trader_tag: None,
            code: code.to_string(),
            position,
            funds: 0,
            refresh_remaining: 0.0,
            inventory: None,
        }
    }

    /// A non-trader entity, e.g. a wolf wandering past.
    pub fn bystander(id: i64, code: &str, position: Position) -> Self {
        Self {
            is_trader: false,
            ..Self::new(id, code, position)
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name_tag = Some(name.to_string());
        self
    }

    pub fn tagged(mut self, tag: &str) -> Self {
        self.trader_tag = Some(tag.to_string());
        self
    }

    pub fn with_funds(mut self, funds: u32) -> Self {
        self.funds = funds;
        self
    }

    pub fn with_refresh_in(mut self, days: f64) -> Self {
        self.refresh_remaining = days;
        self
    }

    pub fn with_inventory(mut self, slots: Vec<FakeSlot>) -> Self {
        self.inventory = Some(slots);
        self
    }
}

impl TraderEntity for FakeTrader {
    type Slot = FakeSlot;

    fn entity_id(&self) -> TraderId {
        self.id
    }

    fn is_trader(&self) -> bool {
        self.is_trader
    }

    fn name_tag(&self) -> Option<String> {
        self.name_tag.clone()
    }

    fn trader_tag(&self) -> Option<String> {
        self.trader_tag.clone()
    }

    fn code_path(&self) -> &str {
        &self.code
    }

    fn position(&self) -> Position {
        self.position
    }

    fn funds(&self) -> u32 {
        self.funds
    }

    fn refresh_remaining(&self) -> f64 {
        self.refresh_remaining
    }

    fn inventory(&self) -> Option<&[FakeSlot]> {
        self.inventory.as_deref()
    }
}

/// A scripted world with a single player.
#[derive(Debug, Clone, Default)]
pub struct FakeWorld {
    pub time: f64,
    pub player: Option<Position>,
    pub entities: Vec<FakeTrader>,
    /// Slots of the open trade dialog; `None` when no dialog is open.
    pub open_inventory: Option<Vec<FakeSlot>>,
    pub map_ready: bool,
    pub overlay_registrations: usize,
}

impl FakeWorld {
    pub fn with_player(position: Position) -> Self {
        Self {
            player: Some(position),
            map_ready: true,
            ..Self::default()
        }
    }

    pub fn spawn(&mut self, entity: FakeTrader) {
        self.entities.push(entity);
    }

    pub fn entity_mut(&mut self, id: i64) -> Option<&mut FakeTrader> {
        self.entities.iter_mut().find(|e| e.id == TraderId(id))
    }

    pub fn despawn(&mut self, id: i64) {
        self.entities.retain(|e| e.id != TraderId(id));
    }

    /// Open the trade dialog showing the given trader's current inventory.
    pub fn open_trade_with(&mut self, id: i64) {
        self.open_inventory = self
            .entities
            .iter()
            .find(|e| e.id == TraderId(id))
            .and_then(|e| e.inventory.clone());
    }

    pub fn close_trade(&mut self) {
        self.open_inventory = None;
    }
}

impl WorldHost for FakeWorld {
    type Entity = FakeTrader;

    fn world_time(&self) -> f64 {
        self.time
    }

    fn player_position(&self) -> Option<Position> {
        self.player
    }

    fn loaded_entities(&self) -> Vec<&FakeTrader> {
        self.entities.iter().collect()
    }

    fn nearest_entity(
        &self,
        origin: Position,
        radius: f64,
        predicate: &dyn Fn(&FakeTrader) -> bool,
    ) -> Option<&FakeTrader> {
        self.entities
            .iter()
            .filter(|e| predicate(*e))
            .map(|e| (e.position.distance_to(&origin), e))
            .filter(|(distance, _)| *distance <= radius)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, e)| e)
    }

    fn open_trade_inventory(&self) -> Option<&[FakeSlot]> {
        self.open_inventory.as_deref()
    }

    fn try_register_overlay(&mut self) -> bool {
        if !self.map_ready {
            return false;
        }
        self.overlay_registrations += 1;
        true
    }
}
