use tradernotes_models::lang::keys;
use tradernotes_models::{BuiltinLang, Localizer, OfferSnapshot, TradeOffer};

use crate::host::{AttributeTree, InventorySlot, TradeItem};

/// Code fragment of the worn gear placeholder traders keep in their inventory.
pub const WORN_TOKEN_CODE: &str = "gear-rusty";

/// Attribute groups that may carry trade properties, in lookup order.
pub const TRADE_ATTRIBUTE_GROUPS: [&str; 2] = ["tradeprops", "trade"];

/// Attribute keys read as stock, in priority order.
const STOCK_KEYS: [&str; 3] = ["stock", "supply", "demand"];

/// Where a slot's stock and price come from.
#[derive(Debug, Clone, PartialEq)]
pub enum OfferSource<'a> {
    /// A dedicated trade slot with structured offer data.
    TradeItem(TradeItem),
    /// Trade properties stored in the item's attribute tree.
    Attributes(&'a AttributeTree),
    /// No trade metadata: the raw stack is the offer.
    RawStack { stack_size: u32 },
}

impl<'a> OfferSource<'a> {
    /// Pick the richest source the slot offers.
    pub fn detect<S: InventorySlot>(slot: &'a S) -> Self {
        if let Some(item) = slot.trade_item() {
            return OfferSource::TradeItem(item);
        }
        if let Some(tree) = TRADE_ATTRIBUTE_GROUPS
            .iter()
            .find_map(|group| slot.attribute_group(group))
        {
            return OfferSource::Attributes(tree);
        }
        OfferSource::RawStack {
            stack_size: slot.stack_size(),
        }
    }

    /// `(stock, price)` as reported by this source.
    pub fn stock_and_price(&self) -> (u32, u32) {
        match self {
            OfferSource::TradeItem(item) => (item.stock, item.price),
            OfferSource::Attributes(tree) => {
                let stock = STOCK_KEYS
                    .iter()
                    .find(|key| tree.has(key))
                    .and_then(|key| tree.get_int(key))
                    .map(non_negative)
                    .unwrap_or(0);
                let price = tree.get_int("price").map(non_negative).unwrap_or(0);
                (stock, price)
            }
            OfferSource::RawStack { stack_size } => (*stack_size, 0),
        }
    }
}

fn non_negative(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Turns a trader inventory into sell and want lists.
#[derive(Debug, Clone)]
pub struct OfferSnapshotBuilder {
    unknown_item_name: String,
}

impl Default for OfferSnapshotBuilder {
    fn default() -> Self {
        Self::with_localizer(&BuiltinLang)
    }
}

impl OfferSnapshotBuilder {
    pub fn new(unknown_item_name: impl Into<String>) -> Self {
        Self {
            unknown_item_name: unknown_item_name.into(),
        }
    }

    pub fn with_localizer(lang: &dyn Localizer) -> Self {
        Self::new(lang.get(keys::ITEM_UNKNOWN))
    }

    /// Scan `slots` in order. The first 16 slots are sells, the rest wants.
    pub fn build<S: InventorySlot>(&self, slots: &[S]) -> OfferSnapshot {
        let mut snapshot = OfferSnapshot::default();
        for (index, slot) in slots.iter().enumerate() {
            if let Some(offer) = self.offer_for(slot) {
                snapshot.push(index, offer);
            }
        }
        snapshot
    }

    /// The offer a single slot represents, or `None` for empty and placeholder slots.
    pub fn offer_for<S: InventorySlot>(&self, slot: &S) -> Option<TradeOffer> {
        if slot.is_empty() || slot.item_code().contains(WORN_TOKEN_CODE) {
            return None;
        }

        let sold_out = slot.draw_unavailable();
        let (stock, price) = OfferSource::detect(slot).stock_and_price();

        Some(TradeOffer {
            name: self.resolve_name(slot),
            stock: if sold_out { 0 } else { stock },
            unit_stack_size: slot.stack_size(),
            price,
            sold_out,
        })
    }

    fn resolve_name<S: InventorySlot>(&self, slot: &S) -> String {
        let resolved = slot.trade_stack_name().and_then(|wrapped| match wrapped {
            Some(name) => Ok(name),
            None => slot.item_name(),
        });
        match resolved {
            Ok(name) => name,
            Err(e) => {
                tracing::debug!(code = slot.item_code(), error = %e, "Using placeholder item name");
                self.unknown_item_name.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeSlot;

    fn builder() -> OfferSnapshotBuilder {
        OfferSnapshotBuilder::default()
    }

    #[test]
    fn twenty_slots_split_sixteen_and_four() {
        let slots: Vec<FakeSlot> = (0..20)
            .map(|i| FakeSlot::item(&format!("item-{i}"), &format!("Item {i}"), 1))
            .collect();

        let snapshot = builder().build(&slots);
        assert_eq!(snapshot.sells.len(), 16);
        assert_eq!(snapshot.wants.len(), 4);
        assert_eq!(snapshot.sells[0].name, "Item 0");
        assert_eq!(snapshot.sells[15].name, "Item 15");
        let want_names: Vec<&str> = snapshot.wants.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(want_names, vec!["Item 16", "Item 17", "Item 18", "Item 19"]);
    }

    #[test]
    fn partition_uses_slot_index_not_offer_count() {
        let mut slots = vec![FakeSlot::empty(); 16];
        slots[3] = FakeSlot::item("flax", "Flax", 1);
        slots.push(FakeSlot::item("bone", "Bone", 1));

        let snapshot = builder().build(&slots);
        assert_eq!(snapshot.sells.len(), 1);
        assert_eq!(snapshot.wants.len(), 1);
        assert_eq!(snapshot.wants[0].name, "Bone");
    }

    #[test]
    fn skips_empty_and_worn_token_slots() {
        let slots = vec![
            FakeSlot::empty(),
            FakeSlot::item("gear-rusty", "Rusty gear", 3),
            FakeSlot::item("linen", "Linen", 2),
        ];
        let snapshot = builder().build(&slots);
        assert_eq!(snapshot.sells.len(), 1);
        assert_eq!(snapshot.sells[0].name, "Linen");
    }

    #[test]
    fn trade_item_takes_priority() {
        let slot = FakeSlot::item("linen", "Linen", 8)
            .with_trade_item(3, 12)
            .with_attributes("tradeprops", AttributeTree::new().with("stock", 99).with("price", 99));
        let offer = builder().offer_for(&slot).unwrap();
        assert_eq!(offer.stock, 3);
        assert_eq!(offer.price, 12);
        assert_eq!(offer.unit_stack_size, 8);
    }

    #[test]
    fn attribute_stock_falls_back_to_supply_then_demand() {
        let stock = FakeSlot::item("a", "A", 1).with_attributes(
            "tradeprops",
            AttributeTree::new().with("stock", 4).with("supply", 5).with("demand", 6),
        );
        let supply = FakeSlot::item("a", "A", 1)
            .with_attributes("tradeprops", AttributeTree::new().with("supply", 5).with("demand", 6));
        let demand = FakeSlot::item("a", "A", 1)
            .with_attributes("trade", AttributeTree::new().with("demand", 6).with("price", 9));

        assert_eq!(builder().offer_for(&stock).unwrap().stock, 4);
        assert_eq!(builder().offer_for(&supply).unwrap().stock, 5);
        let offer = builder().offer_for(&demand).unwrap();
        assert_eq!(offer.stock, 6);
        assert_eq!(offer.price, 9);
    }

    #[test]
    fn tradeprops_group_is_preferred_over_trade() {
        let slot = FakeSlot::item("a", "A", 1)
            .with_attributes("trade", AttributeTree::new().with("stock", 1))
            .with_attributes("tradeprops", AttributeTree::new().with("stock", 2));
        assert_eq!(builder().offer_for(&slot).unwrap().stock, 2);
    }

    #[test]
    fn attribute_price_defaults_to_zero() {
        let slot = FakeSlot::item("a", "A", 1)
            .with_attributes("tradeprops", AttributeTree::new().with("stock", 2));
        assert_eq!(builder().offer_for(&slot).unwrap().price, 0);
    }

    #[test]
    fn negative_attribute_values_clamp_to_zero() {
        let slot = FakeSlot::item("a", "A", 1).with_attributes(
            "tradeprops",
            AttributeTree::new().with("stock", -3).with("price", -1),
        );
        let offer = builder().offer_for(&slot).unwrap();
        assert_eq!((offer.stock, offer.price), (0, 0));
    }

    #[test]
    fn no_metadata_uses_stack_size() {
        let slot = FakeSlot::item("bread", "Bread", 7);
        let offer = builder().offer_for(&slot).unwrap();
        assert_eq!(offer.stock, 7);
        assert_eq!(offer.price, 0);
        assert_eq!(offer.unit_stack_size, 7);
    }

    #[test]
    fn sold_out_forces_zero_stock() {
        let slot = FakeSlot::item("linen", "Linen", 8).with_trade_item(3, 12).sold_out();
        let offer = builder().offer_for(&slot).unwrap();
        assert!(offer.sold_out);
        assert_eq!(offer.stock, 0);
        assert_eq!(offer.price, 12);

        let raw = FakeSlot::item("bread", "Bread", 7).sold_out();
        assert_eq!(builder().offer_for(&raw).unwrap().stock, 0);
    }

    #[test]
    fn wrapped_trade_stack_name_wins() {
        let slot = FakeSlot::item("tradebundle", "Bundle", 1).with_trade_stack_name("Iron ingot");
        assert_eq!(builder().offer_for(&slot).unwrap().name, "Iron ingot");
    }

    #[test]
    fn name_failure_uses_placeholder() {
        let slot = FakeSlot::item("weird", "Weird", 2).with_broken_name();
        let snapshot = builder().build(&[slot, FakeSlot::item("ok", "Fine", 1)]);
        assert_eq!(snapshot.sells[0].name, "Unknown item");
        assert_eq!(snapshot.sells[1].name, "Fine");
    }

    #[test]
    fn placeholder_name_is_configurable() {
        let slot = FakeSlot::item("weird", "Weird", 2).with_broken_name();
        let offer = OfferSnapshotBuilder::new("???").offer_for(&slot).unwrap();
        assert_eq!(offer.name, "???");
    }
}
