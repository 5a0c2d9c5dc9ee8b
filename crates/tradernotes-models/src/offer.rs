use serde::{Deserialize, Serialize};

/// Inventory slots below this index hold what the trader sells;
/// everything from this index on is what the trader wants to buy.
pub const SELL_SLOT_COUNT: usize = 16;

/// One line of a trader's sell or want list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TradeOffer {
    /// Resolved display name. May come from a wrapped trade stack rather than the raw item.
    pub name: String,
    /// Trades currently available. Forced to 0 when `sold_out` is set.
    pub stock: u32,
    /// Pack size represented by one trade unit.
    pub unit_stack_size: u32,
    pub price: u32,
    pub sold_out: bool,
}

/// Both sides of a single inventory scan, in slot order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OfferSnapshot {
    pub sells: Vec<TradeOffer>,
    pub wants: Vec<TradeOffer>,
}

impl OfferSnapshot {
    /// Append an offer to the side its originating slot belongs to.
    pub fn push(&mut self, slot_index: usize, offer: TradeOffer) {
        if slot_index < SELL_SLOT_COUNT {
            self.sells.push(offer);
        } else {
            self.wants.push(offer);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sells.is_empty() && self.wants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(name: &str) -> TradeOffer {
        TradeOffer {
            name: name.to_string(),
            stock: 1,
            unit_stack_size: 1,
            price: 2,
            sold_out: false,
        }
    }

    #[test]
    fn push_splits_at_sell_boundary() {
        let mut snapshot = OfferSnapshot::default();
        snapshot.push(0, offer("first"));
        snapshot.push(15, offer("last sell"));
        snapshot.push(16, offer("first want"));
        snapshot.push(40, offer("late want"));

        assert_eq!(snapshot.sells.len(), 2);
        assert_eq!(snapshot.sells[1].name, "last sell");
        assert_eq!(snapshot.wants.len(), 2);
        assert_eq!(snapshot.wants[0].name, "first want");
    }

    #[test]
    fn empty_snapshot() {
        assert!(OfferSnapshot::default().is_empty());
        let mut snapshot = OfferSnapshot::default();
        snapshot.push(20, offer("want"));
        assert!(!snapshot.is_empty());
    }
}
