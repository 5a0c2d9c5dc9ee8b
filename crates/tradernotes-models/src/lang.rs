//! Localized strings. The host supplies real translations through [`Localizer`];
//! [`BuiltinLang`] carries the English defaults.

pub mod keys {
    pub const LAYER_TITLE: &str = "tradernotes:layer-title";
    pub const TRADER_DEFAULT_NAME: &str = "tradernotes:trader-defaultname";
    pub const ITEM_UNKNOWN: &str = "tradernotes:item-unknown";
    pub const SOLD_OUT: &str = "tradernotes:soldout";
    pub const MONEY_LABEL: &str = "tradernotes:money-label";
    pub const OFFERS_LABEL: &str = "tradernotes:offers-label";
    pub const WANTS_LABEL: &str = "tradernotes:wants-label";
    pub const DISTANCE_LABEL: &str = "tradernotes:distance-label";
    pub const REFRESH_IN: &str = "tradernotes:refresh-in";
    pub const OUTDATED: &str = "tradernotes:outdated";
    pub const OUT_OF_RANGE: &str = "tradernotes:out-of-range";
}

/// Translation lookup. `{0}` in a translated string is the first argument.
pub trait Localizer {
    fn get(&self, key: &str) -> String;

    fn get_with(&self, key: &str, arg: &str) -> String {
        self.get(key).replace("{0}", arg)
    }
}

/// English strings shipped with the mod. Unknown keys come back unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLang;

impl Localizer for BuiltinLang {
    fn get(&self, key: &str) -> String {
        let text = match key {
            keys::LAYER_TITLE => "Traders",
            keys::TRADER_DEFAULT_NAME => "Trader",
            keys::ITEM_UNKNOWN => "Unknown item",
            keys::SOLD_OUT => "Sold out",
            keys::MONEY_LABEL => "Funds:",
            keys::OFFERS_LABEL => "Selling:",
            keys::WANTS_LABEL => "Buying:",
            keys::DISTANCE_LABEL => "Distance:",
            keys::REFRESH_IN => "Refresh in {0} days",
            keys::OUTDATED => "Outdated",
            keys::OUT_OF_RANGE => "Trader out of range, cannot live-update.",
            "tradernotes:type-furniture" => "Furniture",
            "tradernotes:type-clothing" => "Clothing",
            "tradernotes:type-general" => "Commodities",
            "tradernotes:type-artisan" => "Artisan",
            "tradernotes:type-agriculture" => "Agriculture",
            "tradernotes:type-survival" => "Survival goods",
            "tradernotes:type-building" => "Building materials",
            "tradernotes:type-luxuries" => "Luxuries",
            "tradernotes:type-treasure" => "Treasure hunter",
            "tradernotes:type-unknown" => "Unknown",
            other => other,
        };
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::TraderKind;

    #[test]
    fn builtin_covers_every_trader_kind() {
        let kinds = [
            TraderKind::Furniture,
            TraderKind::Clothing,
            TraderKind::General,
            TraderKind::Artisan,
            TraderKind::Agriculture,
            TraderKind::Survival,
            TraderKind::Building,
            TraderKind::Luxuries,
            TraderKind::Treasure,
            TraderKind::Unknown,
        ];
        for kind in kinds {
            let key = kind.lang_key();
            assert_ne!(BuiltinLang.get(&key), key);
        }
    }

    #[test]
    fn unknown_key_passes_through() {
        assert_eq!(BuiltinLang.get("tradernotes:nope"), "tradernotes:nope");
    }

    #[test]
    fn get_with_substitutes_argument() {
        assert_eq!(
            BuiltinLang.get_with(keys::REFRESH_IN, "2.5"),
            "Refresh in 2.5 days"
        );
    }
}
