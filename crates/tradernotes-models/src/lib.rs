pub mod cache_schema;
pub mod classifier;
pub mod config;
pub mod lang;
pub mod offer;
pub mod trader;

pub use cache_schema::CacheFile;
pub use classifier::{classify, TraderKind};
pub use config::{ObserverConfig, OverlayConfig, TooltipColors, TraderNotesConfig};
pub use lang::{BuiltinLang, Localizer};
pub use offer::{OfferSnapshot, TradeOffer, SELL_SLOT_COUNT};
pub use trader::{Position, TraderId, TraderRecord};
