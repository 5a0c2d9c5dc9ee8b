pub mod config;
pub mod error;
pub mod host;
pub mod scheduler;
pub mod snapshot;

pub mod test_support;

pub use error::ObserverError;
pub use host::{AttributeTree, InventorySlot, TradeItem, TraderEntity, WorldHost};
pub use scheduler::{ObservationScheduler, TickReport};
pub use snapshot::{OfferSnapshotBuilder, OfferSource};
