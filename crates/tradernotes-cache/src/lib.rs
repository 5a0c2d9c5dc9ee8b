pub mod error;
pub mod registry;
pub mod session;
pub mod store;
pub mod updater;

pub use error::CacheError;
pub use registry::TraderRegistry;
pub use session::TraderCache;
pub use store::CacheStore;
pub use updater::{ChangeDetector, TraderObservation};
