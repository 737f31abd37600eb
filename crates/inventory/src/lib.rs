//! Inventory domain module.
//!
//! This crate owns the surplus listings of the viewing hospital and the
//! read-only marketplace of other hospitals' listings. Everything is held in
//! memory; there is no IO beyond publishing change notifications.

pub mod events;
pub mod hospital;
pub mod item;
pub mod marketplace;
pub mod seed;
pub mod stats;
pub mod store;
pub mod swap;

pub use events::{InventoryEvent, ItemAdded, ItemRemoved, StatusChanged, SwapRequested};
pub use hospital::Hospital;
pub use item::{Category, Condition, InventoryItem, ItemDraft, ItemStatus};
pub use marketplace::{MarketplaceListing, MarketplaceQuery, MarketplaceSort};
pub use stats::{DEFAULT_EXPIRY_WINDOW_DAYS, DashboardStats, ExpiryStatus};
pub use store::{Catalog, InventorySnapshot, InventoryStore};
pub use swap::{SwapRequest, SwapStatus, swap_notification};
