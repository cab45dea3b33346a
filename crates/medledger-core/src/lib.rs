pub mod context;
pub mod domain;
pub mod error;
pub mod filter;
pub mod notifications;
pub mod ports;
pub mod session;

pub use context::{ContextConfig, MarketplaceContext};
pub use domain::{
    AppNotification, InventoryItem, LiquidityPool, NotificationId, NotificationKind, Order,
    OrderStatus, ProductListing, ProviderEvent, ProviderEventKind, SignerHandle, StockStatus,
    TimestampMs,
};
pub use error::{ActionError, MarketAction};
pub use filter::{categories, filter_items, CatalogQuery, CategoryFilter, Searchable};
pub use notifications::NotificationQueue;
pub use ports::{CatalogPort, ClockPort, PortError, ProviderPort};
pub use session::{AccountChange, Session};
