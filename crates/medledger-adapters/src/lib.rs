pub mod catalog;
pub mod clock;
pub mod config;
pub mod eip1193;

pub use catalog::{CatalogDocument, InMemoryCatalog};
pub use clock::SystemClockAdapter;
pub use config::{AdapterConfig, ConfigError, RuntimeProfile};
pub use eip1193::Eip1193Adapter;
