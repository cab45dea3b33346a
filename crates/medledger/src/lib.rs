//! MedLedger: the shared wallet/notification context behind the
//! medical-inventory marketplace dashboard.

pub mod bridge;
pub mod display;
pub mod telemetry;

pub use bridge::{DashboardBridge, DashboardContext, EventWatcher};
pub use medledger_adapters::{AdapterConfig, RuntimeProfile};
