use alloy::primitives::Address;
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{LiquidityPool, Order, ProductListing, ProviderEvent};

#[derive(Debug, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("policy error: {0}")]
    Policy(String),
}

/// Wallet provider seam (EIP-1193 shaped).
#[async_trait]
pub trait ProviderPort: Send + Sync {
    /// False when no provider is injected/configured at all.
    fn is_available(&self) -> bool;
    async fn request_accounts(&self) -> Result<Vec<Address>, PortError>;
    async fn chain_id(&self) -> Result<u64, PortError>;
    /// Re-reads provider state so changes made outside the app are recorded
    /// as events. Push-based providers have nothing to do here.
    async fn refresh(&self) -> Result<(), PortError> {
        Ok(())
    }
    /// Takes every account/chain change recorded since the last drain, oldest first.
    fn drain_events(&self) -> Result<Vec<ProviderEvent>, PortError>;
}

pub trait CatalogPort: Send + Sync {
    fn listings(&self) -> Result<Vec<ProductListing>, PortError>;
    fn listing(&self, product_id: &str) -> Result<Option<ProductListing>, PortError>;
    fn orders(&self) -> Result<Vec<Order>, PortError>;
    fn liquidity_pools(&self) -> Result<Vec<LiquidityPool>, PortError>;
}

pub trait ClockPort: Send + Sync {
    fn now_ms(&self) -> Result<u64, PortError>;
}
