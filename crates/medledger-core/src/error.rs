use std::fmt;

use thiserror::Error;

/// Placeholder marketplace operations. None of them touch a real ledger yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketAction {
    CreateListing,
    Purchase,
    SyncInventory,
    UpdateInventory,
    CreateLiquidityPool,
    Stake,
    Unstake,
}

impl MarketAction {
    /// Whether the action needs a signer, not just an address.
    pub fn requires_signer(self) -> bool {
        !matches!(self, Self::SyncInventory | Self::UpdateInventory)
    }

    pub fn requires_session(self) -> bool {
        !matches!(self, Self::UpdateInventory)
    }

    pub fn tracks_loading(self) -> bool {
        !matches!(self, Self::SyncInventory | Self::UpdateInventory)
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Self::CreateListing => "Product listed successfully on blockchain!",
            Self::Purchase => "Purchase completed successfully!",
            Self::SyncInventory => "Inventory synced to marketplace successfully!",
            Self::UpdateInventory => "Inventory updated from blockchain.",
            Self::CreateLiquidityPool => "Liquidity pool created successfully!",
            Self::Stake => "Successfully staked in pool!",
            Self::Unstake => "Successfully unstaked from pool!",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::CreateListing => "Failed to create product listing.",
            Self::Purchase => "Failed to complete purchase.",
            Self::SyncInventory => "Failed to sync inventory to marketplace.",
            Self::UpdateInventory => "Failed to update inventory from blockchain.",
            Self::CreateLiquidityPool => "Failed to create liquidity pool.",
            Self::Stake => "Failed to stake in pool.",
            Self::Unstake => "Failed to unstake from pool.",
        }
    }

    fn not_connected_message(self) -> &'static str {
        match self {
            Self::SyncInventory => "Please connect your wallet to sync inventory.",
            _ => "Please connect your wallet first.",
        }
    }
}

impl fmt::Display for MarketAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateListing => "create_listing",
            Self::Purchase => "purchase",
            Self::SyncInventory => "sync_inventory",
            Self::UpdateInventory => "update_inventory",
            Self::CreateLiquidityPool => "create_liquidity_pool",
            Self::Stake => "stake",
            Self::Unstake => "unstake",
        };
        f.write_str(name)
    }
}

/// Every failure the context can hit. Each one becomes exactly one error
/// notification and is never returned to callers.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("no wallet provider available")]
    NoProvider,
    #[error("wallet handshake failed: {0}")]
    Handshake(String),
    #[error("{action} requires a connected wallet")]
    NotConnected { action: MarketAction },
    #[error("{action} failed: {reason}")]
    Failed {
        action: MarketAction,
        reason: String,
    },
}

impl ActionError {
    /// User-facing text queued for this error.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::NoProvider => {
                "Wallet provider is not installed. Please install MetaMask to use the marketplace."
            }
            Self::Handshake(_) => "Failed to connect wallet. Please try again.",
            Self::NotConnected { action } => action.not_connected_message(),
            Self::Failed { action, .. } => action.failure_message(),
        }
    }
}
