//! Shared application context: wallet session, notification queue and the
//! placeholder marketplace actions that sit on top of them.
//!
//! Every failure is converted into a queued error notification at the point
//! it happens; callers only ever see `bool`/`Option` outcomes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use alloy::primitives::Address;
use tracing::{debug, error, info, warn};

use crate::domain::{
    AppNotification, InventoryItem, LiquidityPool, NotificationId, NotificationKind, Order,
    ProductListing, ProviderEvent, ProviderEventKind, TimestampMs,
};
use crate::error::{ActionError, MarketAction};
use crate::notifications::NotificationQueue;
use crate::ports::{CatalogPort, ClockPort, ProviderPort};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    pub notification_ttl_ms: u64,
    pub listing_delay_ms: u64,
    pub purchase_delay_ms: u64,
    pub pool_delay_ms: u64,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            notification_ttl_ms: 5_000,
            listing_delay_ms: 2_000,
            purchase_delay_ms: 3_000,
            pool_delay_ms: 0,
        }
    }
}

impl ContextConfig {
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    /// Simulated confirmation time for a placeholder action.
    pub fn delay_for(&self, action: MarketAction) -> Duration {
        let ms = match action {
            MarketAction::CreateListing => self.listing_delay_ms,
            MarketAction::Purchase => self.purchase_delay_ms,
            MarketAction::CreateLiquidityPool | MarketAction::Stake | MarketAction::Unstake => {
                self.pool_delay_ms
            }
            MarketAction::SyncInventory | MarketAction::UpdateInventory => 0,
        };
        Duration::from_millis(ms)
    }
}

#[derive(Debug, Default)]
struct ContextState {
    session: Session,
    notifications: NotificationQueue,
    // Bumped by `reset`; actions started under an older generation are dropped.
    generation: u64,
}

pub struct MarketplaceContext<P, K, C>
where
    P: ProviderPort,
    K: CatalogPort,
    C: ClockPort,
{
    pub provider: P,
    pub catalog: K,
    pub clock: C,
    config: ContextConfig,
    state: Arc<Mutex<ContextState>>,
}

impl<P, K, C> MarketplaceContext<P, K, C>
where
    P: ProviderPort,
    K: CatalogPort,
    C: ClockPort,
{
    pub fn new(provider: P, catalog: K, clock: C) -> Self {
        Self::with_config(provider, catalog, clock, ContextConfig::default())
    }

    pub fn with_config(provider: P, catalog: K, clock: C, config: ContextConfig) -> Self {
        Self {
            provider,
            catalog,
            clock,
            config,
            state: Arc::new(Mutex::new(ContextState::default())),
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    // State is plain data, so a panic mid-update cannot leave it unusable.
    fn state(&self) -> MutexGuard<'_, ContextState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn now(&self) -> TimestampMs {
        match self.clock.now_ms() {
            Ok(ms) => TimestampMs(ms),
            Err(e) => {
                warn!(error = %e, "clock unavailable; stamping notification with 0");
                TimestampMs(0)
            }
        }
    }

    pub fn session(&self) -> Session {
        self.state().session.clone()
    }

    pub fn address(&self) -> Option<Address> {
        self.state().session.address
    }

    pub fn is_loading(&self) -> bool {
        self.state().session.loading
    }

    pub fn set_loading(&self, loading: bool) {
        self.state().session.loading = loading;
    }

    pub fn notifications(&self) -> Vec<AppNotification> {
        self.state().notifications.snapshot()
    }

    /// Queues a notification and schedules its removal after the configured TTL.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let now = self.now();
        let id = self.state().notifications.push(message, kind, now);
        self.schedule_expiry(id);
        id
    }

    /// Idempotent; returns false if the notification had already expired.
    pub fn dismiss_notification(&self, id: NotificationId) -> bool {
        self.state().notifications.remove(id)
    }

    fn schedule_expiry(&self, id: NotificationId) {
        let ttl = self.config.notification_ttl();
        let state = Arc::downgrade(&self.state);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(ttl).await;
                    expire_notification(&state, id);
                });
            }
            Err(_) => {
                warn!(%id, "no async runtime; notification persists until dismissed");
            }
        }
    }

    fn report(&self, err: ActionError) {
        error!(error = %err, "marketplace action failed");
        self.notify(err.notice(), NotificationKind::Error);
    }

    pub async fn connect_wallet(&self) -> Option<Address> {
        match self.try_connect().await {
            Ok(address) => {
                info!(%address, "wallet connected");
                self.notify("Wallet connected successfully!", NotificationKind::Success);
                Some(address)
            }
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    async fn try_connect(&self) -> Result<Address, ActionError> {
        if !self.provider.is_available() {
            return Err(ActionError::NoProvider);
        }

        self.set_loading(true);
        let handshake = self.handshake().await;
        self.set_loading(false);

        let (address, chain_id) = handshake?;
        self.state().session.establish(address, chain_id);
        Ok(address)
    }

    async fn handshake(&self) -> Result<(Address, u64), ActionError> {
        let accounts = self
            .provider
            .request_accounts()
            .await
            .map_err(|e| ActionError::Handshake(e.to_string()))?;
        let address = accounts
            .first()
            .copied()
            .ok_or_else(|| ActionError::Handshake("provider returned no accounts".to_owned()))?;
        let chain_id = self
            .provider
            .chain_id()
            .await
            .map_err(|e| ActionError::Handshake(e.to_string()))?;
        Ok((address, chain_id))
    }

    pub fn disconnect_wallet(&self) {
        self.state().session.clear();
        info!("wallet disconnected");
        self.notify("Wallet disconnected.", NotificationKind::Info);
    }

    /// Drops the session and every queued notification, as a page reload would.
    pub fn reset(&self) {
        let mut state = self.state();
        state.session = Session::default();
        state.notifications.clear();
        state.generation = state.generation.wrapping_add(1);
    }

    fn require_session(&self, action: MarketAction) -> Result<(), ActionError> {
        let state = self.state();
        let ok = if action.requires_signer() {
            state.session.is_connected()
        } else {
            state.session.has_address()
        };
        if ok {
            Ok(())
        } else {
            Err(ActionError::NotConnected { action })
        }
    }

    async fn run_placeholder(&self, action: MarketAction, detail: String) -> bool {
        if action.requires_session() {
            if let Err(err) = self.require_session(action) {
                self.report(err);
                return false;
            }
        }

        info!(%action, %detail, "simulating marketplace action");
        let generation = {
            let mut state = self.state();
            if action.tracks_loading() {
                state.session.loading = true;
            }
            state.generation
        };
        let delay = self.config.delay_for(action);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.state().generation != generation {
            warn!(%action, "context reset while action was pending; result dropped");
            return false;
        }
        self.notify(action.success_message(), NotificationKind::Success);
        if action.tracks_loading() {
            self.set_loading(false);
        }
        true
    }

    pub async fn create_product_listing(&self, listing: &ProductListing) -> bool {
        let detail = format!("listing {} ({})", listing.id, listing.name);
        self.run_placeholder(MarketAction::CreateListing, detail)
            .await
    }

    pub async fn purchase_product(&self, product_id: &str, quantity: u64) -> bool {
        let detail = format!("product {product_id} x{quantity}");
        self.run_placeholder(MarketAction::Purchase, detail).await
    }

    pub async fn sync_inventory_to_marketplace(&self, item: &InventoryItem) -> bool {
        let detail = format!("inventory {} stock {}", item.id, item.stock);
        self.run_placeholder(MarketAction::SyncInventory, detail)
            .await
    }

    pub async fn create_liquidity_pool(&self, region_name: &str) -> bool {
        let detail = format!("region {region_name}");
        self.run_placeholder(MarketAction::CreateLiquidityPool, detail)
            .await
    }

    pub async fn stake_in_pool(&self, amount: &str) -> bool {
        let detail = format!("amount {amount}");
        self.run_placeholder(MarketAction::Stake, detail).await
    }

    pub async fn unstake_from_pool(&self, lp_amount: &str) -> bool {
        let detail = format!("lp amount {lp_amount}");
        self.run_placeholder(MarketAction::Unstake, detail).await
    }

    /// Looks the listing up so a future ledger read has somewhere to land.
    /// Needs no session.
    pub fn update_inventory_from_chain(&self, product_id: &str) -> bool {
        match self.catalog.listing(product_id) {
            Ok(Some(listing)) => {
                info!(
                    product_id,
                    inventory_level = listing.inventory_level,
                    "updating inventory from chain"
                );
                true
            }
            Ok(None) => {
                warn!(product_id, "no listing for inventory update");
                false
            }
            Err(e) => {
                self.report(ActionError::Failed {
                    action: MarketAction::UpdateInventory,
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    pub fn get_product_listings(&self) -> Vec<ProductListing> {
        self.catalog.listings().unwrap_or_else(|e| {
            error!(error = %e, "fetching product listings failed");
            Vec::new()
        })
    }

    pub fn get_user_orders(&self, buyer: Address) -> Vec<Order> {
        match self.catalog.orders() {
            Ok(orders) => orders
                .into_iter()
                .filter(|o| o.buyer_address == buyer)
                .collect(),
            Err(e) => {
                error!(error = %e, %buyer, "fetching user orders failed");
                Vec::new()
            }
        }
    }

    pub fn get_liquidity_pools(&self) -> Vec<LiquidityPool> {
        self.catalog.liquidity_pools().unwrap_or_else(|e| {
            error!(error = %e, "fetching liquidity pools failed");
            Vec::new()
        })
    }

    /// Refreshes the provider snapshot, then applies whatever changed.
    pub async fn sync_provider(&self) -> usize {
        if let Err(e) = self.provider.refresh().await {
            warn!(error = %e, "provider refresh failed");
        }
        self.apply_provider_events()
    }

    /// Applies every account/chain change the provider has observed since the
    /// last call. Returns how many events were drained.
    pub fn apply_provider_events(&self) -> usize {
        let events = match self.provider.drain_events() {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, "draining provider events failed");
                return 0;
            }
        };
        let count = events.len();
        for event in events {
            self.apply_provider_event(event);
        }
        count
    }

    fn apply_provider_event(&self, event: ProviderEvent) {
        match event.kind {
            ProviderEventKind::AccountsChanged(accounts) => {
                if accounts.is_empty() {
                    self.disconnect_wallet();
                    return;
                }
                let mut state = self.state();
                if !state.session.has_address() {
                    debug!(
                        sequence = event.sequence,
                        "ignoring accountsChanged without a session"
                    );
                    return;
                }
                let change = state.session.apply_accounts(&accounts);
                drop(state);
                debug!(sequence = event.sequence, ?change, "accounts changed");
            }
            ProviderEventKind::ChainChanged(chain_id) => {
                if self.state().session.chain_id == Some(chain_id) {
                    return;
                }
                info!(sequence = event.sequence, chain_id, "chain changed; resetting context");
                self.reset();
            }
        }
    }
}

fn expire_notification(state: &Weak<Mutex<ContextState>>, id: NotificationId) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let removed = state
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .notifications
        .remove(id);
    debug!(%id, removed, "notification expired");
}
