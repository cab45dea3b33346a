#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use alloy::primitives::{Address, B256};
use async_trait::async_trait;

use medledger_core::{
    CatalogPort, ClockPort, ContextConfig, InventoryItem, LiquidityPool, MarketplaceContext,
    Order, OrderStatus, PortError, ProductListing, ProviderEvent, ProviderEventKind, ProviderPort,
    StockStatus, TimestampMs,
};

#[derive(Debug, Default)]
pub struct TestClock {
    now: AtomicU64,
}

impl ClockPort for TestClock {
    fn now_ms(&self) -> Result<u64, PortError> {
        Ok(self.now.fetch_add(1, Ordering::SeqCst) + 1_739_750_400_000)
    }
}

#[derive(Debug)]
struct StubState {
    accounts: Vec<Address>,
    chain_id: u64,
    fail_handshake: Option<String>,
    handshake_delay: Duration,
    event_seq: u64,
    events: Vec<ProviderEvent>,
    handshakes: u64,
}

/// Scriptable provider: availability, handshake outcome and event log are set by the test.
#[derive(Debug)]
pub struct StubProvider {
    available: bool,
    state: Mutex<StubState>,
}

impl StubProvider {
    pub fn with_account(account: Address) -> Self {
        Self {
            available: true,
            state: Mutex::new(StubState {
                accounts: vec![account],
                chain_id: 1,
                fail_handshake: None,
                handshake_delay: Duration::ZERO,
                event_seq: 0,
                events: Vec::new(),
                handshakes: 0,
            }),
        }
    }

    pub fn missing() -> Self {
        Self {
            available: false,
            ..Self::with_account(owner_address())
        }
    }

    pub fn failing(reason: &str) -> Self {
        let provider = Self::with_account(owner_address());
        provider.state.lock().expect("stub lock").fail_handshake = Some(reason.to_owned());
        provider
    }

    pub fn with_accounts(accounts: Vec<Address>) -> Self {
        let provider = Self::with_account(owner_address());
        provider.state.lock().expect("stub lock").accounts = accounts;
        provider
    }

    /// Wallet that takes `delay` to answer `eth_requestAccounts`.
    pub fn slow(account: Address, delay: Duration) -> Self {
        let provider = Self::with_account(account);
        provider.state.lock().expect("stub lock").handshake_delay = delay;
        provider
    }

    pub fn handshakes(&self) -> u64 {
        self.state.lock().expect("stub lock").handshakes
    }

    pub fn emit(&self, kind: ProviderEventKind) {
        let mut g = self.state.lock().expect("stub lock");
        g.event_seq += 1;
        let sequence = g.event_seq;
        g.events.push(ProviderEvent { sequence, kind });
    }
}

#[async_trait]
impl ProviderPort for StubProvider {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, PortError> {
        let delay = self.state.lock().expect("stub lock").handshake_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let mut g = self.state.lock().expect("stub lock");
        g.handshakes += 1;
        if let Some(reason) = &g.fail_handshake {
            return Err(PortError::Transport(reason.clone()));
        }
        Ok(g.accounts.clone())
    }

    async fn chain_id(&self) -> Result<u64, PortError> {
        Ok(self.state.lock().expect("stub lock").chain_id)
    }

    fn drain_events(&self) -> Result<Vec<ProviderEvent>, PortError> {
        Ok(std::mem::take(
            &mut self.state.lock().expect("stub lock").events,
        ))
    }
}

#[derive(Debug, Default)]
pub struct StaticCatalog {
    pub listings: Vec<ProductListing>,
    pub orders: Vec<Order>,
    pub pools: Vec<LiquidityPool>,
    pub broken: bool,
}

impl StaticCatalog {
    fn check(&self) -> Result<(), PortError> {
        if self.broken {
            return Err(PortError::Transport("catalog offline".to_owned()));
        }
        Ok(())
    }
}

impl CatalogPort for StaticCatalog {
    fn listings(&self) -> Result<Vec<ProductListing>, PortError> {
        self.check()?;
        Ok(self.listings.clone())
    }

    fn listing(&self, product_id: &str) -> Result<Option<ProductListing>, PortError> {
        self.check()?;
        Ok(self.listings.iter().find(|l| l.id == product_id).cloned())
    }

    fn orders(&self) -> Result<Vec<Order>, PortError> {
        self.check()?;
        Ok(self.orders.clone())
    }

    fn liquidity_pools(&self) -> Result<Vec<LiquidityPool>, PortError> {
        self.check()?;
        Ok(self.pools.clone())
    }
}

pub type TestContext = MarketplaceContext<StubProvider, StaticCatalog, TestClock>;

pub fn new_context(provider: StubProvider) -> TestContext {
    MarketplaceContext::new(provider, StaticCatalog::default(), TestClock::default())
}

pub fn context_with_catalog(provider: StubProvider, catalog: StaticCatalog) -> TestContext {
    MarketplaceContext::with_config(
        provider,
        catalog,
        TestClock::default(),
        ContextConfig::default(),
    )
}

pub fn owner_address() -> Address {
    "0x1000000000000000000000000000000000000001"
        .parse()
        .expect("valid owner address")
}

pub fn other_address() -> Address {
    "0x2000000000000000000000000000000000000002"
        .parse()
        .expect("valid other address")
}

pub fn listing(id: &str, name: &str, description: &str, category: &str) -> ProductListing {
    ProductListing {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        price: 45.99,
        supplier: "PharmaCorp".to_owned(),
        category: category.to_owned(),
        image_url: "https://via.placeholder.com/150".to_owned(),
        blockchain_verified: true,
        inventory_level: 150,
        contract_address: "0x1234567890123456789012345678901234567890"
            .parse()
            .expect("valid contract address"),
    }
}

pub fn inventory_item(id: &str, name: &str, category: &str, stock: u64) -> InventoryItem {
    InventoryItem {
        id: id.to_owned(),
        name: name.to_owned(),
        description: String::new(),
        category: category.to_owned(),
        stock,
        threshold: 50,
        expiry: "2025-06-20".to_owned(),
        supplier: "MedSupply Co".to_owned(),
        status: if stock > 50 {
            StockStatus::Good
        } else {
            StockStatus::Low
        },
        price: None,
        blockchain_verified: None,
    }
}

pub fn order(id: &str, buyer: Address) -> Order {
    Order {
        id: id.to_owned(),
        product_id: "1".to_owned(),
        buyer_address: buyer,
        seller_address: other_address(),
        quantity: 10,
        total_price: 459.90,
        status: OrderStatus::Confirmed,
        transaction_hash: B256::repeat_byte(0xab),
        created_at_ms: TimestampMs(1),
    }
}
