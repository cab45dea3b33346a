use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use medledger_core::{CatalogPort, LiquidityPool, Order, PortError, ProductListing};

/// Seed document accepted by `InMemoryCatalog::from_json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub listings: Vec<ProductListing>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub pools: Vec<LiquidityPool>,
}

/// Process-local catalog. Nothing is persisted; it lives as long as the shell.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    doc: Arc<Mutex<CatalogDocument>>,
}

impl InMemoryCatalog {
    pub fn from_document(doc: CatalogDocument) -> Self {
        Self {
            doc: Arc::new(Mutex::new(doc)),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, PortError> {
        let doc: CatalogDocument = serde_json::from_str(raw)
            .map_err(|e| PortError::Validation(format!("invalid catalog document: {e}")))?;
        Ok(Self::from_document(doc))
    }

    fn doc(&self) -> Result<MutexGuard<'_, CatalogDocument>, PortError> {
        self.doc
            .lock()
            .map_err(|e| PortError::Transport(format!("catalog lock poisoned: {e}")))
    }

    pub fn add_listing(&self, listing: ProductListing) -> Result<(), PortError> {
        let mut g = self.doc()?;
        if g.listings.iter().any(|l| l.id == listing.id) {
            return Err(PortError::Validation(format!(
                "duplicate listing id: {}",
                listing.id
            )));
        }
        g.listings.push(listing);
        Ok(())
    }

    pub fn add_order(&self, order: Order) -> Result<(), PortError> {
        self.doc()?.orders.push(order);
        Ok(())
    }

    pub fn add_pool(&self, pool: LiquidityPool) -> Result<(), PortError> {
        self.doc()?.pools.push(pool);
        Ok(())
    }
}

impl CatalogPort for InMemoryCatalog {
    fn listings(&self) -> Result<Vec<ProductListing>, PortError> {
        Ok(self.doc()?.listings.clone())
    }

    fn listing(&self, product_id: &str) -> Result<Option<ProductListing>, PortError> {
        Ok(self
            .doc()?
            .listings
            .iter()
            .find(|l| l.id == product_id)
            .cloned())
    }

    fn orders(&self) -> Result<Vec<Order>, PortError> {
        Ok(self.doc()?.orders.clone())
    }

    fn liquidity_pools(&self) -> Result<Vec<LiquidityPool>, PortError> {
        Ok(self.doc()?.pools.clone())
    }
}
