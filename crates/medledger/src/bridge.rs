//! Bridge between a dashboard shell and the context/adapters crates.
//! View code should only reach the marketplace context through here.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use medledger_adapters::{AdapterConfig, Eip1193Adapter, InMemoryCatalog, SystemClockAdapter};
use medledger_core::{MarketplaceContext, ProviderPort};

pub type DashboardContext = MarketplaceContext<Eip1193Adapter, InMemoryCatalog, SystemClockAdapter>;

/// Handle to the background provider poller. Dropping it stops the task.
#[derive(Debug)]
pub struct EventWatcher {
    task: JoinHandle<()>,
}

impl Drop for EventWatcher {
    fn drop(&mut self) {
        self.task.abort();
        debug!("event watcher stopped");
    }
}

#[derive(Clone)]
pub struct DashboardBridge {
    context: Arc<DashboardContext>,
    config: AdapterConfig,
}

impl Default for DashboardBridge {
    fn default() -> Self {
        Self::from_config(AdapterConfig::from_env())
    }
}

impl DashboardBridge {
    pub fn from_config(config: AdapterConfig) -> Self {
        Self::with_catalog(config, InMemoryCatalog::default())
    }

    pub fn with_catalog(config: AdapterConfig, catalog: InMemoryCatalog) -> Self {
        let context = MarketplaceContext::with_config(
            Eip1193Adapter::with_config(config.clone()),
            catalog,
            SystemClockAdapter,
            config.context_config(),
        );
        info!(
            profile = ?config.runtime_profile,
            provider_available = context.provider.is_available(),
            "dashboard context ready"
        );
        Self {
            context: Arc::new(context),
            config,
        }
    }

    pub fn context(&self) -> &DashboardContext {
        &self.context
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Polls the provider for account/chain changes until the returned
    /// watcher is dropped. Returns `None` when there is no provider to watch.
    pub fn spawn_event_watcher(&self) -> Option<EventWatcher> {
        if !self.context.provider.is_available() {
            info!("no wallet provider; event watcher not started");
            return None;
        }

        let ctx = Arc::clone(&self.context);
        let period = Duration::from_millis(self.config.event_poll_interval_ms.max(1));
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let applied = ctx.sync_provider().await;
                if applied > 0 {
                    debug!(applied, "provider events applied");
                }
            }
        });
        Some(EventWatcher { task })
    }
}
