use std::str::FromStr;

use medledger_core::ContextConfig;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeProfile {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown runtime profile: {0}")]
    UnknownProfile(String),
}

impl FromStr for RuntimeProfile {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::UnknownProfile(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub runtime_profile: RuntimeProfile,
    pub eip1193_proxy_url: Option<String>,
    pub provider_timeout_ms: u64,
    pub event_poll_interval_ms: u64,
    pub notification_ttl_ms: u64,
    pub listing_delay_ms: u64,
    pub purchase_delay_ms: u64,
    pub pool_delay_ms: u64,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        let timings = ContextConfig::default();
        Self {
            runtime_profile: RuntimeProfile::Development,
            eip1193_proxy_url: None,
            provider_timeout_ms: 15_000,
            event_poll_interval_ms: 1_000,
            notification_ttl_ms: timings.notification_ttl_ms,
            listing_delay_ms: timings.listing_delay_ms,
            purchase_delay_ms: timings.purchase_delay_ms,
            pool_delay_ms: timings.pool_delay_ms,
        }
    }
}

impl AdapterConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any `MEDLEDGER_*` key source. Unset keys keep
    /// their defaults; unparseable ones are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(raw) = lookup("MEDLEDGER_RUNTIME_PROFILE") {
            match raw.parse() {
                Ok(profile) => cfg.runtime_profile = profile,
                Err(e) => warn!(error = %e, "ignoring MEDLEDGER_RUNTIME_PROFILE"),
            }
        }
        cfg.eip1193_proxy_url = lookup("MEDLEDGER_EIP1193_PROXY_URL")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());

        let millis = |key: &str, slot: &mut u64| {
            if let Some(raw) = lookup(key) {
                match raw.trim().parse::<u64>() {
                    Ok(v) => *slot = v,
                    Err(e) => warn!(key, value = %raw, error = %e, "ignoring non-numeric setting"),
                }
            }
        };
        millis("MEDLEDGER_PROVIDER_TIMEOUT_MS", &mut cfg.provider_timeout_ms);
        millis("MEDLEDGER_EVENT_POLL_INTERVAL_MS", &mut cfg.event_poll_interval_ms);
        millis("MEDLEDGER_NOTIFICATION_TTL_MS", &mut cfg.notification_ttl_ms);
        millis("MEDLEDGER_LISTING_DELAY_MS", &mut cfg.listing_delay_ms);
        millis("MEDLEDGER_PURCHASE_DELAY_MS", &mut cfg.purchase_delay_ms);
        millis("MEDLEDGER_POOL_DELAY_MS", &mut cfg.pool_delay_ms);

        cfg
    }

    pub fn strict_runtime_required(&self) -> bool {
        self.runtime_profile == RuntimeProfile::Production
    }

    pub fn context_config(&self) -> ContextConfig {
        ContextConfig {
            notification_ttl_ms: self.notification_ttl_ms,
            listing_delay_ms: self.listing_delay_ms,
            purchase_delay_ms: self.purchase_delay_ms,
            pool_delay_ms: self.pool_delay_ms,
        }
    }
}
