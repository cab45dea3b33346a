use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use alloy::primitives::{address, Address};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use medledger_core::{PortError, ProviderEvent, ProviderEventKind, ProviderPort};

use crate::AdapterConfig;

#[derive(Debug, Clone)]
pub struct Eip1193Adapter {
    mode: ProviderMode,
    state: Arc<Mutex<ProviderState>>,
}

#[derive(Debug, Clone)]
enum ProviderMode {
    Disabled(String),
    Deterministic,
    Proxy(ProxyRuntime),
}

#[derive(Debug, Clone)]
struct ProxyRuntime {
    base_url: String,
    client: reqwest::Client,
}

/// Last observed provider snapshot. `None` means never read, so the first
/// read establishes a baseline instead of emitting a change event.
#[derive(Debug, Clone, Default)]
struct ProviderState {
    accounts: Option<Vec<Address>>,
    chain_id: Option<u64>,
    event_seq: u64,
    events: Vec<ProviderEvent>,
}

impl ProviderState {
    fn deterministic() -> Self {
        Self {
            accounts: Some(vec![address!("1000000000000000000000000000000000000001")]),
            chain_id: Some(1),
            ..Self::default()
        }
    }

    fn push_event(&mut self, kind: ProviderEventKind) {
        self.event_seq = self.event_seq.saturating_add(1);
        self.events.push(ProviderEvent {
            sequence: self.event_seq,
            kind,
        });
    }

    fn observe_accounts(&mut self, accounts: Vec<Address>) {
        if let Some(prev) = &self.accounts {
            if *prev != accounts {
                self.push_event(ProviderEventKind::AccountsChanged(accounts.clone()));
            }
        }
        self.accounts = Some(accounts);
    }

    fn observe_chain(&mut self, chain_id: u64) {
        if let Some(prev) = self.chain_id {
            if prev != chain_id {
                self.push_event(ProviderEventKind::ChainChanged(chain_id));
            }
        }
        self.chain_id = Some(chain_id);
    }
}

impl Default for Eip1193Adapter {
    fn default() -> Self {
        Self::with_config(AdapterConfig::from_env())
    }
}

impl Eip1193Adapter {
    pub fn with_config(config: AdapterConfig) -> Self {
        let mode = if let Some(ref base_url) = config.eip1193_proxy_url {
            let timeout = Duration::from_millis(config.provider_timeout_ms);
            match reqwest::Client::builder().timeout(timeout).build() {
                Ok(client) => ProviderMode::Proxy(ProxyRuntime {
                    base_url: base_url.clone(),
                    client,
                }),
                Err(e) => {
                    if config.strict_runtime_required() {
                        ProviderMode::Disabled(format!(
                            "failed to initialize EIP-1193 proxy client in production profile: {e}"
                        ))
                    } else {
                        warn!(error = %e, "EIP-1193 proxy client unavailable; using deterministic provider");
                        ProviderMode::Deterministic
                    }
                }
            }
        } else if config.strict_runtime_required() {
            ProviderMode::Disabled(
                "EIP-1193 proxy URL not configured in production runtime profile".to_owned(),
            )
        } else {
            ProviderMode::Deterministic
        };

        Self::from_mode(mode)
    }

    /// A provider slot with nothing injected, e.g. a browser without a wallet.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::from_mode(ProviderMode::Disabled(reason.into()))
    }

    pub fn deterministic() -> Self {
        Self::from_mode(ProviderMode::Deterministic)
    }

    fn from_mode(mode: ProviderMode) -> Self {
        let state = match mode {
            ProviderMode::Deterministic => ProviderState::deterministic(),
            _ => ProviderState::default(),
        };
        Self {
            mode,
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn check_mode(&self) -> Result<(), PortError> {
        if let ProviderMode::Disabled(reason) = &self.mode {
            return Err(PortError::Policy(reason.clone()));
        }
        Ok(())
    }

    fn state(&self) -> Result<MutexGuard<'_, ProviderState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("provider lock poisoned: {e}")))
    }

    pub fn debug_inject_accounts_changed(&self, accounts: Vec<Address>) -> Result<(), PortError> {
        let mut g = self.state()?;
        g.accounts = Some(accounts.clone());
        g.push_event(ProviderEventKind::AccountsChanged(accounts));
        Ok(())
    }

    pub fn debug_inject_chain_changed(&self, chain_id: u64) -> Result<(), PortError> {
        let mut g = self.state()?;
        g.chain_id = Some(chain_id);
        g.push_event(ProviderEventKind::ChainChanged(chain_id));
        Ok(())
    }

    async fn proxy_call(&self, method: &str, params: Value) -> Result<Value, PortError> {
        let proxy = match &self.mode {
            ProviderMode::Proxy(proxy) => proxy,
            ProviderMode::Disabled(reason) => return Err(PortError::Policy(reason.clone())),
            ProviderMode::Deterministic => {
                return Err(PortError::NotImplemented(
                    "eip1193 proxy runtime not enabled",
                ))
            }
        };

        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        debug!(method, url = %proxy.base_url, "eip1193 proxy call");
        let response = proxy
            .client
            .post(&proxy.base_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PortError::Transport(format!("eip1193 proxy request failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| PortError::Transport(format!("eip1193 proxy json decode failed: {e}")))?;
        if !status.is_success() {
            return Err(PortError::Transport(format!(
                "eip1193 proxy status {}: {}",
                status, body
            )));
        }
        if let Some(err) = body.get("error") {
            return Err(PortError::Transport(format!(
                "eip1193 proxy returned error: {err}"
            )));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| PortError::Transport("eip1193 proxy missing result".to_owned()))
    }

    async fn proxy_accounts(&self, method: &str) -> Result<Vec<Address>, PortError> {
        let result = self.proxy_call(method, serde_json::json!([])).await?;
        let accounts = parse_accounts(method, &result)?;
        self.state()?.observe_accounts(accounts.clone());
        Ok(accounts)
    }

    async fn proxy_chain_id(&self) -> Result<u64, PortError> {
        let result = self.proxy_call("eth_chainId", serde_json::json!([])).await?;
        let chain_id = json_chain_id_to_u64(&result)?;
        self.state()?.observe_chain(chain_id);
        Ok(chain_id)
    }
}

#[async_trait]
impl ProviderPort for Eip1193Adapter {
    fn is_available(&self) -> bool {
        !matches!(self.mode, ProviderMode::Disabled(_))
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, PortError> {
        self.check_mode()?;
        if matches!(self.mode, ProviderMode::Proxy(_)) {
            return self.proxy_accounts("eth_requestAccounts").await;
        }
        Ok(self.state()?.accounts.clone().unwrap_or_default())
    }

    async fn chain_id(&self) -> Result<u64, PortError> {
        self.check_mode()?;
        if matches!(self.mode, ProviderMode::Proxy(_)) {
            return self.proxy_chain_id().await;
        }
        self.state()?
            .chain_id
            .ok_or_else(|| PortError::NotFound("provider chain id unknown".to_owned()))
    }

    /// Re-reads accounts (without prompting) and chain from the proxy so that
    /// external wallet changes surface as events.
    async fn refresh(&self) -> Result<(), PortError> {
        self.check_mode()?;
        if matches!(self.mode, ProviderMode::Proxy(_)) {
            self.proxy_accounts("eth_accounts").await?;
            self.proxy_chain_id().await?;
        }
        Ok(())
    }

    fn drain_events(&self) -> Result<Vec<ProviderEvent>, PortError> {
        self.check_mode()?;
        Ok(std::mem::take(&mut self.state()?.events))
    }
}

fn parse_accounts(method: &str, result: &Value) -> Result<Vec<Address>, PortError> {
    let arr = result
        .as_array()
        .ok_or_else(|| PortError::Transport(format!("{method}: array expected")))?;
    let mut accounts = Vec::with_capacity(arr.len());
    for item in arr {
        let raw = item
            .as_str()
            .ok_or_else(|| PortError::Transport(format!("{method}: string expected")))?;
        let parsed: Address = raw
            .parse()
            .map_err(|e| PortError::Validation(format!("invalid account address: {e}")))?;
        accounts.push(parsed);
    }
    Ok(accounts)
}

fn json_chain_id_to_u64(value: &Value) -> Result<u64, PortError> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    let s = value
        .as_str()
        .ok_or_else(|| PortError::Validation("chain id must be string or number".to_owned()))?;
    parse_chain_id_str(s)
}

fn parse_chain_id_str(raw: &str) -> Result<u64, PortError> {
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
            .map_err(|e| PortError::Validation(format!("invalid hex chain id: {e}")))
    } else {
        raw.parse()
            .map_err(|e| PortError::Validation(format!("invalid chain id: {e}")))
    }
}
