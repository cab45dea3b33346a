#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use alloy::primitives::Address;
use serde_json::{json, Value};
use tiny_http::{Response, Server, StatusCode};

use medledger_adapters::{AdapterConfig, Eip1193Adapter};

/// What the mock wallet bridge answers; tests mutate it between calls.
#[derive(Debug, Clone)]
pub struct RpcScript {
    pub accounts: Vec<String>,
    pub chain_id: Value,
    pub reject_request_accounts: bool,
    pub calls: Vec<String>,
}

impl Default for RpcScript {
    fn default() -> Self {
        Self {
            accounts: vec![owner_address().to_string()],
            chain_id: json!("0x1"),
            reject_request_accounts: false,
            calls: Vec::new(),
        }
    }
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

pub fn proxy_adapter(base_url: String) -> Eip1193Adapter {
    Eip1193Adapter::with_config(AdapterConfig {
        eip1193_proxy_url: Some(base_url),
        provider_timeout_ms: 5_000,
        ..AdapterConfig::default()
    })
}

pub fn spawn_rpc_server(script: Arc<Mutex<RpcScript>>) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());

    let join = thread::spawn(move || {
        for _ in 0..32 {
            let mut req = match server.recv() {
                Ok(r) => r,
                Err(_) => break,
            };
            let mut body = String::new();
            let _ = req.as_reader().read_to_string(&mut body);
            let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let method = request
                .get("method")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();

            let (code, payload) = {
                let mut g = script.lock().expect("script lock");
                g.calls.push(method.clone());
                match method.as_str() {
                    "eth_requestAccounts" if g.reject_request_accounts => (
                        200,
                        json!({
                            "jsonrpc": "2.0",
                            "id": 1,
                            "error": {"code": 4001, "message": "User rejected the request."}
                        }),
                    ),
                    "eth_requestAccounts" | "eth_accounts" => (
                        200,
                        json!({"jsonrpc": "2.0", "id": 1, "result": g.accounts}),
                    ),
                    "eth_chainId" => (
                        200,
                        json!({"jsonrpc": "2.0", "id": 1, "result": g.chain_id}),
                    ),
                    _ => (404, json!({"error": "method not found"})),
                }
            };

            let response =
                Response::from_string(payload.to_string()).with_status_code(StatusCode(code));
            let _ = req.respond(response);
        }
    });

    (addr, join)
}
