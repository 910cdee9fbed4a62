//! JSON-RPC `eth_call` transport over HTTP.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use zilnames_core::error::{Result, ZilnamesError};
use zilnames_core::traits::RpcTransport;
use zilnames_core::types::Address;

/// JSON-RPC error code nodes use for execution reverts.
const EXECUTION_REVERTED_CODE: i64 = 3;

/// HTTP transport configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Per-request timeout in seconds. `None` leaves cancellation to the caller.
    pub timeout_seconds: Option<u64>,
}

impl RpcConfig {
    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    result: Option<String>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// `eth_call` against the latest block, one HTTP round-trip per call.
pub struct HttpTransport {
    http_client: reqwest::Client,
    next_id: AtomicU64,
}

impl HttpTransport {
    /// Creates a transport with no request timeout.
    pub fn new() -> Result<Self> {
        Self::with_config(&RpcConfig::default())
    }

    /// Creates a transport with custom configuration.
    pub fn with_config(config: &RpcConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let http_client = builder
            .build()
            .map_err(|e| ZilnamesError::ConfigError(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            next_id: AtomicU64::new(1),
        })
    }
}

fn map_rpc_error(error: JsonRpcError) -> ZilnamesError {
    if error.code == EXECUTION_REVERTED_CODE || error.message.to_lowercase().contains("revert") {
        ZilnamesError::ContractReverted(error.message)
    } else {
        ZilnamesError::RpcError {
            code: error.code,
            message: error.message,
        }
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    #[instrument(skip(self, data))]
    async fn eth_call(&self, rpc_url: &str, to: Address, data: Vec<u8>) -> Result<Vec<u8>> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "eth_call",
            "params": [
                {
                    "to": to.to_hex(),
                    "data": format!("0x{}", hex::encode(&data)),
                },
                "latest"
            ],
            "id": id
        });

        let response = self
            .http_client
            .post(rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ZilnamesError::HttpError(e.to_string()))?;

        let status = response.status();
        let body: JsonRpcResponse = response.json().await.map_err(|e| {
            if status.is_success() {
                ZilnamesError::HttpError(format!("invalid JSON-RPC response: {e}"))
            } else {
                ZilnamesError::HttpError(format!("HTTP {status}"))
            }
        })?;

        if let Some(error) = body.error {
            warn!(code = error.code, message = %error.message, "eth_call returned an error");
            return Err(map_rpc_error(error));
        }

        let result = body
            .result
            .ok_or_else(|| ZilnamesError::DecodeError("JSON-RPC response has no result".into()))?;
        let bytes = hex::decode(result.strip_prefix("0x").unwrap_or(&result))?;

        debug!(id, len = bytes.len(), "eth_call succeeded");
        Ok(bytes)
    }
}
