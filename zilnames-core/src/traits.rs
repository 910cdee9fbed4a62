//! Common traits for Zilnames.
//!
//! The transport seam sits here so resolvers can be driven by the HTTP
//! JSON-RPC client in production and by in-memory fakes in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Address;

// ═══════════════════════════════════════════════════════════════════════════════
// RPC TRANSPORT TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Read-only contract call primitive (`eth_call` against the latest block).
///
/// Implementations perform exactly one round-trip per call and never retry.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Calls `to` with ABI-encoded `data` and returns the raw return data.
    ///
    /// # Errors
    /// Transport failures, JSON-RPC error objects and reverts are returned
    /// as contract-call errors carrying the node's reason string.
    async fn eth_call(&self, rpc_url: &str, to: Address, data: Vec<u8>) -> Result<Vec<u8>>;
}
