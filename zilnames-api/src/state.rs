//! App state: resolver and config.

use std::sync::Arc;

use zilnames_core::constants::{DEFAULT_IPFS_GATEWAY, ZILLIQA_RPC_URL, ZILLIQA_TESTNET_RPC_URL};
use zilnames_core::error::Result;
use zilnames_core::traits::RpcTransport;
use zilnames_core::types::{Network, NetworkTable};
use zilnames_resolver::{CacheConfig, IpfsConfig, ResolverConfig, ZilnameResolver};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Mainnet JSON-RPC endpoint
    pub zilliqa_rpc_url: String,
    /// Testnet JSON-RPC endpoint
    pub zilliqa_testnet_rpc_url: String,
    /// Base URL `ipfs://` avatars are rewritten against
    pub ipfs_gateway_url: String,
    /// Development mode defaults to the testnet
    pub development: bool,
    /// Lifetime of cached failures
    pub failure_ttl_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            zilliqa_rpc_url: ZILLIQA_RPC_URL.into(),
            zilliqa_testnet_rpc_url: ZILLIQA_TESTNET_RPC_URL.into(),
            ipfs_gateway_url: DEFAULT_IPFS_GATEWAY.into(),
            development: false,
            failure_ttl_seconds: CacheConfig::default().failure_ttl_seconds,
        }
    }
}

impl ApiConfig {
    /// Reads configuration from the environment (and `.env` if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            zilliqa_rpc_url: std::env::var("ZILLIQA_RPC_URL").unwrap_or(defaults.zilliqa_rpc_url),
            zilliqa_testnet_rpc_url: std::env::var("ZILLIQA_TESTNET_RPC_URL")
                .unwrap_or(defaults.zilliqa_testnet_rpc_url),
            ipfs_gateway_url: std::env::var("IPFS_GATEWAY_URL").unwrap_or(defaults.ipfs_gateway_url),
            development: std::env::var("ZILNAMES_ENV")
                .map(|v| v.eq_ignore_ascii_case("development"))
                .unwrap_or(false),
            failure_ttl_seconds: std::env::var("FAILURE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.failure_ttl_seconds),
        }
    }

    /// Network used when a request names no chain.
    pub fn default_network(&self) -> Network {
        Network::default_for_env(self.development)
    }

    /// Resolver configuration derived from this config.
    pub fn resolver_config(&self) -> ResolverConfig {
        let networks = NetworkTable::new()
            .with_rpc_url(Network::Zilliqa, &self.zilliqa_rpc_url)
            .with_rpc_url(Network::ZilliqaTestnet, &self.zilliqa_testnet_rpc_url)
            .with_default_network(self.default_network());

        ResolverConfig {
            networks,
            cache: CacheConfig::default().with_failure_ttl(self.failure_ttl_seconds),
            ipfs: IpfsConfig::new(&self.ipfs_gateway_url),
            ..ResolverConfig::default()
        }
    }
}

/// Shared handler state.
pub struct AppState {
    /// Server configuration
    pub config: ApiConfig,
    /// Resolver shared by every request
    pub resolver: ZilnameResolver,
}

impl AppState {
    /// Creates state that resolves over HTTP JSON-RPC.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let resolver = ZilnameResolver::with_config(config.resolver_config())?;
        Ok(Self { config, resolver })
    }

    /// Creates state over a custom transport.
    pub fn with_transport(config: ApiConfig, transport: Arc<dyn RpcTransport>) -> Result<Self> {
        let resolver = ZilnameResolver::with_transport(config.resolver_config(), transport)?;
        Ok(Self { config, resolver })
    }

    /// Chain id used when a request names none.
    pub fn default_chain_id(&self) -> u64 {
        self.resolver.networks().default_network().chain_id()
    }
}
