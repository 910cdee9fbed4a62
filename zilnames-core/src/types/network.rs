//! Supported networks and the resolver table.
//!
//! [`Network`] is the closed set of chains Zilnames resolves against. Every
//! per-network fact hangs off an exhaustive `match`, so adding a network is a
//! compile-checked change. [`NetworkTable`] is the immutable configuration
//! value handed to the resolver: it maps a chain id to a [`ResolverEndpoint`]
//! and fails closed for anything it does not know.

use serde::{Deserialize, Serialize};

use super::{Address, Name};
use crate::constants::*;
use crate::error::{Result, ZilnamesError};

/// A network with a deployed Zilnames resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    /// Zilliqa EVM mainnet.
    Zilliqa,
    /// Zilliqa EVM testnet.
    ZilliqaTestnet,
}

impl Network {
    /// Every supported network.
    pub const ALL: [Network; 2] = [Network::Zilliqa, Network::ZilliqaTestnet];

    /// EVM chain id.
    pub const fn chain_id(self) -> u64 {
        match self {
            Network::Zilliqa => ZILLIQA_CHAIN_ID,
            Network::ZilliqaTestnet => ZILLIQA_TESTNET_CHAIN_ID,
        }
    }

    /// Looks a network up by chain id.
    pub fn from_chain_id(chain_id: u64) -> Option<Network> {
        Network::ALL.into_iter().find(|n| n.chain_id() == chain_id)
    }

    /// Human-readable network name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Network::Zilliqa => "Zilliqa",
            Network::ZilliqaTestnet => "Zilliqa Testnet",
        }
    }

    /// Name suffix owned by this network.
    pub const fn name_suffix(self) -> &'static str {
        match self {
            Network::Zilliqa => ZILLIQA_NAME_SUFFIX,
            Network::ZilliqaTestnet => ZILLIQA_TESTNET_NAME_SUFFIX,
        }
    }

    /// Coin type used to build this network's reverse namespace.
    pub const fn coin_type(self) -> u32 {
        match self {
            Network::Zilliqa => ZILLIQA_COIN_TYPE,
            Network::ZilliqaTestnet => ZILLIQA_TESTNET_COIN_TYPE,
        }
    }

    /// Public RPC endpoint used when no override is configured.
    pub const fn default_rpc_url(self) -> &'static str {
        match self {
            Network::Zilliqa => ZILLIQA_RPC_URL,
            Network::ZilliqaTestnet => ZILLIQA_TESTNET_RPC_URL,
        }
    }

    /// Resolver contract deployed on this network.
    pub const fn resolver_address(self) -> &'static str {
        match self {
            Network::Zilliqa => ZILLIQA_RESOLVER_ADDRESS,
            Network::ZilliqaTestnet => ZILLIQA_TESTNET_RESOLVER_ADDRESS,
        }
    }

    /// Picks the network a name belongs to from its suffix.
    ///
    /// `*.test.zil` is checked first because it also ends in `.zil`.
    pub fn infer_from_name(name: &Name) -> Option<Network> {
        if name.has_suffix(Network::ZilliqaTestnet.name_suffix()) {
            Some(Network::ZilliqaTestnet)
        } else if name.has_suffix(Network::Zilliqa.name_suffix()) {
            Some(Network::Zilliqa)
        } else {
            None
        }
    }

    /// Network used when neither the caller nor a name decides.
    pub fn default_for_env(development: bool) -> Network {
        if development {
            Network::ZilliqaTestnet
        } else {
            Network::Zilliqa
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Where to send resolver reads for one network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverEndpoint {
    /// Network this endpoint belongs to
    pub network: Network,
    /// JSON-RPC endpoint
    pub rpc_url: String,
    /// Resolver contract address
    pub contract_address: Address,
}

/// Table entry for one network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Which network this row describes
    pub network: Network,
    /// JSON-RPC endpoint (overridable)
    pub rpc_url: String,
}

impl NetworkConfig {
    fn defaults(network: Network) -> Self {
        Self {
            network,
            rpc_url: network.default_rpc_url().into(),
        }
    }
}

/// Immutable table of supported networks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkTable {
    zilliqa: NetworkConfig,
    zilliqa_testnet: NetworkConfig,
    default_network: Network,
}

impl Default for NetworkTable {
    fn default() -> Self {
        Self {
            zilliqa: NetworkConfig::defaults(Network::Zilliqa),
            zilliqa_testnet: NetworkConfig::defaults(Network::ZilliqaTestnet),
            default_network: Network::Zilliqa,
        }
    }
}

impl NetworkTable {
    /// Creates the table with public endpoints and mainnet as default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the RPC endpoint of one network.
    pub fn with_rpc_url(mut self, network: Network, rpc_url: impl Into<String>) -> Self {
        self.config_mut(network).rpc_url = rpc_url.into();
        self
    }

    /// Sets the network used when a caller does not pick one.
    pub fn with_default_network(mut self, network: Network) -> Self {
        self.default_network = network;
        self
    }

    /// Network used when a caller does not pick one.
    pub fn default_network(&self) -> Network {
        self.default_network
    }

    /// Table entry for a network.
    pub fn config(&self, network: Network) -> &NetworkConfig {
        match network {
            Network::Zilliqa => &self.zilliqa,
            Network::ZilliqaTestnet => &self.zilliqa_testnet,
        }
    }

    fn config_mut(&mut self, network: Network) -> &mut NetworkConfig {
        match network {
            Network::Zilliqa => &mut self.zilliqa,
            Network::ZilliqaTestnet => &mut self.zilliqa_testnet,
        }
    }

    /// Validates a chain id against the table.
    pub fn network(&self, chain_id: u64) -> Result<Network> {
        Network::from_chain_id(chain_id).ok_or(ZilnamesError::UnsupportedNetwork(chain_id))
    }

    /// Returns true if reads against `chain_id` are possible.
    pub fn is_supported(&self, chain_id: u64) -> bool {
        Network::from_chain_id(chain_id).is_some()
    }

    /// Maps a chain id to its resolver contract and RPC endpoint.
    pub fn resolver_for(&self, chain_id: u64) -> Result<ResolverEndpoint> {
        let network = self.network(chain_id)?;
        self.endpoint(network)
    }

    /// Resolver contract and RPC endpoint for a known network.
    pub fn endpoint(&self, network: Network) -> Result<ResolverEndpoint> {
        let contract_address = Address::parse(network.resolver_address())
            .map_err(|e| ZilnamesError::ConfigError(format!("resolver address for {network}: {e}")))?;
        Ok(ResolverEndpoint {
            network,
            rpc_url: self.config(network).rpc_url.clone(),
            contract_address,
        })
    }

    /// Iterates over every table entry.
    pub fn iter(&self) -> impl Iterator<Item = &NetworkConfig> {
        Network::ALL.into_iter().map(move |n| self.config(n))
    }
}
