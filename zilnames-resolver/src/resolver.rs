//! Forward, reverse and avatar resolution.
//!
//! Every lookup follows the same path: validate input (no I/O on failure),
//! pick the network's resolver endpoint (unknown chains are `Unsupported`),
//! then run the contract read through the matching [`QueryCache`] so
//! concurrent callers with the same key share one `eth_call`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use zilnames_cache::{CacheConfig, CacheKey, CacheStats, QueryCache, QueryKind, QueryState};
use zilnames_core::constants::AVATAR_TEXT_KEY;
use zilnames_core::error::{Result, ZilnamesError};
use zilnames_core::traits::RpcTransport;
use zilnames_core::types::{Address, Name, Network, NetworkTable, Resolution};
use zilnames_crypto::{namehash, reverse_node};
use zilnames_ipfs::{IpfsConfig, IpfsGateway};

use crate::contract::ContractClient;
use crate::rpc::{HttpTransport, RpcConfig};

/// Resolver configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Supported networks and their endpoints
    pub networks: NetworkTable,
    /// Cache sizing and lifetimes
    pub cache: CacheConfig,
    /// Gateway for `ipfs://` avatars
    pub ipfs: IpfsConfig,
    /// HTTP transport settings
    pub rpc: RpcConfig,
}

impl ResolverConfig {
    /// Replaces the network table.
    pub fn with_networks(mut self, networks: NetworkTable) -> Self {
        self.networks = networks;
        self
    }

    /// Replaces the cache configuration.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Sets the IPFS gateway base URL.
    pub fn with_ipfs_gateway(mut self, gateway_url: impl Into<String>) -> Self {
        self.ipfs = IpfsConfig::new(gateway_url);
        self
    }
}

/// Name and avatar for an address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    /// Reverse record
    pub name: Resolution<Name>,
    /// Avatar of `name`; `NotFound` unless the name was found
    pub avatar: Resolution<String>,
}

/// Per-operation cache statistics.
#[derive(Clone, Debug, Serialize)]
pub struct ResolverCacheStats {
    /// Forward lookups
    pub addresses: CacheStats,
    /// Reverse lookups
    pub names: CacheStats,
    /// Avatar lookups
    pub avatars: CacheStats,
}

/// Zilnames resolver.
///
/// Cheap to clone; clones share caches and the transport.
#[derive(Clone)]
pub struct ZilnameResolver {
    networks: Arc<NetworkTable>,
    contract: ContractClient,
    gateway: IpfsGateway,
    addresses: QueryCache<Address>,
    names: QueryCache<Name>,
    avatars: QueryCache<String>,
}

impl ZilnameResolver {
    /// Creates a resolver over the public endpoints.
    pub fn new() -> Result<Self> {
        Self::with_config(ResolverConfig::default())
    }

    /// Creates a resolver that talks JSON-RPC over HTTP.
    pub fn with_config(config: ResolverConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(&config.rpc)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates a resolver over any transport.
    pub fn with_transport(config: ResolverConfig, transport: Arc<dyn RpcTransport>) -> Result<Self> {
        let gateway = IpfsGateway::with_config(&config.ipfs)?;

        Ok(Self {
            networks: Arc::new(config.networks),
            contract: ContractClient::new(transport),
            gateway,
            addresses: QueryCache::with_config(config.cache.clone()),
            names: QueryCache::with_config(config.cache.clone()),
            avatars: QueryCache::with_config(config.cache),
        })
    }

    /// The network table this resolver was built with.
    pub fn networks(&self) -> &NetworkTable {
        &self.networks
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // LOOKUPS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Resolves a name to its address record.
    ///
    /// An empty or invalid name, or one outside the `.zil` / `.test.zil`
    /// namespaces, fails without a contract call. A zero address from the
    /// contract is `NotFound`.
    #[instrument(skip(self))]
    pub async fn resolve_address(&self, name: &str, chain_id: u64) -> Resolution<Address> {
        let name = match parse_zilliqa_name(name) {
            Ok(name) => name,
            Err(e) => return Resolution::Failed(e),
        };
        let endpoint = match self.networks.resolver_for(chain_id) {
            Ok(endpoint) => endpoint,
            Err(e) => return e.into(),
        };

        let key = CacheKey::new(QueryKind::Address, name.as_str(), chain_id);
        let contract = self.contract.clone();

        self.addresses
            .get_or_fetch(key, move || async move {
                match contract.addr(&endpoint, namehash(&name)).await {
                    Ok(address) if address.is_zero() => {
                        debug!(%name, "No address record");
                        Resolution::NotFound
                    }
                    Ok(address) => {
                        info!(%name, %address, "Resolved address");
                        Resolution::Found(address)
                    }
                    Err(e) => Resolution::Failed(e),
                }
            })
            .await
    }

    /// Resolves an address to its primary name through the reverse record.
    ///
    /// A malformed address fails without a contract call. An empty record is
    /// `NotFound`, the common "no reverse record set" case.
    #[instrument(skip(self))]
    pub async fn resolve_name(&self, address: &str, chain_id: u64) -> Resolution<Name> {
        let address = match Address::parse(address) {
            Ok(address) => address,
            Err(e) => return Resolution::Failed(e),
        };
        let endpoint = match self.networks.resolver_for(chain_id) {
            Ok(endpoint) => endpoint,
            Err(e) => return e.into(),
        };

        let key = CacheKey::new(QueryKind::Name, address.to_hex(), chain_id);
        let contract = self.contract.clone();

        self.names
            .get_or_fetch(key, move || async move {
                let node = reverse_node(&address, endpoint.network.coin_type());
                let raw = match contract.name(&endpoint, node).await {
                    Ok(raw) => raw,
                    Err(e) => return Resolution::Failed(e),
                };

                if raw.trim().is_empty() {
                    debug!(%address, "No reverse record set");
                    return Resolution::NotFound;
                }

                // Bad on-chain data is a contract-call failure, not caller input
                match parse_zilliqa_name(&raw) {
                    Ok(name) => {
                        info!(%address, %name, "Resolved name");
                        Resolution::Found(name)
                    }
                    Err(e) => {
                        warn!(%address, %raw, error = %e, "Reverse record is not a valid name");
                        Resolution::Failed(ZilnamesError::DecodeError(format!(
                            "reverse record is not a valid name: {e}"
                        )))
                    }
                }
            })
            .await
    }

    /// Resolves a name's `avatar` text record to a fetchable URL.
    ///
    /// `ipfs://` values are rewritten against the configured gateway.
    #[instrument(skip(self))]
    pub async fn resolve_avatar(&self, name: &str, chain_id: u64) -> Resolution<String> {
        let name = match parse_zilliqa_name(name) {
            Ok(name) => name,
            Err(e) => return Resolution::Failed(e),
        };
        let endpoint = match self.networks.resolver_for(chain_id) {
            Ok(endpoint) => endpoint,
            Err(e) => return e.into(),
        };

        let key = CacheKey::new(QueryKind::Avatar, name.as_str(), chain_id);
        let contract = self.contract.clone();
        let gateway = self.gateway.clone();

        self.avatars
            .get_or_fetch(key, move || async move {
                match contract.text(&endpoint, namehash(&name), AVATAR_TEXT_KEY).await {
                    Ok(raw) if raw.trim().is_empty() => {
                        debug!(%name, "No avatar record");
                        Resolution::NotFound
                    }
                    Ok(raw) => Resolution::Found(gateway.normalize(&raw)),
                    Err(e) => Resolution::Failed(e),
                }
            })
            .await
    }

    /// Network a name belongs to, from its suffix.
    pub fn network_for_name(&self, name: &str) -> Result<Network> {
        let name = Name::parse(name)?;
        network_of(&name)
    }

    /// Forward resolution on the network implied by the name's suffix.
    pub async fn resolve_address_inferred(&self, name: &str) -> Resolution<Address> {
        match self.network_for_name(name) {
            Ok(network) => self.resolve_address(name, network.chain_id()).await,
            Err(e) => Resolution::Failed(e),
        }
    }

    /// Reverse resolution followed by an avatar lookup for the found name.
    #[instrument(skip(self))]
    pub async fn resolve_profile(&self, address: &str, chain_id: u64) -> Profile {
        let name = self.resolve_name(address, chain_id).await;
        let avatar = match &name {
            Resolution::Found(found) => self.resolve_avatar(found.as_str(), chain_id).await,
            _ => Resolution::NotFound,
        };
        Profile { name, avatar }
    }

    /// Re-runs a profile lookup, refreshing both the name and its avatar.
    pub async fn refetch_profile(&self, address: &str, chain_id: u64) -> Profile {
        let name = self.refetch_name(address, chain_id).await;
        let avatar = match &name {
            Resolution::Found(found) => self.refetch_avatar(found.as_str(), chain_id).await,
            _ => Resolution::NotFound,
        };
        Profile { name, avatar }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // QUERY STATE & INVALIDATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Marks one cached query stale. Returns false if nothing was cached
    /// or the input does not normalize.
    pub fn invalidate(&self, kind: QueryKind, input: &str, chain_id: u64) -> bool {
        let Ok(key) = cache_key(kind, input, chain_id) else {
            return false;
        };
        match kind {
            QueryKind::Address => self.addresses.invalidate(&key),
            QueryKind::Name => self.names.invalidate(&key),
            QueryKind::Avatar => self.avatars.invalidate(&key),
        }
    }

    /// Marks every cached query for a network stale.
    pub fn invalidate_network(&self, chain_id: u64) -> usize {
        let count = self.addresses.invalidate_network(chain_id)
            + self.names.invalidate_network(chain_id)
            + self.avatars.invalidate_network(chain_id);
        debug!(chain_id, count, "Network change invalidated cached queries");
        count
    }

    /// Invalidates then re-runs a forward lookup.
    pub async fn refetch_address(&self, name: &str, chain_id: u64) -> Resolution<Address> {
        self.invalidate(QueryKind::Address, name, chain_id);
        self.resolve_address(name, chain_id).await
    }

    /// Invalidates then re-runs a reverse lookup.
    pub async fn refetch_name(&self, address: &str, chain_id: u64) -> Resolution<Name> {
        self.invalidate(QueryKind::Name, address, chain_id);
        self.resolve_name(address, chain_id).await
    }

    /// Invalidates then re-runs an avatar lookup.
    pub async fn refetch_avatar(&self, name: &str, chain_id: u64) -> Resolution<String> {
        self.invalidate(QueryKind::Avatar, name, chain_id);
        self.resolve_avatar(name, chain_id).await
    }

    /// Snapshot of a forward lookup.
    pub fn address_state(&self, name: &str, chain_id: u64) -> QueryState<Address> {
        cache_key(QueryKind::Address, name, chain_id)
            .map(|key| self.addresses.state(&key))
            .unwrap_or_else(|_| QueryState::idle())
    }

    /// Snapshot of a reverse lookup.
    pub fn name_state(&self, address: &str, chain_id: u64) -> QueryState<Name> {
        cache_key(QueryKind::Name, address, chain_id)
            .map(|key| self.names.state(&key))
            .unwrap_or_else(|_| QueryState::idle())
    }

    /// Snapshot of an avatar lookup.
    pub fn avatar_state(&self, name: &str, chain_id: u64) -> QueryState<String> {
        cache_key(QueryKind::Avatar, name, chain_id)
            .map(|key| self.avatars.state(&key))
            .unwrap_or_else(|_| QueryState::idle())
    }

    /// Drops every cached query.
    pub fn clear_cache(&self) {
        self.addresses.clear();
        self.names.clear();
        self.avatars.clear();
    }

    /// Cache statistics per operation.
    pub fn cache_stats(&self) -> ResolverCacheStats {
        ResolverCacheStats {
            addresses: self.addresses.stats(),
            names: self.names.stats(),
            avatars: self.avatars.stats(),
        }
    }
}

fn network_of(name: &Name) -> Result<Network> {
    Network::infer_from_name(name)
        .ok_or_else(|| ZilnamesError::InvalidName("unrecognized name suffix".into()))
}

/// Parses a name that belongs to one of the supported networks.
fn parse_zilliqa_name(input: &str) -> Result<Name> {
    let name = Name::parse(input)?;
    network_of(&name)?;
    Ok(name)
}

/// Cache key with the same normalization the lookups apply.
fn cache_key(kind: QueryKind, input: &str, chain_id: u64) -> Result<CacheKey> {
    let normalized = match kind {
        QueryKind::Address | QueryKind::Avatar => parse_zilliqa_name(input)?.into_string(),
        QueryKind::Name => Address::parse(input)?.to_hex(),
    };
    Ok(CacheKey::new(kind, normalized, chain_id))
}
