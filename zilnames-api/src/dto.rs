//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

use zilnames_core::types::{Address, Name, NetworkConfig, Resolution, ResolutionStatus};
use zilnames_resolver::{Profile, ResolverCacheStats};

/// Query parameters shared by every lookup.
#[derive(Debug, Default, Deserialize)]
pub struct LookupQuery {
    /// Network to resolve on
    pub chain_id: Option<u64>,
    /// Invalidate any cached result first
    #[serde(default)]
    pub refresh: bool,
}

/// One lookup in the `{ value, isLoading, error }` shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResponse<T> {
    /// found / not_found / unsupported / failed
    pub status: ResolutionStatus,
    /// Record value when found
    pub value: Option<T>,
    /// Responses are sent once the lookup settles
    pub is_loading: bool,
    /// Failure reason when failed
    pub error: Option<String>,
    /// Network the lookup ran against
    pub chain_id: u64,
}

impl<T> ResolutionResponse<T> {
    /// Builds a response from a settled resolution.
    pub fn new(resolution: Resolution<T>, chain_id: u64) -> Self {
        let status = resolution.status();
        let error = resolution.error().map(ToString::to_string);
        Self {
            status,
            value: resolution.into_value(),
            is_loading: false,
            error,
            chain_id,
        }
    }
}

/// Forward lookup response.
pub type AddressResponse = ResolutionResponse<Address>;

/// Reverse lookup response.
pub type NameResponse = ResolutionResponse<Name>;

/// Avatar lookup response.
pub type AvatarResponse = ResolutionResponse<String>;

/// Name and avatar for an address.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// Queried address, canonical form
    pub address: String,
    /// Network the lookups ran against
    pub chain_id: u64,
    /// Reverse record
    pub name: NameResponse,
    /// Avatar of the reverse record's name
    pub avatar: AvatarResponse,
}

impl ProfileResponse {
    /// Builds a response from a resolved profile.
    pub fn new(address: String, profile: Profile, chain_id: u64) -> Self {
        Self {
            address,
            chain_id,
            name: ResolutionResponse::new(profile.name, chain_id),
            avatar: ResolutionResponse::new(profile.avatar, chain_id),
        }
    }
}

/// One supported network.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDto {
    /// EVM chain id
    pub chain_id: u64,
    /// Display name
    pub name: String,
    /// Name suffix owned by the network
    pub suffix: String,
    /// Configured JSON-RPC endpoint
    pub rpc_url: String,
    /// Resolver contract
    pub resolver_address: String,
    /// Reverse-record coin type (hex)
    pub coin_type: String,
}

impl From<&NetworkConfig> for NetworkDto {
    fn from(config: &NetworkConfig) -> Self {
        let network = config.network;
        Self {
            chain_id: network.chain_id(),
            name: network.display_name().into(),
            suffix: network.name_suffix().into(),
            rpc_url: config.rpc_url.clone(),
            resolver_address: network.resolver_address().into(),
            coin_type: format!("0x{:X}", network.coin_type()),
        }
    }
}

/// Response listing supported networks.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworksResponse {
    /// Chain id used when a request names none
    pub default_chain_id: u64,
    /// Every supported network
    pub networks: Vec<NetworkDto>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Chain id used when a request names none
    pub default_chain_id: u64,
    /// Cache statistics per lookup kind
    pub cache: ResolverCacheStats,
}
