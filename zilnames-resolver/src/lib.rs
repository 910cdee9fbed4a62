//! # Zilnames Resolver
//!
//! Forward (name → address), reverse (address → name) and avatar resolution
//! against the Zilnames resolver contract on Zilliqa.
//!
//! ```rust,ignore
//! use zilnames_resolver::ZilnameResolver;
//!
//! let resolver = ZilnameResolver::new()?;
//! let address = resolver.resolve_address("darthgus.zil", 32769).await;
//! let name = resolver.resolve_name("0xd8da6bf26964af9d7eed9e03e53415d37aa96045", 32769).await;
//! println!("{}", name.describe());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod contract;
mod resolver;
mod rpc;

pub use contract::{ContractClient, IZilnamesResolver};
pub use resolver::{Profile, ResolverCacheStats, ResolverConfig, ZilnameResolver};
pub use rpc::{HttpTransport, RpcConfig};
pub use zilnames_cache::{CacheConfig, CacheStats, QueryKind, QueryState};
pub use zilnames_ipfs::IpfsConfig;
