//! # Zilnames Core
//!
//! Core types, errors, and traits for resolving Zilliqa names.
//!
//! This crate provides the building blocks used by every other Zilnames crate:
//!
//! - **Types**: names, addresses, namehash nodes, the network table, resolution outcomes
//! - **Errors**: one `thiserror` hierarchy shared across the workspace
//! - **Constants**: chain ids, resolver addresses, coin types
//! - **Traits**: the contract-read transport seam
//!
//! ## Example
//!
//! ```rust
//! use zilnames_core::{Name, Network, NetworkTable};
//!
//! let name = Name::parse("DarthGus.zil").unwrap();
//! assert_eq!(name.as_str(), "darthgus.zil");
//!
//! let network = Network::infer_from_name(&name).unwrap();
//! let endpoint = NetworkTable::new().endpoint(network).unwrap();
//! assert_eq!(endpoint.network.chain_id(), 32769);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, ZilnamesError};
pub use traits::*;
pub use types::*;
