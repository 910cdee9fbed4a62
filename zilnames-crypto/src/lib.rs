//! # Zilnames Crypto
//!
//! Deterministic storage-key derivation for the Zilnames resolver:
//!
//! - **Namehash**: EIP-137 hierarchical hashing of a normalized [`Name`]
//! - **Reverse nodes**: ENSIP-11 `<address>.<coin type>.reverse` nodes
//!
//! Both are pure functions built on Keccak-256. They must agree bit-for-bit
//! with the on-chain resolver or lookups silently miss.
//!
//! [`Name`]: zilnames_core::Name

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod hash;
pub mod reverse;

pub use hash::{keccak256, labelhash, namehash, namehash_str};
pub use reverse::{coin_type_for_chain, reverse_label, reverse_node, reverse_node_for_chain};
