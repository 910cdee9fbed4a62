//! # Zilnames IPFS
//!
//! Rewrites `ipfs://` avatar records to HTTP gateway URLs.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod gateway;

pub use gateway::{is_ipfs_url, parse_ipfs_url, IpfsConfig, IpfsGateway, IpfsPath};
