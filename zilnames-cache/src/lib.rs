//! Query cache for Zilnames resolutions.
//!
//! Results are keyed by `(kind, normalized input, chain id)`. Concurrent
//! requests for the same key share one in-flight fetch.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;

pub use cache::{CacheConfig, CacheKey, CacheStats, QueryCache, QueryKind, QueryState};
