//! Domain types for Zilnames resolution.

mod address;
mod name;
mod network;
mod node;
mod resolution;

pub use address::Address;
pub use name::Name;
pub use network::{Network, NetworkConfig, NetworkTable, ResolverEndpoint};
pub use node::Node;
pub use resolution::{Resolution, ResolutionStatus};
