//! Namehash nodes.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::NODE_SIZE;
use crate::error::{Result, ZilnamesError};

/// A 32-byte resolver storage key produced by namehash.
///
/// Nodes are opaque: they are never decoded back into a name or address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Node([u8; NODE_SIZE]);

impl Node {
    /// The all-zero root node that namehash starts from.
    pub const ROOT: Node = Node([0u8; NODE_SIZE]);

    /// Wraps raw bytes.
    pub const fn from_array(bytes: [u8; NODE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parses 64 hex digits, with or without `0x`.
    pub fn from_hex(input: &str) -> Result<Self> {
        let digits = input.strip_prefix("0x").unwrap_or(input);
        let mut bytes = [0u8; NODE_SIZE];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| ZilnamesError::ValidationError(format!("invalid node hex: {e}")))?;
        Ok(Self(bytes))
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; NODE_SIZE] {
        &self.0
    }

    /// `0x`-prefixed lower-case hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.to_hex())
    }
}

impl From<[u8; NODE_SIZE]> for Node {
    fn from(bytes: [u8; NODE_SIZE]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Node::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
