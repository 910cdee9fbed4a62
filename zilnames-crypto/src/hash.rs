//! Keccak-256 namehash.
//!
//! ```text
//! namehash("")            = 0x00 * 32
//! namehash(label . rest)  = keccak256(namehash(rest) || keccak256(label))
//! ```
//!
//! Labels are processed right to left, starting from the zero root node.

use sha3::{Digest, Keccak256};

use zilnames_core::constants::NODE_SIZE;
use zilnames_core::{Name, Node};

// ═══════════════════════════════════════════════════════════════════════════════
// PRIMITIVES
// ═══════════════════════════════════════════════════════════════════════════════

/// Keccak-256 of arbitrary bytes.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Keccak-256 of a single label.
pub fn labelhash(label: &str) -> [u8; 32] {
    keccak256(label.as_bytes())
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAMEHASH
// ═══════════════════════════════════════════════════════════════════════════════

/// Computes the resolver node for a normalized name.
///
/// Normalization happens in [`Name::parse`]; an un-normalizable string never
/// becomes a `Name`, so this function is total.
///
/// # Example
///
/// ```rust
/// use zilnames_core::Name;
/// use zilnames_crypto::namehash;
///
/// let node = namehash(&Name::parse("darthgus.zil").unwrap());
/// assert_eq!(node, namehash(&Name::parse("DarthGus.zil").unwrap()));
/// ```
pub fn namehash(name: &Name) -> Node {
    namehash_str(name.as_str())
}

/// Namehash over a raw string, labels hashed exactly as given.
///
/// Used for synthetic names (reverse namespaces) whose labels must not be
/// case-folded. The empty string hashes to the root node.
pub fn namehash_str(name: &str) -> Node {
    let mut node = [0u8; NODE_SIZE];

    if name.is_empty() {
        return Node::from_array(node);
    }

    for label in name.rsplit('.') {
        let mut combined = [0u8; NODE_SIZE * 2];
        combined[..NODE_SIZE].copy_from_slice(&node);
        combined[NODE_SIZE..].copy_from_slice(&labelhash(label));
        node = keccak256(&combined);
    }

    Node::from_array(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn hash(name: &str) -> String {
        namehash(&Name::parse(name).unwrap()).to_hex()
    }

    #[test]
    fn test_keccak_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_empty_name_is_root() {
        assert_eq!(namehash_str(""), Node::ROOT);
    }

    // EIP-137 reference vectors plus the reverse namespaces used on Zilliqa
    #[test_case("eth", "0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae")]
    #[test_case("foo.eth", "0xde9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f")]
    #[test_case("addr.reverse", "0x91d1777781884d03a6757a803996e38de2a42967fb37eeaca72729271025a9e2")]
    #[test_case("80002105.reverse", "0x08d9b0993eb8c4da57c37a4b84a6e384c2623114ff4e9370ed51c9b8935109ba")]
    #[test_case("zil", "0xd81bbfcee722494b885e891546eeac23d0eedcd44038d7a2f6ef9ec2f9e0d239")]
    #[test_case("darthgus.zil", "0xdd7dbdf72220f8e7622db633749224d3bf833f6f5ee1563c4b72f222def28c15")]
    fn test_golden_vectors(name: &str, expected: &str) {
        assert_eq!(hash(name), expected);
    }

    #[test]
    fn test_distinct_names_distinct_nodes() {
        assert_ne!(hash("a.zil"), hash("b.zil"));
        assert_ne!(hash("a.zil"), hash("a.test.zil"));
        assert_eq!(hash("a.zil"), "0xf1493e7c57ddfa384133b81ab6a5e479f20cfa5e44ad9a503413a5a6a0ecbc06");
        assert_eq!(hash("a.test.zil"), "0x6b96e1bae693e35aebfc247a9cae1b171cd61181869499fede0fc43174cf2439");
    }

    #[test]
    fn test_normalized_spellings_agree() {
        assert_eq!(hash("DarthGus.ZIL"), hash("darthgus.zil"));
        assert_eq!(hash("  darthgus.zil "), hash("darthgus.zil"));
    }

    #[test]
    fn test_raw_variant_does_not_fold_case() {
        assert_ne!(namehash_str("ABC.reverse"), namehash_str("abc.reverse"));
    }

    proptest! {
        #[test]
        fn prop_namehash_is_deterministic(label in "[a-z0-9]{1,20}") {
            let name = Name::parse(&format!("{label}.zil")).unwrap();
            prop_assert_eq!(namehash(&name), namehash(&name.clone()));
        }

        #[test]
        fn prop_parent_differs_from_child(label in "[a-z0-9]{1,20}") {
            let child = Name::parse(&format!("{label}.zil")).unwrap();
            prop_assert_ne!(namehash(&child), namehash_str("zil"));
        }
    }
}
