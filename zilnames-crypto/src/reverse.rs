//! Reverse-node derivation (address → name lookups).
//!
//! The reverse record for `address` on a network with coin type `c` lives at
//!
//! ```text
//! namehash("<lower-case hex address>.<label(c)>.reverse")
//! ```
//!
//! where `label(60) = "addr"` (Ethereum L1) and every other coin type is
//! written as upper-case hex (`80008001`). Labels are hashed verbatim.

use zilnames_core::constants::{ETH_COIN_TYPE, ETH_REVERSE_LABEL, EVM_COIN_TYPE_FLAG, REVERSE_TLD};
use zilnames_core::{Address, NetworkTable, Node, Result};

use crate::hash::namehash_str;

/// ENSIP-11 coin type for an EVM chain id.
pub fn coin_type_for_chain(chain_id: u64) -> u32 {
    if chain_id == 1 {
        return ETH_COIN_TYPE;
    }
    // ENSIP-11 reserves the low 31 bits for the chain id.
    EVM_COIN_TYPE_FLAG | (chain_id as u32 & !EVM_COIN_TYPE_FLAG)
}

/// Label of the reverse namespace for a coin type.
pub fn reverse_label(coin_type: u32) -> String {
    if coin_type == ETH_COIN_TYPE {
        ETH_REVERSE_LABEL.to_string()
    } else {
        format!("{coin_type:X}")
    }
}

/// Reverse node for an address under a given coin type.
pub fn reverse_node(address: &Address, coin_type: u32) -> Node {
    let name = format!(
        "{}.{}.{}",
        address.hex_digits(),
        reverse_label(coin_type),
        REVERSE_TLD
    );
    namehash_str(&name)
}

/// Reverse node for an address on a chain from the network table.
///
/// # Errors
/// `UnsupportedNetwork` when `chain_id` is not in the table.
pub fn reverse_node_for_chain(networks: &NetworkTable, address: &Address, chain_id: u64) -> Result<Node> {
    let network = networks.network(chain_id)?;
    Ok(reverse_node(address, network.coin_type()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{keccak256, labelhash};
    use zilnames_core::constants::{ZILLIQA_CHAIN_ID, ZILLIQA_TESTNET_CHAIN_ID};
    use zilnames_core::{Network, ZilnamesError};

    const ADDRESS: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

    fn address() -> Address {
        Address::parse(ADDRESS).unwrap()
    }

    #[test]
    fn test_coin_types() {
        assert_eq!(coin_type_for_chain(1), 60);
        assert_eq!(coin_type_for_chain(ZILLIQA_CHAIN_ID), 0x8000_8001);
        assert_eq!(coin_type_for_chain(8453), 0x8000_2105);
        assert_eq!(Network::Zilliqa.coin_type(), coin_type_for_chain(ZILLIQA_CHAIN_ID));
    }

    #[test]
    fn test_reverse_labels() {
        assert_eq!(reverse_label(60), "addr");
        assert_eq!(reverse_label(0x8000_8001), "80008001");
        assert_eq!(reverse_label(0x8000_814D), "8000814D");
    }

    // Golden vectors computed independently from the contract's derivation.
    #[test]
    fn test_golden_reverse_nodes() {
        let table = NetworkTable::new();

        let main = reverse_node_for_chain(&table, &address(), ZILLIQA_CHAIN_ID).unwrap();
        assert_eq!(
            main.to_hex(),
            "0x87a7a68d6d46c87d94499db18eddde76657ef350a64f03ba720eea8eeb4eaa60"
        );

        let test = reverse_node_for_chain(&table, &address(), ZILLIQA_TESTNET_CHAIN_ID).unwrap();
        assert_eq!(
            test.to_hex(),
            "0x757865da8ccd0b252a126eff0bfaea1056ad2d79cbe16d11a7c5e0056850dea3"
        );

        assert_eq!(
            reverse_node(&address(), ETH_COIN_TYPE).to_hex(),
            "0x7aef81fbd30c83431369026d62ee533af8b69f246b63d75b40fe223346e6fa9a"
        );
    }

    #[test]
    fn test_matches_two_step_construction() {
        // keccak(namehash("<label>.reverse") || keccak(hex address))
        let base = namehash_str("80002105.reverse");
        let mut combined = [0u8; 64];
        combined[..32].copy_from_slice(base.as_bytes());
        combined[32..].copy_from_slice(&labelhash(&address().hex_digits()));
        let expected = Node::from_array(keccak256(&combined));

        assert_eq!(reverse_node(&address(), 0x8000_2105), expected);
    }

    #[test]
    fn test_network_sensitivity() {
        let table = NetworkTable::new();
        let main = reverse_node_for_chain(&table, &address(), ZILLIQA_CHAIN_ID).unwrap();
        let test = reverse_node_for_chain(&table, &address(), ZILLIQA_TESTNET_CHAIN_ID).unwrap();
        assert_ne!(main, test);
    }

    #[test]
    fn test_address_case_does_not_matter() {
        let lower = Address::parse(&ADDRESS.to_lowercase()).unwrap();
        assert_eq!(reverse_node(&lower, 0x8000_8001), reverse_node(&address(), 0x8000_8001));
    }

    #[test]
    fn test_unsupported_chain() {
        let table = NetworkTable::new();
        assert_eq!(
            reverse_node_for_chain(&table, &address(), 999_999),
            Err(ZilnamesError::UnsupportedNetwork(999_999))
        );
    }
}
