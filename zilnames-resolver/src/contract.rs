//! Typed reads against the resolver contract.
//!
//! Calls are ABI-encoded with `alloy`'s `sol!` bindings and sent through an
//! [`RpcTransport`]. Each read is exactly one `eth_call`.

use std::sync::Arc;

use alloy::primitives::B256;
use alloy::sol;
use alloy::sol_types::SolCall;
use tracing::{debug, instrument, warn};

use zilnames_core::error::{Result, ZilnamesError};
use zilnames_core::traits::RpcTransport;
use zilnames_core::types::{Address, Node, ResolverEndpoint};

sol! {
    /// Read-only surface of the Zilnames public resolver.
    interface IZilnamesResolver {
        function addr(bytes32 node) external view returns (address);
        function name(bytes32 node) external view returns (string);
        function text(bytes32 node, string key) external view returns (string);
    }
}

/// Contract read client.
#[derive(Clone)]
pub struct ContractClient {
    transport: Arc<dyn RpcTransport>,
}

impl ContractClient {
    /// Creates a client over a transport.
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    /// `addr(node)`: the address record, zero when unset.
    #[instrument(skip(self, endpoint), fields(network = %endpoint.network))]
    pub async fn addr(&self, endpoint: &ResolverEndpoint, node: Node) -> Result<Address> {
        let call = IZilnamesResolver::addrCall {
            node: B256::from(*node.as_bytes()),
        };
        let raw = self.call(endpoint, call.abi_encode()).await?;
        let ret = IZilnamesResolver::addrCall::abi_decode_returns(&raw, true)
            .map_err(|e| ZilnamesError::DecodeError(format!("addr: {e}")))?;
        Ok(Address::from_array(ret._0.0 .0))
    }

    /// `name(node)`: the reverse record, empty when unset.
    #[instrument(skip(self, endpoint), fields(network = %endpoint.network))]
    pub async fn name(&self, endpoint: &ResolverEndpoint, node: Node) -> Result<String> {
        let call = IZilnamesResolver::nameCall {
            node: B256::from(*node.as_bytes()),
        };
        let raw = self.call(endpoint, call.abi_encode()).await?;
        let ret = IZilnamesResolver::nameCall::abi_decode_returns(&raw, true)
            .map_err(|e| ZilnamesError::DecodeError(format!("name: {e}")))?;
        Ok(ret._0)
    }

    /// `text(node, key)`: a text record, empty when unset.
    #[instrument(skip(self, endpoint), fields(network = %endpoint.network))]
    pub async fn text(&self, endpoint: &ResolverEndpoint, node: Node, key: &str) -> Result<String> {
        let call = IZilnamesResolver::textCall {
            node: B256::from(*node.as_bytes()),
            key: key.to_string(),
        };
        let raw = self.call(endpoint, call.abi_encode()).await?;
        let ret = IZilnamesResolver::textCall::abi_decode_returns(&raw, true)
            .map_err(|e| ZilnamesError::DecodeError(format!("text: {e}")))?;
        Ok(ret._0)
    }

    async fn call(&self, endpoint: &ResolverEndpoint, data: Vec<u8>) -> Result<Vec<u8>> {
        let raw = self
            .transport
            .eth_call(&endpoint.rpc_url, endpoint.contract_address, data)
            .await
            .inspect_err(|e| warn!(error = %e, rpc_url = %endpoint.rpc_url, "Contract read failed"))?;

        // No code at the address answers with empty data instead of reverting
        if raw.is_empty() {
            warn!(contract = %endpoint.contract_address, "Contract returned no data");
            return Err(ZilnamesError::DecodeError("empty return data".into()));
        }

        debug!(len = raw.len(), "Contract read returned");
        Ok(raw)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use zilnames_core::NetworkTable;

    /// ABI word holding a left-padded address.
    pub(crate) fn address_word(address: &Address) -> Vec<u8> {
        let mut word = vec![0u8; 32];
        word[12..].copy_from_slice(address.as_bytes());
        word
    }

    /// ABI encoding of a single `string` return value.
    pub(crate) fn string_return(value: &str) -> Vec<u8> {
        let bytes = value.as_bytes();
        let padded = bytes.len().div_ceil(32) * 32;
        let mut out = vec![0u8; 64 + padded];
        out[31] = 0x20;
        out[56..64].copy_from_slice(&(bytes.len() as u64).to_be_bytes());
        out[64..64 + bytes.len()].copy_from_slice(bytes);
        out
    }

    struct Fixed(Result<Vec<u8>>);

    #[async_trait]
    impl RpcTransport for Fixed {
        async fn eth_call(&self, _: &str, _: Address, _: Vec<u8>) -> Result<Vec<u8>> {
            self.0.clone()
        }
    }

    fn client(response: Result<Vec<u8>>) -> ContractClient {
        ContractClient::new(Arc::new(Fixed(response)))
    }

    fn endpoint() -> ResolverEndpoint {
        NetworkTable::new().resolver_for(32769).unwrap()
    }

    #[test]
    fn test_selectors_match_resolver_abi() {
        assert_eq!(IZilnamesResolver::addrCall::SELECTOR, [0x3b, 0x3b, 0x57, 0xde]);
        assert_eq!(IZilnamesResolver::nameCall::SELECTOR, [0x69, 0x1f, 0x34, 0x31]);
        assert_eq!(IZilnamesResolver::textCall::SELECTOR, [0x59, 0xd1, 0xd4, 0x3c]);
    }

    #[test]
    fn test_addr_call_layout() {
        let node = Node::from_array([7u8; 32]);
        let data = IZilnamesResolver::addrCall {
            node: B256::from(*node.as_bytes()),
        }
        .abi_encode();
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(&data[4..], node.as_bytes());
    }

    #[test]
    fn test_decode_address() {
        let expected = Address::parse("0xd8da6bf26964af9d7eed9e03e53415d37aa96045").unwrap();
        let got = tokio_test::block_on(
            client(Ok(address_word(&expected))).addr(&endpoint(), Node::ROOT),
        )
        .unwrap();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_decode_strings() {
        let got = tokio_test::block_on(
            client(Ok(string_return("darthgus.zil"))).name(&endpoint(), Node::ROOT),
        )
        .unwrap();
        assert_eq!(got, "darthgus.zil");

        let long = "ipfs://".to_string() + &"a".repeat(70);
        let got = tokio_test::block_on(
            client(Ok(string_return(&long))).text(&endpoint(), Node::ROOT, "avatar"),
        )
        .unwrap();
        assert_eq!(got, long);

        let empty = tokio_test::block_on(client(Ok(string_return(""))).name(&endpoint(), Node::ROOT)).unwrap();
        assert_eq!(empty, "");
    }

    #[test]
    fn test_empty_return_is_decode_error() {
        let err = tokio_test::block_on(client(Ok(vec![])).addr(&endpoint(), Node::ROOT)).unwrap_err();
        assert!(matches!(err, ZilnamesError::DecodeError(_)));
    }

    #[test]
    fn test_truncated_return_is_decode_error() {
        let err = tokio_test::block_on(client(Ok(vec![0u8; 16])).name(&endpoint(), Node::ROOT)).unwrap_err();
        assert!(matches!(err, ZilnamesError::DecodeError(_)));
    }

    #[test]
    fn test_transport_error_propagates() {
        let err = tokio_test::block_on(
            client(Err(ZilnamesError::HttpError("connection refused".into()))).addr(&endpoint(), Node::ROOT),
        )
        .unwrap_err();
        assert_eq!(err, ZilnamesError::HttpError("connection refused".into()));
    }
}
