//! Protocol constants for Zilnames.
//!
//! Chain ids, deployed resolver addresses and RPC endpoints for the two
//! supported Zilliqa networks, plus ENS-derived sizes and record keys.

// ═══════════════════════════════════════════════════════════════════════════════
// SIZES
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of an account address in bytes (20 bytes = 160 bits).
pub const ADDRESS_SIZE: usize = 20;

/// Size of a namehash node (keccak256 output).
pub const NODE_SIZE: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// ZILLIQA MAINNET
// ═══════════════════════════════════════════════════════════════════════════════

/// Zilliqa mainnet EVM chain id.
pub const ZILLIQA_CHAIN_ID: u64 = 32769;

/// Default public RPC endpoint for Zilliqa mainnet.
pub const ZILLIQA_RPC_URL: &str = "https://api.zilliqa.com/";

/// L2 resolver contract on Zilliqa mainnet.
pub const ZILLIQA_RESOLVER_ADDRESS: &str = "0x5c0c7BFd25efCAE366fE62219fD5558305Ffc46F";

/// ENSIP-11 coin type for Zilliqa mainnet (`0x80000000 | 32769`).
pub const ZILLIQA_COIN_TYPE: u32 = 0x8000_8001;

/// Name suffix that identifies a mainnet name.
pub const ZILLIQA_NAME_SUFFIX: &str = "zil";

// ═══════════════════════════════════════════════════════════════════════════════
// ZILLIQA TESTNET
// ═══════════════════════════════════════════════════════════════════════════════

/// Zilliqa testnet EVM chain id.
pub const ZILLIQA_TESTNET_CHAIN_ID: u64 = 33101;

/// Default public RPC endpoint for Zilliqa testnet.
pub const ZILLIQA_TESTNET_RPC_URL: &str = "https://api.testnet.zilliqa.com/";

/// L2 resolver contract on Zilliqa testnet.
pub const ZILLIQA_TESTNET_RESOLVER_ADDRESS: &str = "0x579C72c5377a5a4A8Ce6d43A1701F389c8FDFC8e";

/// Coin type the testnet resolver files reverse records under.
///
/// The deployed testnet resolver was seeded with the `80002105.reverse`
/// namespace rather than the ENSIP-11 value for 33101 (`0x8000814D`).
pub const ZILLIQA_TESTNET_COIN_TYPE: u32 = 0x8000_2105;

/// Name suffix that identifies a testnet name.
pub const ZILLIQA_TESTNET_NAME_SUFFIX: &str = "test.zil";

// ═══════════════════════════════════════════════════════════════════════════════
// REVERSE RESOLUTION
// ═══════════════════════════════════════════════════════════════════════════════

/// ENSIP-11 flag OR-ed into an EVM chain id to form its coin type.
pub const EVM_COIN_TYPE_FLAG: u32 = 0x8000_0000;

/// SLIP-44 coin type of Ethereum L1, which reverses under `addr.reverse`.
pub const ETH_COIN_TYPE: u32 = 60;

/// Label used for the Ethereum L1 reverse namespace.
pub const ETH_REVERSE_LABEL: &str = "addr";

/// Top-level label of every reverse namespace.
pub const REVERSE_TLD: &str = "reverse";

// ═══════════════════════════════════════════════════════════════════════════════
// TEXT RECORDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Text record key holding a profile picture URL.
pub const AVATAR_TEXT_KEY: &str = "avatar";

// ═══════════════════════════════════════════════════════════════════════════════
// IPFS
// ═══════════════════════════════════════════════════════════════════════════════

/// URI scheme of content-addressed avatar records.
pub const IPFS_SCHEME: &str = "ipfs";

/// Gateway that `ipfs://` URLs are rewritten to by default.
pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io/ipfs";
