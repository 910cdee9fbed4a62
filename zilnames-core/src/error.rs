//! Error types for Zilnames.
//!
//! One error hierarchy for every crate in the workspace, built with `thiserror`.
//! Errors are `Clone` because failed resolutions are cached and shared between
//! every caller waiting on the same query.

use thiserror::Error;

/// Result type alias using `ZilnamesError`.
pub type Result<T> = std::result::Result<T, ZilnamesError>;

/// Main error type for all Zilnames operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ZilnamesError {
    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The caller supplied an empty or whitespace-only input.
    #[error("empty input")]
    EmptyInput,

    /// The name failed normalization or validation.
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// The address is not `0x` followed by 40 hex digits.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Generic validation failure.
    #[error("Validation error: {0}")]
    ValidationError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The chain id is not in the configured network table.
    #[error("unsupported network: chain id {0}")]
    UnsupportedNetwork(u64),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONTRACT CALL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request or response body failed.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    RpcError {
        /// JSON-RPC error code
        code: i64,
        /// Human-readable reason from the node
        message: String,
    },

    /// The resolver contract reverted.
    #[error("contract call reverted: {0}")]
    ContractReverted(String),

    /// The return data could not be ABI-decoded.
    #[error("failed to decode contract response: {0}")]
    DecodeError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION & INTERNAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ZilnamesError {
    /// Returns true if this error was raised before any network access.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            ZilnamesError::EmptyInput
                | ZilnamesError::InvalidName(_)
                | ZilnamesError::InvalidAddress(_)
                | ZilnamesError::ValidationError(_)
        )
    }

    /// Returns true if this error came out of a contract read.
    pub fn is_contract_call_error(&self) -> bool {
        matches!(
            self,
            ZilnamesError::HttpError(_)
                | ZilnamesError::RpcError { .. }
                | ZilnamesError::ContractReverted(_)
                | ZilnamesError::DecodeError(_)
        )
    }

    /// Returns true if retrying the same request could succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ZilnamesError::HttpError(_) | ZilnamesError::RpcError { .. }
        )
    }
}

impl From<serde_json::Error> for ZilnamesError {
    fn from(err: serde_json::Error) -> Self {
        ZilnamesError::DecodeError(err.to_string())
    }
}

impl From<hex::FromHexError> for ZilnamesError {
    fn from(err: hex::FromHexError) -> Self {
        ZilnamesError::DecodeError(format!("invalid hex: {err}"))
    }
}
