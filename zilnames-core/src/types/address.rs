//! Account addresses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::ADDRESS_SIZE;
use crate::error::{Result, ZilnamesError};

/// A 20-byte EVM account address.
///
/// The only accepted textual form is `0x` followed by 40 hex digits. Digits
/// are case-insensitive on input; no checksum is verified. [`Display`] and
/// [`Address::to_hex`] always produce the lower-cased form, which is what
/// cache keys and reverse nodes are built from.
///
/// [`Display`]: fmt::Display
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    /// The all-zero address, returned by resolvers for unset records.
    pub const ZERO: Address = Address([0u8; ADDRESS_SIZE]);

    /// Wraps raw bytes.
    pub const fn from_array(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a byte slice of exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; ADDRESS_SIZE] = bytes.try_into().map_err(|_| {
            ZilnamesError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    /// Parses the canonical `0x`-prefixed hex form.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .ok_or_else(|| ZilnamesError::InvalidAddress(format!("missing 0x prefix: {trimmed}")))?;

        if digits.len() != ADDRESS_SIZE * 2 {
            return Err(ZilnamesError::InvalidAddress(format!(
                "expected {} hex digits, got {}",
                ADDRESS_SIZE * 2,
                digits.len()
            )));
        }

        let mut bytes = [0u8; ADDRESS_SIZE];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| ZilnamesError::InvalidAddress(format!("{trimmed}: {e}")))?;
        Ok(Self(bytes))
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    /// Returns true for the zero address.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Lower-cased hex digits without the `0x` prefix.
    pub fn hex_digits(&self) -> String {
        hex::encode(self.0)
    }

    /// Canonical lower-cased form with `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", self.hex_digits())
    }

    /// Shortened form for display, e.g. `0xd8da...6045`.
    pub fn short(&self) -> String {
        let full = self.to_hex();
        format!("{}...{}", &full[..6], &full[full.len() - 4..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = ZilnamesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const VITALIK: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

    #[test]
    fn test_parse_mixed_case_normalizes() {
        let address = Address::parse(VITALIK).unwrap();
        assert_eq!(address.to_hex(), "0xd8da6bf26964af9d7eed9e03e53415d37aa96045");
        assert_eq!(address.hex_digits(), "d8da6bf26964af9d7eed9e03e53415d37aa96045");
    }

    #[test]
    fn test_case_insensitive_equality() {
        let upper = Address::parse(&VITALIK.to_uppercase().replacen("0X", "0x", 1)).unwrap();
        let lower = Address::parse(&VITALIK.to_lowercase()).unwrap();
        assert_eq!(upper, lower);
    }

    #[test_case("" ; "empty")]
    #[test_case("d8da6bf26964af9d7eed9e03e53415d37aa96045" ; "missing prefix")]
    #[test_case("0xd8da6bf26964af9d7eed9e03e53415d37aa9604" ; "too short")]
    #[test_case("0xd8da6bf26964af9d7eed9e03e53415d37aa960450" ; "too long")]
    #[test_case("0xz8da6bf26964af9d7eed9e03e53415d37aa96045" ; "non hex")]
    fn test_parse_rejects(input: &str) {
        assert!(matches!(
            Address::parse(input),
            Err(ZilnamesError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::parse(VITALIK).unwrap().is_zero());
    }

    #[test]
    fn test_short_form() {
        let address = Address::parse(VITALIK).unwrap();
        assert_eq!(address.short(), "0xd8da...6045");
    }

    #[test]
    fn test_serde_uses_canonical_form() {
        let address = Address::parse(VITALIK).unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"0xd8da6bf26964af9d7eed9e03e53415d37aa96045\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
