//! Hex identifiers accepted from players and the sloot provider.
//!
//! Both newtypes are valid by construction:
//! - `WalletAddress` is `0x` followed by exactly 40 hex digits
//! - `StartingSeed` is `0x` followed by 1..=128 hex digits (a cast message hash)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

const ADDRESS_HEX_DIGITS: usize = 40;
const MAX_SEED_HEX_DIGITS: usize = 128;

fn hex_body(value: &str) -> Option<&str> {
    let body = value.strip_prefix("0x")?;
    if body.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(body)
    } else {
        None
    }
}

// ============================================================================
// WalletAddress
// ============================================================================

/// An Ethereum-style address used to look up sloot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Parse an address.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless the value is `0x` followed by
    /// exactly 40 hex digits.
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        match hex_body(&value) {
            Some(body) if body.len() == ADDRESS_HEX_DIGITS => Ok(Self(value)),
            _ => Err(DomainError::validation("Invalid address provided")),
        }
    }

    /// Address for 20 raw bytes, rendered as lowercase hex.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<WalletAddress> for String {
    fn from(address: WalletAddress) -> String {
        address.0
    }
}

// ============================================================================
// StartingSeed
// ============================================================================

/// The message hash a session's player character is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StartingSeed(String);

impl StartingSeed {
    /// Parse a starting seed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the value is not `0x` followed by
    /// between 1 and 128 hex digits.
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        match hex_body(&value) {
            Some(body) if !body.is_empty() && body.len() <= MAX_SEED_HEX_DIGITS => Ok(Self(value)),
            _ => Err(DomainError::validation(
                "messageHash must be 0x followed by hex digits",
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StartingSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for StartingSeed {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<StartingSeed> for String {
    fn from(seed: StartingSeed) -> String {
        seed.0
    }
}
