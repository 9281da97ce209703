//! Static token / protocol metadata records and the classification seam.

use serde::{Deserialize, Serialize};

pub const UNKNOWN_PROTOCOL: &str = "Unknown";
pub const UNKNOWN_PROTOCOL_TYPE: &str = "unknown";

/// The result of classifying a contract address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolInfo {
    /// Protocol name or token symbol, e.g. "Uniswap V3", "USDC"
    pub name: String,
    /// Coarse category: "token", "dex", "lending", "system", ...
    pub protocol_type: String,
}

impl ProtocolInfo {
    pub fn new(name: impl Into<String>, protocol_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            protocol_type: protocol_type.into(),
        }
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN_PROTOCOL, UNKNOWN_PROTOCOL_TYPE)
    }

    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN_PROTOCOL && self.protocol_type == UNKNOWN_PROTOCOL_TYPE
    }
}

/// A token-table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    #[serde(default = "default_symbol")]
    pub symbol: String,
    #[serde(default)]
    pub decimals: u8,
    #[serde(default)]
    pub chain: String,
    #[serde(rename = "type", default = "default_token_type")]
    pub category: String,
}

impl TokenMetadata {
    /// Scale a raw on-chain amount by the token's decimals.
    pub fn to_display_amount(&self, raw: u128) -> f64 {
        if self.decimals == 0 {
            return raw as f64;
        }
        raw as f64 / 10f64.powi(i32::from(self.decimals))
    }
}

/// A protocol-table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolMetadata {
    #[serde(default = "default_protocol")]
    pub protocol: String,
    #[serde(rename = "type", default = "default_protocol_type")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
}

fn default_symbol() -> String {
    "Token".to_string()
}
fn default_token_type() -> String {
    "token".to_string()
}
fn default_protocol() -> String {
    UNKNOWN_PROTOCOL.to_string()
}
fn default_protocol_type() -> String {
    UNKNOWN_PROTOCOL_TYPE.to_string()
}

/// Maps a contract address to its protocol identity.
///
/// Implementations must be pure and total: the same address always yields
/// the same answer, and unknown addresses yield `ProtocolInfo::unknown()`.
pub trait AddressClassifier: Send + Sync {
    fn classify(&self, address: &str) -> ProtocolInfo;
}
