//! Raw log input, event signature hashes, and decoded event records.

use crate::error::DecodeIssue;
use crate::types::DecodedValue;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use tiny_keccak::{Hasher, Keccak};

/// Event name reported when a log cannot be identified.
pub const UNKNOWN_EVENT: &str = "Unknown";

/// A raw, undecoded log as supplied by the caller.
///
/// Provenance fields are opaque: whatever JSON value arrived (hex string,
/// number, or nothing) is carried through to the output untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLog {
    /// Emitting contract, hex
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    /// topics[0] is the event signature hash; topics[1..] are indexed params
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    /// ABI-encoded non-indexed params, hex with or without `0x`
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: String,
    #[serde(default)]
    pub transaction_hash: serde_json::Value,
    #[serde(default)]
    pub block_number: serde_json::Value,
    #[serde(default)]
    pub log_index: serde_json::Value,
}

impl RawLog {
    pub fn topic0(&self) -> Option<&str> {
        self.topics.first().map(|s| s.as_str())
    }

    /// The emitting address in its canonical lookup form (trimmed, lower-case).
    pub fn contract_address(&self) -> String {
        self.address.trim().to_lowercase()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keccak-256 of a canonical event signature, `0x`-prefixed lower-case hex.
/// This is the lookup key for event identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EventSignature(String);

impl EventSignature {
    /// Hash a canonical signature string such as `"Transfer(address,address,uint256)"`.
    pub fn of(canonical: &str) -> Self {
        let mut hasher = Keccak::v256();
        let mut output = [0u8; 32];
        hasher.update(canonical.as_bytes());
        hasher.finalize(&mut output);
        Self::from_bytes(output)
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }

    /// Normalise a topic string into a signature key.
    /// Returns `None` unless the topic is exactly 32 bytes of hex.
    pub fn parse(topic: &str) -> Option<Self> {
        let hex = topic.trim();
        let hex = hex
            .strip_prefix("0x")
            .or_else(|| hex.strip_prefix("0X"))
            .unwrap_or(hex);
        if hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Self(format!("0x{}", hex.to_ascii_lowercase())))
        } else {
            None
        }
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The decoder's verdict on one log.
///
/// Every log produces one of these, including logs that could not be
/// identified or decoded; `issue` then says why.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedEvent {
    /// Logical event name, or `"Unknown"`
    pub event_name: String,
    /// Lower-cased topics[0], absent when the log has no topics
    pub event_signature: Option<String>,
    /// Positional params: `indexed_param_N` first, then `param_N`
    pub decoded_data: Option<IndexMap<String, DecodedValue>>,
    #[serde(skip)]
    pub issue: Option<DecodeIssue>,
}

impl DecodedEvent {
    pub fn missing_topics() -> Self {
        Self {
            event_name: UNKNOWN_EVENT.to_string(),
            event_signature: None,
            decoded_data: None,
            issue: Some(DecodeIssue::MissingTopics),
        }
    }

    pub fn unknown(signature: impl Into<String>) -> Self {
        Self {
            event_name: UNKNOWN_EVENT.to_string(),
            event_signature: Some(signature.into()),
            decoded_data: None,
            issue: Some(DecodeIssue::UnknownSignature),
        }
    }

    pub fn failed(
        name: impl Into<String>,
        signature: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            event_name: name.into(),
            event_signature: Some(signature.into()),
            decoded_data: None,
            issue: Some(DecodeIssue::failure(reason)),
        }
    }

    pub fn decoded(
        name: impl Into<String>,
        signature: impl Into<String>,
        params: IndexMap<String, DecodedValue>,
    ) -> Self {
        Self {
            event_name: name.into(),
            event_signature: Some(signature.into()),
            decoded_data: Some(params),
            issue: None,
        }
    }

    /// Human-readable diagnostic, if decoding did not fully succeed.
    pub fn note(&self) -> Option<String> {
        self.issue.as_ref().map(|i| i.to_string())
    }

    /// Look up a decoded parameter by its positional name.
    pub fn param(&self, name: &str) -> Option<&DecodedValue> {
        self.decoded_data.as_ref()?.get(name)
    }

    pub fn is_unknown(&self) -> bool {
        self.event_name == UNKNOWN_EVENT
    }
}
