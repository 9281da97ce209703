//! Event specifications and the read-only lookup seam over them.

use crate::event::EventSignature;
use crate::types::ParamType;
use serde::Serialize;

/// One registered event: its logical name, canonical signature, hash, and
/// ordered parameter types. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSpec {
    /// Logical name, e.g. "SwapV3"
    pub name: String,
    /// Canonical signature, e.g. "Swap(address,address,int256,int256,uint160,uint128,int24)"
    pub signature: String,
    pub hash: EventSignature,
    #[serde(serialize_with = "serialize_types")]
    pub inputs: Vec<ParamType>,
}

impl EventSpec {
    /// Split the parameter list for a log carrying `topic_count` topics
    /// (including topics[0]). The first `topic_count - 1` types are indexed;
    /// the rest live in the data blob.
    pub fn split_inputs(&self, topic_count: usize) -> (&[ParamType], &[ParamType]) {
        let indexed = topic_count.saturating_sub(1).min(self.inputs.len());
        self.inputs.split_at(indexed)
    }
}

fn serialize_types<S: serde::Serializer>(types: &[ParamType], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(types.iter().map(|t| t.to_string()))
}

/// A thread-safe, read-only view of the signature registry.
/// The concrete implementation lives in `logdecode-registry`.
pub trait SignatureLookup: Send + Sync {
    /// Look up an event by its signature hash (topics[0]).
    fn by_hash(&self, hash: &EventSignature) -> Option<&EventSpec>;

    /// Look up an event by its logical name.
    fn by_name(&self, name: &str) -> Option<&EventSpec>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer() -> EventSpec {
        let signature = "Transfer(address,address,uint256)".to_string();
        EventSpec {
            name: "Transfer".into(),
            hash: EventSignature::of(&signature),
            signature,
            inputs: vec![ParamType::Address, ParamType::Address, ParamType::Uint(256)],
        }
    }

    #[test]
    fn split_follows_topic_count() {
        let spec = transfer();
        let (indexed, data) = spec.split_inputs(3);
        assert_eq!(indexed.len(), 2);
        assert_eq!(data, &[ParamType::Uint(256)]);

        let (indexed, data) = spec.split_inputs(1);
        assert!(indexed.is_empty());
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn split_ignores_excess_topics() {
        let ev = transfer();
        let (indexed, data) = ev.split_inputs(6);
        assert_eq!(indexed.len(), 3);
        assert!(data.is_empty());
    }
}
