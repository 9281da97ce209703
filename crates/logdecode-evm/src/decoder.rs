//! `EvmLogDecoder`: the `LogDecoder` implementation for EVM chains.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, I256, U256};
use indexmap::IndexMap;
use logdecode_core::{
    decoder::LogDecoder,
    event::{DecodedEvent, EventSignature, RawLog},
    spec::{EventSpec, SignatureLookup},
    types::{DecodedValue, ParamType},
};
use tracing::{debug, trace};

use crate::{normalizer, words};

/// The EVM log decoder.
/// Stateless; all lookup state lives in the registry passed to `decode`.
#[derive(Debug, Default, Clone)]
pub struct EvmLogDecoder;

impl EvmLogDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Build the alloy `DynSolType` for a parameter type.
    fn param_to_dyn(ty: &ParamType) -> DynSolType {
        match ty {
            ParamType::Address => DynSolType::Address,
            ParamType::Uint(bits) => DynSolType::Uint(*bits as usize),
            ParamType::Int(bits) => DynSolType::Int(*bits as usize),
            ParamType::Bool => DynSolType::Bool,
            ParamType::FixedBytes(n) => DynSolType::FixedBytes(*n as usize),
            ParamType::Array(inner) => DynSolType::Array(Box::new(Self::param_to_dyn(inner))),
            ParamType::FixedArray(inner, len) => {
                DynSolType::FixedArray(Box::new(Self::param_to_dyn(inner)), *len)
            }
        }
    }

    /// Decode a single indexed topic.
    ///
    /// Addresses and integers are recovered from the word. Anything else is
    /// passed through as the raw word; for arrays that word is the keccak
    /// hash of the encoded value, which cannot be reversed, so it is marked
    /// `HashOnly`.
    fn decode_topic(topic: &str, ty: &ParamType) -> Result<DecodedValue, String> {
        let word = words::parse_word(topic)?;
        let value = match ty {
            ParamType::Address => {
                DecodedValue::Address(Address::from_slice(&word[12..]).to_checksum(None))
            }
            ParamType::Uint(_) => normalizer::uint_value(U256::from_be_bytes(word)),
            ParamType::Int(_) => normalizer::int_value(I256::from_raw(U256::from_be_bytes(word))),
            ParamType::Array(_) | ParamType::FixedArray(..) => {
                DecodedValue::HashOnly(words::word_hex(&word))
            }
            ParamType::Bool | ParamType::FixedBytes(_) => DecodedValue::Topic(words::word_hex(&word)),
        };
        Ok(value)
    }

    /// Decode the data blob as an ABI tuple of `types`.
    ///
    /// An empty blob stands for all-zero head words. Anything shorter than
    /// the encoding requires is an error.
    fn decode_data(data: &str, types: &[ParamType]) -> Result<Vec<DecodedValue>, String> {
        let mut bytes = words::parse_hex(data)?;
        if bytes.is_empty() {
            let len = types
                .iter()
                .try_fold(0usize, |acc, ty| acc.checked_add(ty.head_words()?))
                .and_then(|head| head.checked_mul(32))
                .ok_or("head size overflows")?;
            bytes = vec![0u8; len];
        }

        let tuple = DynSolType::Tuple(types.iter().map(Self::param_to_dyn).collect());
        let decoded = tuple
            .abi_decode_sequence(&bytes)
            .map_err(|e| e.to_string())?;

        let values = match decoded {
            DynSolValue::Tuple(vals) => vals,
            other => vec![other],
        };
        if values.len() != types.len() {
            return Err(format!(
                "expected {} values, decoded {}",
                types.len(),
                values.len()
            ));
        }
        Ok(values.into_iter().map(normalizer::normalize).collect())
    }

    /// Decode every parameter of `spec` from `log`, indexed ones first.
    fn decode_params(
        &self,
        log: &RawLog,
        spec: &EventSpec,
    ) -> Result<IndexMap<String, DecodedValue>, String> {
        let (indexed, unindexed) = spec.split_inputs(log.topics.len());
        let mut params = IndexMap::with_capacity(spec.inputs.len());

        for (i, (ty, topic)) in indexed.iter().zip(log.topics.iter().skip(1)).enumerate() {
            let value =
                Self::decode_topic(topic, ty).map_err(|e| format!("indexed param {i}: {e}"))?;
            params.insert(format!("indexed_param_{i}"), value);
        }

        if !unindexed.is_empty() {
            for (i, value) in Self::decode_data(&log.data, unindexed)?
                .into_iter()
                .enumerate()
            {
                params.insert(format!("param_{i}"), value);
            }
        }

        Ok(params)
    }
}

impl LogDecoder for EvmLogDecoder {
    fn decode(&self, log: &RawLog, registry: &dyn SignatureLookup) -> DecodedEvent {
        let Some(topic0) = log.topic0() else {
            trace!(address = %log.address, "log has no topics");
            return DecodedEvent::missing_topics();
        };

        let signature = topic0.trim().to_lowercase();
        let spec = match EventSignature::parse(&signature).and_then(|h| registry.by_hash(&h)) {
            Some(spec) => spec,
            None => {
                debug!(%signature, "no ABI spec for event");
                return DecodedEvent::unknown(signature);
            }
        };

        match self.decode_params(log, spec) {
            Ok(params) => DecodedEvent::decoded(&spec.name, signature, params),
            Err(reason) => {
                debug!(event = %spec.name, %signature, %reason, "event decode failed");
                DecodedEvent::failed(&spec.name, signature, reason)
            }
        }
    }
}
