//! Event signature registry.
//!
//! Built once from an ordered list of canonical signatures. Each entry is
//! hashed with keccak-256 (the EVM topic convention) and indexed both by hash
//! and by logical name. The registry is immutable after construction, so it
//! can be shared across threads by reference without locking.

use indexmap::IndexMap;
use logdecode_core::{
    error::RegistryError,
    event::EventSignature,
    spec::{EventSpec, SignatureLookup},
    types::ParamType,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path};
use tracing::{debug, warn};

const BUILTIN_SIGNATURES: &str = include_str!("../data/signatures.yaml");

/// One entry of a signature dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEntry {
    /// Canonical signature, e.g. "Transfer(address,address,uint256)"
    pub signature: String,
    /// Logical event name, e.g. "Transfer"
    pub name: String,
    /// Optional explicit parameter types; must match `signature` when given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<String>>,
}

impl SignatureEntry {
    pub fn new(signature: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            name: name.into(),
            inputs: None,
        }
    }

    pub fn with_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = Some(inputs.into_iter().map(Into::into).collect());
        self
    }
}

/// Immutable signature registry.
#[derive(Debug, Clone, Default)]
pub struct SignatureRegistry {
    /// hash → index into `specs`
    by_hash: HashMap<EventSignature, usize>,
    /// logical name → spec, in registration order
    specs: IndexMap<String, EventSpec>,
}

impl SignatureRegistry {
    /// Build a registry from an ordered list of entries.
    ///
    /// Fails on a configuration error: a malformed signature, an unsupported
    /// parameter type, a logical name registered twice, or two distinct
    /// canonical strings sharing a hash.
    pub fn build<I>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = SignatureEntry>,
    {
        let mut registry = Self::default();

        for entry in entries {
            let (_, inputs) = parse_signature(&entry.signature)?;

            if let Some(declared) = &entry.inputs {
                let declared = declared
                    .iter()
                    .map(|ty| {
                        ParamType::parse(ty).map_err(|reason| RegistryError::InvalidType {
                            ty: ty.clone(),
                            reason,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                if declared != inputs {
                    return Err(RegistryError::InputMismatch {
                        signature: entry.signature,
                    });
                }
            }

            if registry.specs.contains_key(&entry.name) {
                return Err(RegistryError::DuplicateName { name: entry.name });
            }

            let hash = EventSignature::of(&entry.signature);
            if let Some(&existing) = registry.by_hash.get(&hash) {
                let (_, prior) = registry
                    .specs
                    .get_index(existing)
                    .ok_or_else(|| RegistryError::Parse("corrupt hash index".into()))?;
                if prior.signature != entry.signature {
                    return Err(RegistryError::HashCollision {
                        hash: hash.to_string(),
                        first: prior.signature.clone(),
                        second: entry.signature,
                    });
                }
                warn!(
                    signature = %entry.signature,
                    previous = %prior.name,
                    name = %entry.name,
                    "signature registered twice; later name wins for hash lookup"
                );
            }

            let (index, _) = registry.specs.insert_full(
                entry.name.clone(),
                EventSpec {
                    name: entry.name,
                    signature: entry.signature,
                    hash: hash.clone(),
                    inputs,
                },
            );
            registry.by_hash.insert(hash, index);
        }

        debug!(events = registry.len(), "signature registry built");
        Ok(registry)
    }

    /// The curated default signature set.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_yaml_str(BUILTIN_SIGNATURES)
    }

    /// Build from a YAML (or JSON) sequence of `SignatureEntry`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RegistryError> {
        let entries: Vec<SignatureEntry> =
            serde_yaml::from_str(yaml).map_err(|e| RegistryError::Parse(e.to_string()))?;
        Self::build(entries)
    }

    pub fn load_file(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// All registered events in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &EventSpec> {
        self.specs.values()
    }
}

impl SignatureLookup for SignatureRegistry {
    fn by_hash(&self, hash: &EventSignature) -> Option<&EventSpec> {
        let idx = *self.by_hash.get(hash)?;
        self.specs.get_index(idx).map(|(_, spec)| spec)
    }

    fn by_name(&self, name: &str) -> Option<&EventSpec> {
        self.specs.get(name)
    }
}

/// Split a canonical event signature into its name and parameter types.
///
/// Canonical means exactly what gets hashed: no whitespace, no parameter
/// names, full type names (`uint256`, not `uint`).
pub fn parse_signature(signature: &str) -> Result<(String, Vec<ParamType>), RegistryError> {
    let invalid = |reason: &str| RegistryError::InvalidSignature {
        signature: signature.to_string(),
        reason: reason.to_string(),
    };

    if signature.chars().any(char::is_whitespace) {
        return Err(invalid("canonical signatures contain no whitespace"));
    }
    let open = signature.find('(').ok_or_else(|| invalid("missing '('"))?;
    let body = signature
        .strip_suffix(')')
        .ok_or_else(|| invalid("missing closing ')'"))?;

    let name = &signature[..open];
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    {
        return Err(invalid("event name must be a plain identifier"));
    }

    let params = &body[open + 1..];
    if params.contains('(') || params.contains(')') {
        return Err(invalid("tuple parameters are not supported"));
    }
    if params.is_empty() {
        return Ok((name.to_string(), Vec::new()));
    }

    let mut types = Vec::new();
    for raw in params.split(',') {
        let ty = ParamType::parse(raw).map_err(|reason| RegistryError::InvalidType {
            ty: raw.to_string(),
            reason,
        })?;
        if ty.to_string() != raw {
            return Err(invalid(&format!("non-canonical type '{raw}' (use '{ty}')")));
        }
        types.push(ty);
    }
    Ok((name.to_string(), types))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_transfer_signature() {
        let (name, types) = parse_signature("Transfer(address,address,uint256)").unwrap();
        assert_eq!(name, "Transfer");
        assert_eq!(
            types,
            vec![ParamType::Address, ParamType::Address, ParamType::Uint(256)]
        );
    }

    #[test]
    fn parse_signature_without_params() {
        let (name, types) = parse_signature("Paused()").unwrap();
        assert_eq!(name, "Paused");
        assert!(types.is_empty());
    }

    #[test]
    fn parse_rejects_non_canonical_forms() {
        assert!(parse_signature("Transfer(address, address, uint256)").is_err());
        assert!(parse_signature("Transfer(address,address,uint)").is_err());
        assert!(parse_signature("Transfer(address indexed from)").is_err());
        assert!(parse_signature("Transfer").is_err());
        assert!(parse_signature("(address)").is_err());
        assert!(parse_signature("Swap((address,address),uint256)").is_err());
        assert!(parse_signature("Log(string)").is_err());
    }

    #[test]
    fn build_indexes_by_hash_and_name() {
        let reg = SignatureRegistry::build([
            SignatureEntry::new("Transfer(address,address,uint256)", "Transfer"),
            SignatureEntry::new("Sync(uint112,uint112)", "Sync"),
        ])
        .unwrap();
        assert_eq!(reg.len(), 2);

        let hash = EventSignature::parse(
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
        )
        .unwrap();
        let spec = reg.by_hash(&hash).unwrap();
        assert_eq!(spec.name, "Transfer");
        assert_eq!(spec.inputs.len(), 3);

        let sync = reg.by_name("Sync").unwrap();
        assert_eq!(sync.inputs, vec![ParamType::Uint(112), ParamType::Uint(112)]);
    }

    #[test]
    fn same_event_name_different_logical_names() {
        let reg = SignatureRegistry::build([
            SignatureEntry::new("Swap(address,uint256,uint256,uint256,uint256,address)", "SwapV2"),
            SignatureEntry::new("Swap(address,address,int256,int256,uint160,uint128,int24)", "SwapV3"),
        ])
        .unwrap();
        let v3 = reg
            .by_hash(&EventSignature::of(
                "Swap(address,address,int256,int256,uint160,uint128,int24)",
            ))
            .unwrap();
        assert_eq!(v3.name, "SwapV3");
        assert_eq!(v3.inputs[6], ParamType::Int(24));
    }

    #[test]
    fn duplicate_name_rejected() {
        let err = SignatureRegistry::build([
            SignatureEntry::new("Transfer(address,address,uint256)", "Transfer"),
            SignatureEntry::new("Approval(address,address,uint256)", "Transfer"),
        ])
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName { .. }));
    }

    #[test]
    fn same_signature_twice_later_name_wins_hash_lookup() {
        let sig = "Transfer(address,address,uint256)";
        let reg = SignatureRegistry::build([
            SignatureEntry::new(sig, "Transfer"),
            SignatureEntry::new(sig, "TransferErc721"),
        ])
        .unwrap();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.by_hash(&EventSignature::of(sig)).unwrap().name, "TransferErc721");
        assert_eq!(reg.by_name("Transfer").unwrap().signature, sig);
        assert_eq!(reg.by_name("TransferErc721").unwrap().signature, sig);
    }

    #[test]
    fn oversized_fixed_array_rejected() {
        let err = SignatureRegistry::build([SignatureEntry::new(
            "Big(uint256[576460752303423488])",
            "Big",
        )])
        .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidType { .. }));

        let err = SignatureRegistry::build([SignatureEntry::new(
            "Big(uint256[10000000000])",
            "Big",
        )])
        .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidType { .. }));
    }

    #[test]
    fn declared_inputs_must_match() {
        let ok = SignatureRegistry::build([SignatureEntry::new(
            "Transfer(address,address,uint256)",
            "Transfer",
        )
        .with_inputs(["address", "address", "uint256"])]);
        assert!(ok.is_ok());

        let err = SignatureRegistry::build([SignatureEntry::new(
            "Transfer(address,address,uint256)",
            "Transfer",
        )
        .with_inputs(["address", "uint256"])])
        .unwrap_err();
        assert!(matches!(err, RegistryError::InputMismatch { .. }));
    }

    #[test]
    fn builtin_dataset_loads() {
        let reg = SignatureRegistry::builtin().unwrap();
        assert_eq!(reg.len(), 20);
        let batch = reg.by_name("TransferBatch").unwrap();
        assert_eq!(
            batch.hash.as_hex(),
            "0x4a39dc06d4c0dbc64b70af90fd698a233a518aa5d07e595d983b8c0526c8f7fb"
        );
        assert!(batch.inputs[3].is_dynamic());
        // registration order is kept
        assert_eq!(reg.iter().next().unwrap().name, "Transfer");
    }

    #[test]
    fn json_dataset_accepted() {
        let reg = SignatureRegistry::from_yaml_str(
            r#"[{ "signature": "Approval(address,address,uint256)", "name": "Approval" }]"#,
        )
        .unwrap();
        assert!(reg.by_name("Approval").is_some());
    }

    #[test]
    fn malformed_dataset_is_parse_error() {
        let err = SignatureRegistry::from_yaml_str("not: [a, list").unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
    }
}
