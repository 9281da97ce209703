//! Address → protocol classification over static metadata tables.

use logdecode_core::{
    error::RegistryError,
    metadata::{AddressClassifier, ProtocolInfo, ProtocolMetadata, TokenMetadata},
};
use serde::Deserialize;
use std::{collections::HashMap, path::Path};
use tracing::debug;

const BUILTIN_METADATA: &str = include_str!("../data/metadata.yaml");

#[derive(Debug, Default, Deserialize)]
struct MetadataFile {
    #[serde(default)]
    tokens: HashMap<String, TokenMetadata>,
    #[serde(default)]
    protocols: HashMap<String, ProtocolMetadata>,
}

/// Read-only token and protocol tables keyed by lower-cased address.
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    tokens: HashMap<String, TokenMetadata>,
    protocols: HashMap<String, ProtocolMetadata>,
}

impl AddressBook {
    pub fn new<T, P>(tokens: T, protocols: P) -> Self
    where
        T: IntoIterator<Item = (String, TokenMetadata)>,
        P: IntoIterator<Item = (String, ProtocolMetadata)>,
    {
        let book = Self {
            tokens: tokens
                .into_iter()
                .map(|(addr, meta)| (canonical(&addr), meta))
                .collect(),
            protocols: protocols
                .into_iter()
                .map(|(addr, meta)| (canonical(&addr), meta))
                .collect(),
        };
        debug!(
            tokens = book.tokens.len(),
            protocols = book.protocols.len(),
            "address book built"
        );
        book
    }

    /// The curated default token and protocol tables.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_yaml_str(BUILTIN_METADATA)
    }

    /// Parse a `{ tokens: {..}, protocols: {..} }` document (YAML or JSON).
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RegistryError> {
        let file: MetadataFile =
            serde_yaml::from_str(yaml).map_err(|e| RegistryError::Parse(e.to_string()))?;
        Ok(Self::new(file.tokens, file.protocols))
    }

    pub fn load_file(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn token(&self, address: &str) -> Option<&TokenMetadata> {
        self.tokens.get(&canonical(address))
    }

    pub fn protocol(&self, address: &str) -> Option<&ProtocolMetadata> {
        self.protocols.get(&canonical(address))
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn protocol_count(&self) -> usize {
        self.protocols.len()
    }
}

impl AddressClassifier for AddressBook {
    /// Protocol entries win over token entries for the same address: a pool
    /// contract is also an ERC-20, but the protocol says more about it.
    fn classify(&self, address: &str) -> ProtocolInfo {
        let key = canonical(address);
        if let Some(p) = self.protocols.get(&key) {
            return ProtocolInfo::new(p.protocol.clone(), p.category.clone());
        }
        if let Some(t) = self.tokens.get(&key) {
            return ProtocolInfo::new(t.symbol.clone(), t.category.clone());
        }
        ProtocolInfo::unknown()
    }
}

fn canonical(address: &str) -> String {
    address.trim().to_lowercase()
}
