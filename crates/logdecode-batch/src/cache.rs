//! One-time address → protocol cache.
//!
//! Classification only depends on the address, so a batch can classify each
//! distinct address once up front instead of once per log.

use logdecode_core::{
    event::RawLog,
    metadata::{AddressClassifier, ProtocolInfo},
};
use std::collections::HashMap;
use tracing::debug;

/// Precomputed classifications keyed by lower-cased address.
#[derive(Debug, Clone, Default)]
pub struct AddressCache {
    entries: HashMap<String, ProtocolInfo>,
}

impl AddressCache {
    /// Classify every distinct address in `addresses` once.
    pub fn build<'a, I>(addresses: I, classifier: &dyn AddressClassifier) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut entries = HashMap::new();
        for address in addresses {
            let key = address.trim().to_lowercase();
            if !entries.contains_key(&key) {
                let info = classifier.classify(&key);
                entries.insert(key, info);
            }
        }
        debug!(addresses = entries.len(), "address cache built");
        Self { entries }
    }

    /// Classify every distinct emitting address in a batch of logs.
    pub fn for_logs(logs: &[RawLog], classifier: &dyn AddressClassifier) -> Self {
        Self::build(logs.iter().map(|l| l.address.as_str()), classifier)
    }

    pub fn get(&self, address: &str) -> Option<&ProtocolInfo> {
        self.entries.get(&address.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
