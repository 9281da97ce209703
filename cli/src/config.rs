//! CLI configuration file (`--config logdecode.yaml`).

use anyhow::{Context, Result};
use logdecode_batch::BatchRequest;
use logdecode_core::event::RawLog;
use logdecode_observability::LogConfig;
use logdecode_registry::{AddressBook, SignatureRegistry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level CLI configuration. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub datasets: DatasetConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

/// Dataset overrides; the bundled datasets are used when a path is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Signature list (YAML or JSON)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signatures: Option<PathBuf>,
    /// Token / protocol tables (YAML or JSON)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PathBuf>,
}

/// Batch execution options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "bool_true")]
    pub parallel: bool,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Rayon worker count (0 = all available CPUs)
    #[serde(default)]
    pub concurrency: usize,
}

fn bool_true() -> bool { true }
fn default_chunk_size() -> usize { 10_000 }

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            chunk_size: default_chunk_size(),
            concurrency: 0,
        }
    }
}

impl BatchConfig {
    pub fn request(&self, logs: Vec<RawLog>) -> BatchRequest {
        BatchRequest::new(logs)
            .parallel(self.parallel)
            .chunk_size(self.chunk_size)
            .concurrency(self.concurrency)
    }
}

impl CliConfig {
    /// Load the config file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config '{}'", path.display()))?;
        Self::from_yaml_str(&content).with_context(|| format!("parsing config '{}'", path.display()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // an empty file is a valid, all-defaults config
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn signature_registry(&self) -> Result<SignatureRegistry> {
        match &self.datasets.signatures {
            Some(path) => SignatureRegistry::load_file(path)
                .with_context(|| format!("loading signatures from '{}'", path.display())),
            None => SignatureRegistry::builtin().context("loading bundled signatures"),
        }
    }

    pub fn address_book(&self) -> Result<AddressBook> {
        match &self.datasets.metadata {
            Some(path) => AddressBook::load_file(path)
                .with_context(|| format!("loading metadata from '{}'", path.display())),
            None => AddressBook::builtin().context("loading bundled metadata"),
        }
    }
}
