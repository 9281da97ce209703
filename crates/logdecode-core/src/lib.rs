//! # logdecode-core
//!
//! Core types, seam traits, and errors shared across all logdecode crates.
//! The signature registry, the EVM decoder, and the batch aggregator are all
//! built on top of the interfaces defined here.

pub mod decoder;
pub mod error;
pub mod event;
pub mod metadata;
pub mod spec;
pub mod types;

pub use decoder::LogDecoder;
pub use error::{BatchError, DecodeIssue, RegistryError};
pub use event::{DecodedEvent, EventSignature, RawLog, UNKNOWN_EVENT};
pub use metadata::{AddressClassifier, ProtocolInfo, ProtocolMetadata, TokenMetadata};
pub use spec::{EventSpec, SignatureLookup};
pub use types::{DecodedValue, ParamType};
