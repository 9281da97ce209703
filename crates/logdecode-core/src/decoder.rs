//! The `LogDecoder` trait.
//!
//! Decoders are object-safe so the aggregator can hold them as
//! `Arc<dyn LogDecoder>` and share them across rayon workers.

use crate::event::{DecodedEvent, RawLog};
use crate::spec::SignatureLookup;

pub trait LogDecoder: Send + Sync {
    /// Decode one log against the registry.
    ///
    /// Total: every failure is reported through `DecodedEvent::issue`,
    /// never by panicking or returning early without a record.
    fn decode(&self, log: &RawLog, registry: &dyn SignatureLookup) -> DecodedEvent;
}
