//! `Aggregator`: orchestrates chunked, parallel batch decoding and the
//! serialized merge into protocol buckets.

use crate::{
    cache::AddressCache,
    output::{Accumulator, BatchOutput, DecodedEventEntry},
    request::BatchRequest,
};
use logdecode_core::{
    decoder::LogDecoder,
    error::BatchError,
    event::RawLog,
    metadata::{AddressClassifier, ProtocolInfo},
    spec::SignatureLookup,
};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

/// Batch decode and aggregation engine.
///
/// Holds read-only references to the registry, the classifier and the
/// decoder; all per-run state lives in the accumulator of one call.
#[derive(Clone)]
pub struct Aggregator {
    registry: Arc<dyn SignatureLookup>,
    classifier: Arc<dyn AddressClassifier>,
    decoder: Arc<dyn LogDecoder>,
}

impl Aggregator {
    pub fn new(
        registry: Arc<dyn SignatureLookup>,
        classifier: Arc<dyn AddressClassifier>,
        decoder: Arc<dyn LogDecoder>,
    ) -> Self {
        Self {
            registry,
            classifier,
            decoder,
        }
    }

    pub fn classifier(&self) -> &dyn AddressClassifier {
        self.classifier.as_ref()
    }

    /// Execute a batch decode request.
    ///
    /// Every input log yields exactly one entry. The only error is a failure
    /// to build the dedicated worker pool.
    pub fn decode_batch(&self, req: BatchRequest) -> Result<BatchOutput, BatchError> {
        info!(
            logs = req.logs.len(),
            parallel = req.parallel,
            chunk_size = req.effective_chunk_size(),
            concurrency = req.concurrency,
            "batch decode started"
        );

        let output = if req.parallel && req.concurrency > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(req.concurrency)
                .build()
                .map_err(|e| BatchError::WorkerPool(e.to_string()))?;
            pool.install(|| self.run(&req))
        } else {
            self.run(&req)
        };

        Ok(output)
    }

    fn run(&self, req: &BatchRequest) -> BatchOutput {
        let total = req.logs.len();
        let cache = req.address_cache.as_ref();
        let mut acc = Accumulator::default();
        let mut processed = 0usize;

        for chunk in req.logs.chunks(req.effective_chunk_size()) {
            // collect() on an indexed parallel iterator keeps input order
            let entries: Vec<DecodedEventEntry> = if req.parallel {
                chunk.par_iter().map(|log| self.decode_one(log, cache)).collect()
            } else {
                chunk.iter().map(|log| self.decode_one(log, cache)).collect()
            };

            for entry in entries {
                acc.push(entry);
            }

            processed += chunk.len();
            debug!(processed, total, "chunk merged");
            if let Some(cb) = &req.on_progress {
                cb(processed, total);
            }
        }

        let noted = acc.noted;
        let output = acc.finish();
        info!(
            logs = output.summary.total_logs_processed,
            buckets = output.events_by_protocol.len(),
            event_types = output.summary.event_type_distribution.len(),
            noted,
            "batch decode complete"
        );
        output
    }

    /// Classify and decode one log into its output entry.
    pub fn decode_one(&self, log: &RawLog, cache: Option<&AddressCache>) -> DecodedEventEntry {
        let protocol = self.resolve(&log.address, cache);
        let event = self.decoder.decode(log, self.registry.as_ref());
        DecodedEventEntry::new(log, protocol, event)
    }

    fn resolve(&self, address: &str, cache: Option<&AddressCache>) -> ProtocolInfo {
        cache
            .and_then(|c| c.get(address).cloned())
            .unwrap_or_else(|| self.classifier.classify(address))
    }
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator").finish_non_exhaustive()
    }
}
