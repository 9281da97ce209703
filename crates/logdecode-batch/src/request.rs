//! Batch decode request configuration.

use crate::cache::AddressCache;
use logdecode_core::event::RawLog;

/// Configuration for a batch decode job.
pub struct BatchRequest {
    /// The raw logs to decode, in output order
    pub logs: Vec<RawLog>,
    /// Decode each chunk on the Rayon pool (merge order is unaffected)
    pub parallel: bool,
    /// Number of Rayon workers (0 = use the global pool)
    pub concurrency: usize,
    /// Max logs per chunk (memory safety); 0 is treated as 1
    pub chunk_size: usize,
    /// Precomputed address classifications; misses fall back to the classifier
    pub address_cache: Option<AddressCache>,
    /// Optional progress callback, `(processed, total)`
    pub on_progress: Option<Box<dyn Fn(usize, usize) + Send + Sync>>,
}

impl BatchRequest {
    pub fn new(logs: Vec<RawLog>) -> Self {
        Self {
            logs,
            parallel: true,
            concurrency: 0,
            chunk_size: 10_000,
            address_cache: None,
            on_progress: None,
        }
    }

    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn concurrency(mut self, workers: usize) -> Self {
        self.concurrency = workers;
        self
    }

    pub fn chunk_size(mut self, n: usize) -> Self {
        self.chunk_size = n;
        self
    }

    pub fn address_cache(mut self, cache: AddressCache) -> Self {
        self.address_cache = Some(cache);
        self
    }

    pub fn on_progress<F: Fn(usize, usize) + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    pub(crate) fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }
}

impl std::fmt::Debug for BatchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchRequest")
            .field("logs", &self.logs.len())
            .field("parallel", &self.parallel)
            .field("concurrency", &self.concurrency)
            .field("chunk_size", &self.chunk_size)
            .field("address_cache", &self.address_cache.as_ref().map(AddressCache::len))
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}
