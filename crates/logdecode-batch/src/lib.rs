//! # logdecode-batch
//!
//! Batch decode engine: classifies and decodes every log in a batch, then
//! groups the results by protocol type with summary statistics.
//!
//! ## Features
//! - Memory-bounded chunking (default 10,000 logs per chunk)
//! - CPU-parallel decoding via Rayon, merged serially so output order is
//!   identical to a sequential run
//! - One-time address classification cache
//! - Progress callbacks (for progress bars / ETAs)
//!
//! ## Usage
//! ```no_run
//! use logdecode_batch::{Aggregator, BatchRequest};
//!
//! // let aggregator = Aggregator::new(registry, classifier, decoder);
//! // let output = aggregator.decode_batch(BatchRequest::new(logs))?;
//! ```

pub mod aggregator;
pub mod cache;
pub mod output;
pub mod request;

pub use aggregator::Aggregator;
pub use cache::AddressCache;
pub use output::{BatchOutput, DecodedEventEntry, Summary};
pub use request::BatchRequest;
