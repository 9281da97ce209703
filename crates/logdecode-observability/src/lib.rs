//! # logdecode-observability
//!
//! Structured logging for logdecode.
//!
//! Library crates only emit `tracing` events; binaries call [`init_tracing`]
//! once at startup to install a subscriber. Output is either human-readable
//! text or JSON lines (compatible with ELK, Loki, CloudWatch), with log
//! levels configurable per component.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, LogConfig};
