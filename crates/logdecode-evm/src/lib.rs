//! # logdecode-evm
//!
//! EVM event log decoder implementing the `LogDecoder` trait.
//!
//! ## Implementation notes
//! - topics[0] → event signature hash, looked up in the registry
//! - topics[1..] → indexed parameters, one 32-byte word each
//! - `data` → non-indexed parameters, ABI-encoded tuple decoded with `alloy-core`

pub mod decoder;
pub mod normalizer;
pub mod words;

pub use decoder::EvmLogDecoder;
