//! # logdecode-registry
//!
//! Static lookup tables for logdecode, built once and read-only afterwards.
//!
//! - [`SignatureRegistry`] maps a keccak-256 event signature hash to its
//!   logical name and ordered parameter types.
//! - [`AddressBook`] maps a contract address to a protocol identity, using a
//!   protocol table and a token table.
//!
//! Both are built from injectable datasets (YAML or JSON). The curated
//! default datasets ship in `data/` and are exposed through `builtin()`.

pub mod address_book;
pub mod signatures;

pub use address_book::AddressBook;
pub use signatures::{parse_signature, SignatureEntry, SignatureRegistry};
