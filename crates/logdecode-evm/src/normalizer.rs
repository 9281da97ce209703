//! Converts alloy-core `DynSolValue` → logdecode `DecodedValue`.

use alloy_core::dyn_abi::DynSolValue;
use alloy_primitives::{I256, U256};
use logdecode_core::types::DecodedValue;

/// Convert a decoded `DynSolValue` into a `DecodedValue`.
pub fn normalize(val: DynSolValue) -> DecodedValue {
    match val {
        DynSolValue::Bool(b) => DecodedValue::Bool(b),
        DynSolValue::Uint(u, _bits) => uint_value(u),
        DynSolValue::Int(i, _bits) => int_value(i),
        DynSolValue::Address(a) => DecodedValue::Address(a.to_checksum(None)),
        DynSolValue::FixedBytes(word, size) => {
            DecodedValue::Bytes(format!("0x{}", hex::encode(&word[..size])))
        }
        DynSolValue::Bytes(b) => DecodedValue::Bytes(format!("0x{}", hex::encode(b))),
        DynSolValue::Array(vals) | DynSolValue::FixedArray(vals) => {
            DecodedValue::Array(vals.into_iter().map(normalize).collect())
        }
        // Types outside the supported set never reach here; keep their encoding.
        other => DecodedValue::Bytes(format!("0x{}", hex::encode(other.abi_encode()))),
    }
}

/// Narrow to `u128` when the value fits, otherwise a decimal string.
pub fn uint_value(u: U256) -> DecodedValue {
    match u128::try_from(u) {
        Ok(v) => DecodedValue::Uint(v),
        Err(_) => DecodedValue::BigUint(u.to_string()),
    }
}

/// Narrow to `i128` when the value fits, otherwise a decimal string.
pub fn int_value(i: I256) -> DecodedValue {
    match i128::try_from(i) {
        Ok(v) => DecodedValue::Int(v),
        Err(_) => DecodedValue::BigInt(i.to_string()),
    }
}
