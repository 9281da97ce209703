//! Parameter types and decoded values.
//!
//! The decoder only understands a small closed set of ABI types: addresses,
//! signed/unsigned integers of any legal width, booleans, fixed-size byte
//! strings, and fixed or dynamic arrays of those. Everything else is rejected
//! when the signature registry is built.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::str::FromStr;

/// Upper bound on the head words a single parameter may occupy.
pub const MAX_HEAD_WORDS: usize = 4096;

/// An event parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// 20-byte account address
    Address,
    /// Unsigned integer. Width in bits (8..=256, multiple of 8).
    Uint(u16),
    /// Two's-complement signed integer. Width in bits.
    Int(u16),
    Bool,
    /// `bytes1` .. `bytes32`. Length in bytes.
    FixedBytes(u8),
    /// `T[]`
    Array(Box<ParamType>),
    /// `T[k]`
    FixedArray(Box<ParamType>, usize),
}

impl ParamType {
    /// Parse a canonical Solidity type string, e.g. `uint112` or `uint256[]`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if let Some(body) = s.strip_suffix(']') {
            let open = body
                .rfind('[')
                .ok_or_else(|| format!("unbalanced brackets in '{s}'"))?;
            let inner = Self::parse(&body[..open])?;
            let dim = &body[open + 1..];
            if dim.is_empty() {
                return Ok(ParamType::Array(Box::new(inner)));
            }
            let len: usize = dim
                .parse()
                .map_err(|_| format!("invalid array length '{dim}'"))?;
            if len == 0 {
                return Err("fixed array length must be positive".into());
            }
            let ty = ParamType::FixedArray(Box::new(inner), len);
            return match ty.head_words() {
                Some(words) if words <= MAX_HEAD_WORDS => Ok(ty),
                _ => Err(format!("fixed array '{s}' exceeds {MAX_HEAD_WORDS} head words")),
            };
        }

        match s {
            "address" => Ok(ParamType::Address),
            "bool" => Ok(ParamType::Bool),
            "uint" => Ok(ParamType::Uint(256)),
            "int" => Ok(ParamType::Int(256)),
            _ if s.starts_with("uint") => parse_width(&s[4..]).map(ParamType::Uint),
            _ if s.starts_with("int") => parse_width(&s[3..]).map(ParamType::Int),
            _ if s.starts_with("bytes") && s.len() > 5 => match s[5..].parse::<u8>() {
                Ok(n) if (1..=32).contains(&n) => Ok(ParamType::FixedBytes(n)),
                _ => Err(format!("invalid fixed bytes size in '{s}'")),
            },
            _ => Err(format!("unsupported type '{s}'")),
        }
    }

    /// `true` for types encoded through an offset into the tail section.
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Array(_) => true,
            ParamType::FixedArray(inner, _) => inner.is_dynamic(),
            _ => false,
        }
    }

    /// Number of 32-byte words this type occupies in a tuple head.
    /// `None` if the count overflows.
    pub fn head_words(&self) -> Option<usize> {
        match self {
            ParamType::FixedArray(inner, len) if !inner.is_dynamic() => {
                inner.head_words()?.checked_mul(*len)
            }
            _ => Some(1),
        }
    }
}

fn parse_width(digits: &str) -> Result<u16, String> {
    match digits.parse::<u16>() {
        Ok(bits) if bits >= 8 && bits <= 256 && bits % 8 == 0 => Ok(bits),
        _ => Err(format!("invalid integer width '{digits}'")),
    }
}

impl FromStr for ParamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => write!(f, "address"),
            ParamType::Uint(bits) => write!(f, "uint{bits}"),
            ParamType::Int(bits) => write!(f, "int{bits}"),
            ParamType::Bool => write!(f, "bool"),
            ParamType::FixedBytes(n) => write!(f, "bytes{n}"),
            ParamType::Array(inner) => write!(f, "{inner}[]"),
            ParamType::FixedArray(inner, len) => write!(f, "{inner}[{len}]"),
        }
    }
}

/// A decoded parameter value.
///
/// Serialises to plain JSON: integers as numbers (or decimal strings once
/// they no longer fit in 128 bits), addresses as EIP-55 strings, bytes as
/// `0x` hex, and unrecoverable indexed values as
/// `{ "hash": "0x..", "hashOnly": true }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    Bool(bool),
    Uint(u128),
    Int(i128),
    /// Unsigned value wider than 128 bits, decimal string
    BigUint(String),
    /// Signed value wider than 128 bits, decimal string
    BigInt(String),
    /// EIP-55 checksummed address
    Address(String),
    /// Fixed-size byte string, `0x` hex
    Bytes(String),
    /// A 32-byte indexed topic passed through verbatim
    Topic(String),
    /// Keccak hash of an indexed dynamic value. The value itself is not
    /// recoverable from the log.
    HashOnly(String),
    Array(Vec<DecodedValue>),
}

impl DecodedValue {
    pub fn as_u128(&self) -> Option<u128> {
        match self {
            DecodedValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i128(&self) -> Option<i128> {
        match self {
            DecodedValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DecodedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<&str> {
        match self {
            DecodedValue::Address(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_hash_only(&self) -> bool {
        matches!(self, DecodedValue::HashOnly(_))
    }
}

impl Serialize for DecodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DecodedValue::Bool(b) => serializer.serialize_bool(*b),
            DecodedValue::Uint(v) => serializer.serialize_u128(*v),
            DecodedValue::Int(v) => serializer.serialize_i128(*v),
            DecodedValue::BigUint(s)
            | DecodedValue::BigInt(s)
            | DecodedValue::Address(s)
            | DecodedValue::Bytes(s)
            | DecodedValue::Topic(s) => serializer.serialize_str(s),
            DecodedValue::HashOnly(hash) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("hash", hash)?;
                map.serialize_entry("hashOnly", &true)?;
                map.end()
            }
            DecodedValue::Array(items) => serializer.collect_seq(items),
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Bool(v) => write!(f, "{v}"),
            DecodedValue::Uint(v) => write!(f, "{v}"),
            DecodedValue::Int(v) => write!(f, "{v}"),
            DecodedValue::BigUint(v)
            | DecodedValue::BigInt(v)
            | DecodedValue::Address(v)
            | DecodedValue::Bytes(v)
            | DecodedValue::Topic(v) => write!(f, "{v}"),
            DecodedValue::HashOnly(h) => write!(f, "{h} (hash only)"),
            DecodedValue::Array(items) => {
                let parts: Vec<_> = items.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_elementary_types() {
        assert_eq!(ParamType::parse("address").unwrap(), ParamType::Address);
        assert_eq!(ParamType::parse("uint112").unwrap(), ParamType::Uint(112));
        assert_eq!(ParamType::parse("int24").unwrap(), ParamType::Int(24));
        assert_eq!(ParamType::parse("uint").unwrap(), ParamType::Uint(256));
        assert_eq!(ParamType::parse("bool").unwrap(), ParamType::Bool);
        assert_eq!(ParamType::parse("bytes32").unwrap(), ParamType::FixedBytes(32));
    }

    #[test]
    fn parse_array_types() {
        assert_eq!(
            ParamType::parse("uint256[]").unwrap(),
            ParamType::Array(Box::new(ParamType::Uint(256)))
        );
        assert_eq!(
            ParamType::parse("address[3]").unwrap(),
            ParamType::FixedArray(Box::new(ParamType::Address), 3)
        );
    }

    #[test]
    fn rejects_types_outside_the_closed_set() {
        assert!(ParamType::parse("string").is_err());
        assert!(ParamType::parse("bytes").is_err());
        assert!(ParamType::parse("uint7").is_err());
        assert!(ParamType::parse("uint264").is_err());
        assert!(ParamType::parse("bytes33").is_err());
        assert!(ParamType::parse("(address,uint256)").is_err());
        assert!(ParamType::parse("uint256[0]").is_err());
    }

    #[test]
    fn rejects_oversized_fixed_arrays() {
        assert!(ParamType::parse("uint256[4096]").is_ok());
        assert!(ParamType::parse("uint256[4097]").is_err());
        assert!(ParamType::parse("uint256[576460752303423488]").is_err());
        assert!(ParamType::parse("uint256[64][65]").is_err());
        assert!(ParamType::parse("uint256[18446744073709551616]").is_err());
    }

    #[test]
    fn display_is_canonical() {
        for s in ["address", "uint160", "int24", "bool", "bytes4", "uint256[]", "int8[2]"] {
            assert_eq!(ParamType::parse(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn head_words_and_dynamism() {
        assert_eq!(ParamType::Uint(256).head_words(), Some(1));
        let fixed = ParamType::parse("uint256[3]").unwrap();
        assert!(!fixed.is_dynamic());
        assert_eq!(fixed.head_words(), Some(3));
        let nested = ParamType::parse("uint8[2][3]").unwrap();
        assert_eq!(nested.head_words(), Some(6));
        let dynamic = ParamType::parse("uint256[]").unwrap();
        assert!(dynamic.is_dynamic());
        assert_eq!(dynamic.head_words(), Some(1));

        let huge = ParamType::FixedArray(Box::new(ParamType::Uint(256)), usize::MAX);
        let nested_huge = ParamType::FixedArray(Box::new(huge.clone()), 2);
        assert_eq!(huge.head_words(), Some(usize::MAX));
        assert_eq!(nested_huge.head_words(), None);
    }

    #[test]
    fn decoded_value_json_shape() {
        let json = serde_json::to_value(DecodedValue::Uint(1_000_000)).unwrap();
        assert_eq!(json, serde_json::json!(1_000_000));

        let json = serde_json::to_value(DecodedValue::Int(-5)).unwrap();
        assert_eq!(json, serde_json::json!(-5));

        let json = serde_json::to_value(DecodedValue::HashOnly("0xabcd".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "hash": "0xabcd", "hashOnly": true }));

        let json = serde_json::to_value(DecodedValue::Array(vec![
            DecodedValue::Uint(1),
            DecodedValue::Bool(false),
        ]))
        .unwrap();
        assert_eq!(json, serde_json::json!([1, false]));
    }
}
