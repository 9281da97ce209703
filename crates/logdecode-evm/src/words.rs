//! Hex parsing for topics and data blobs.

/// Parse a topic into its 32-byte word.
pub fn parse_word(topic: &str) -> Result<[u8; 32], String> {
    let bytes = parse_hex(topic)?;
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| format!("topic is {} bytes, expected 32", bytes.len()))
}

/// Parse a hex string with or without the `0x` prefix. `""` and `"0x"` are empty.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let s = s.trim();
    let hex = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(hex).map_err(|e| format!("invalid hex: {e}"))
}

/// `0x`-prefixed lower-case hex of a word.
pub fn word_hex(word: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_optional() {
        assert_eq!(parse_hex("0x0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(parse_hex("0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert!(parse_hex("0x").unwrap().is_empty());
        assert!(parse_hex("").unwrap().is_empty());
    }

    #[test]
    fn odd_length_is_rejected() {
        assert!(parse_hex("0x123").is_err());
    }

    #[test]
    fn word_must_be_32_bytes() {
        let word = parse_word(&format!("0x{}01", "00".repeat(31))).unwrap();
        assert_eq!(word[31], 1);
        assert!(parse_word("0x01").is_err());
        assert!(parse_word(&format!("0x{}", "00".repeat(33))).is_err());
    }
}
