use alloc::string::String;

use crate::table::CODE_TABLE;

/// Encodes `input` as glyph text.
///
/// Every byte contributes exactly one glyph, in order. Encoding cannot fail.
///
/// ```rust
/// assert_eq!(printable_binary::encode(b"\x00hi"), "\u{2205}hi");
/// assert_eq!(printable_binary::encode(b""), "");
/// ```
#[must_use]
pub fn encode(input: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len(input));
    encode_into(input, &mut out);
    out
}

/// Appends the glyphs for `input` to `out`.
///
/// Encoding carries no state between calls, so a stream can be encoded one
/// chunk at a time with the same result as encoding it whole.
pub fn encode_into(input: &[u8], out: &mut String) {
    out.reserve(input.len());
    for &byte in input {
        out.push_str(CODE_TABLE.encode_glyph(byte).as_str());
    }
}

/// Exact length in bytes of `encode(input)`.
#[must_use]
pub fn encoded_len(input: &[u8]) -> usize {
    input
        .iter()
        .map(|&byte| CODE_TABLE.encode_glyph(byte).len())
        .sum()
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn empty_input_encodes_to_nothing() {
        assert_eq!(encode(b""), "");
        assert_eq!(encoded_len(b""), 0);
    }

    #[test]
    fn hello_world_replaces_only_unsafe_characters() {
        let encoded = encode(b"Hello, World!");
        assert_eq!(encoded, "Hello,\u{2423}World\u{FE57}");
        assert_eq!(encoded.len(), 11 + 3 + 3);
    }

    #[test]
    fn null_and_del_use_three_byte_glyphs() {
        assert_eq!(encode(&[0x00]).as_bytes(), [0xE2, 0x88, 0x85]);
        assert_eq!(encode(&[0x7F]).as_bytes(), [0xE2, 0x8C, 0xA6]);
    }

    #[test]
    fn chunked_encoding_matches_whole() {
        let input: Vec<u8> = (0..=255).collect();
        let mut chunked = String::new();
        for chunk in input.chunks(7) {
            encode_into(chunk, &mut chunked);
        }
        assert_eq!(chunked, encode(&input));
    }

    #[test]
    fn encoded_len_is_exact() {
        let input: Vec<u8> = (0..=255).rev().collect();
        assert_eq!(encoded_len(&input), encode(&input).len());
        // 62 overrides, 68 plain ASCII, 126 systematic two-byte glyphs.
        assert!(encoded_len(&input) > 256 && encoded_len(&input) < 3 * 256);
    }
}
