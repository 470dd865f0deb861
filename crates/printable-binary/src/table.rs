//! The fixed byte → glyph table and its inverse.
//!
//! The mapping is part of the wire format: text encoded by any release must
//! decode with any other, so the override list below is data, not something
//! derived at runtime.
//!
//! Construction rules
//! - `0x21..=0x7E` map to themselves unless listed in [`OVERRIDES`].
//! - Space, control bytes and DEL are always overridden.
//! - `0x80..=0xBF` map to `U+00C0 + (b - 0x80)` (`0xC3 b` in UTF-8).
//! - `0xC0..=0xFF` map to `U+0100 + (b - 0xC0)` (`0xC4 ..` in UTF-8).
//! - `0x98` and `0xB8` are overridden so they do not resemble `∅`.
//!
//! [`CodeTable::build`] is a `const fn`. Integrity violations (duplicate
//! glyphs, four-byte glyphs, single-byte glyphs outside `0x21..=0x7E`) panic,
//! which turns into a compile error for [`CODE_TABLE`].

use crate::glyph::Glyph;

/// Hand-picked glyphs, sorted by byte value.
#[rustfmt::skip]
pub(crate) const OVERRIDES: [(u8, char); 62] = [
    (0x00, '\u{2205}'), // ∅
    (0x01, '\u{00AF}'), // ¯
    (0x02, '\u{00AB}'), // «
    (0x03, '\u{00BB}'), // »
    (0x04, '\u{03DE}'), // ϟ
    (0x05, '\u{00BF}'), // ¿
    (0x06, '\u{00A1}'), // ¡
    (0x07, '\u{00AA}'), // ª
    (0x08, '\u{232B}'), // ⌫
    (0x09, '\u{21E5}'), // ⇥
    (0x0A, '\u{21E9}'), // ⇩
    (0x0B, '\u{22A7}'), // ⊧
    (0x0C, '\u{00A7}'), // §
    (0x0D, '\u{23CE}'), // ⏎
    (0x0E, '\u{022F}'), // ȯ
    (0x0F, '\u{0298}'), // ʘ
    (0x10, '\u{0194}'), // Ɣ
    (0x11, '\u{00B9}'), // ¹
    (0x12, '\u{00B2}'), // ²
    (0x13, '\u{00BA}'), // º
    (0x14, '\u{00B3}'), // ³
    (0x15, '\u{00B5}'), // µ
    (0x16, '\u{0268}'), // ɨ
    (0x17, '\u{00AC}'), // ¬
    (0x18, '\u{00A9}'), // ©
    (0x19, '\u{00A6}'), // ¦
    (0x1A, '\u{01B5}'), // Ƶ
    (0x1B, '\u{238B}'), // ⎋
    (0x1C, '\u{039E}'), // Ξ
    (0x1D, '\u{01C1}'), // ǁ
    (0x1E, '\u{01C0}'), // ǀ
    (0x1F, '\u{00B6}'), // ¶
    (0x20, '\u{2423}'), // ␣
    (0x21, '\u{FE57}'), // ﹗
    (0x22, '\u{02F5}'), // ˵
    (0x23, '\u{266F}'), // ♯
    (0x24, '\u{FE69}'), // ﹩
    (0x25, '\u{FE6A}'), // ﹪
    (0x26, '\u{FE60}'), // ﹠
    (0x27, '\u{02BC}'), // ʼ
    (0x28, '\u{2768}'), // ❨
    (0x29, '\u{2769}'), // ❩
    (0x2A, '\u{FE61}'), // ﹡
    (0x2B, '\u{FE62}'), // ﹢
    (0x2D, '\u{FE63}'), // ﹣
    (0x2F, '\u{2044}'), // ⁄
    (0x3A, '\u{FE55}'), // ﹕
    (0x3B, '\u{FE54}'), // ﹔
    (0x3D, '\u{FE66}'), // ﹦
    (0x3F, '\u{FE56}'), // ﹖
    (0x40, '\u{FE6B}'), // ﹫
    (0x5B, '\u{27E6}'), // ⟦
    (0x5C, '\u{29F9}'), // ⧹
    (0x5D, '\u{27E7}'), // ⟧
    (0x60, '\u{02CB}'), // ˋ
    (0x7B, '\u{2774}'), // ❴
    (0x7C, '\u{2223}'), // ∣
    (0x7D, '\u{2775}'), // ❵
    (0x7E, '\u{02DC}'), // ˜
    (0x7F, '\u{2326}'), // ⌦
    (0x98, '\u{014C}'), // Ō
    (0xB8, '\u{014F}'), // ŏ
];

/// Code points below this bound are 1- or 2-byte glyphs and decode through a
/// dense array.
const NARROW_LIMIT: usize = 0x800;

/// The process-wide table. Built at compile time.
pub static CODE_TABLE: CodeTable = CodeTable::build();

/// Paired encode/decode lookup for all 256 byte values.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeTable {
    encode: [Glyph; 256],
    /// Indexed by code point.
    narrow: [Option<u8>; NARROW_LIMIT],
    /// 3-byte glyphs sorted by code point; only `..wide_len` is populated.
    wide: [(u32, u8); 256],
    wide_len: usize,
}

impl CodeTable {
    /// Builds the table from the construction rules.
    ///
    /// Deterministic: repeated calls return equal tables.
    ///
    /// # Panics
    ///
    /// Panics if two byte values would share a glyph, if a glyph needs four
    /// bytes, or if a single-byte glyph is not in `0x21..=0x7E`. None of these
    /// can happen with the published data.
    #[must_use]
    pub const fn build() -> Self {
        let mut table = Self {
            encode: [Glyph::from_char('\0'); 256],
            narrow: [None; NARROW_LIMIT],
            wide: [(0, 0); 256],
            wide_len: 0,
        };

        let mut byte = 0usize;
        while byte < 256 {
            let ch = glyph_char(byte as u8);
            let glyph = Glyph::from_char(ch);
            if glyph.len() == 1 && !(glyph.lead() >= 0x21 && glyph.lead() <= 0x7E) {
                panic!("single-byte glyphs must be printable, non-space ASCII");
            }
            table.encode[byte] = glyph;
            table.insert_decode(ch as u32, byte as u8);
            byte += 1;
        }

        table
    }

    const fn insert_decode(&mut self, cp: u32, byte: u8) {
        if (cp as usize) < NARROW_LIMIT {
            if self.narrow[cp as usize].is_some() {
                panic!("two byte values share a glyph");
            }
            self.narrow[cp as usize] = Some(byte);
            return;
        }

        // Insertion sort keeps `wide` ordered for binary search.
        let mut at = self.wide_len;
        while at > 0 && self.wide[at - 1].0 >= cp {
            if self.wide[at - 1].0 == cp {
                panic!("two byte values share a glyph");
            }
            self.wide[at] = self.wide[at - 1];
            at -= 1;
        }
        self.wide[at] = (cp, byte);
        self.wide_len += 1;
    }

    /// The glyph for `byte`.
    #[inline]
    #[must_use]
    pub const fn encode_glyph(&self, byte: u8) -> Glyph {
        self.encode[byte as usize]
    }

    /// The byte whose glyph is exactly `glyph`, if any.
    ///
    /// A miss is an ordinary outcome: invalid UTF-8, more than one scalar, or
    /// a scalar that is not in the table all return `None`.
    #[inline]
    #[must_use]
    pub fn decode_byte(&self, glyph: &[u8]) -> Option<u8> {
        let s = core::str::from_utf8(glyph).ok()?;
        let mut chars = s.chars();
        let ch = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        self.decode_char(ch)
    }

    /// The byte whose glyph encodes `ch`, if any.
    #[inline]
    #[must_use]
    pub fn decode_char(&self, ch: char) -> Option<u8> {
        let cp = ch as u32;
        if (cp as usize) < NARROW_LIMIT {
            return self.narrow[cp as usize];
        }
        let wide = &self.wide[..self.wide_len];
        wide.binary_search_by_key(&cp, |&(c, _)| c)
            .ok()
            .map(|idx| wide[idx].1)
    }

    /// All `(byte, glyph)` pairs in byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Glyph)> + '_ {
        (0..=u8::MAX).map(|b| (b, self.encode_glyph(b)))
    }

    /// The published table, one entry per byte value.
    pub fn entries(&self) -> impl Iterator<Item = TableEntry> + '_ {
        self.iter().map(|(byte, glyph)| TableEntry {
            byte,
            code_point: glyph.to_char() as u32,
            glyph,
        })
    }
}

impl core::fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// One row of the published character table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    /// The raw byte value.
    pub byte: u8,
    /// Unicode scalar value of the glyph.
    pub code_point: u32,
    /// The glyph itself.
    pub glyph: Glyph,
}

#[cfg(feature = "serde")]
impl serde::Serialize for TableEntry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use alloc::format;
        use serde::ser::SerializeStruct;

        let mut row = serializer.serialize_struct("TableEntry", 4)?;
        row.serialize_field("byte", &self.byte)?;
        row.serialize_field("glyph", self.glyph.as_str())?;
        row.serialize_field("code_point", &format!("U+{:04X}", self.code_point))?;
        row.serialize_field("utf8", &hex::encode(self.glyph.as_bytes()))?;
        row.end()
    }
}

/// The code point assigned to `byte` by the construction rules.
const fn glyph_char(byte: u8) -> char {
    let mut i = 0;
    while i < OVERRIDES.len() {
        if OVERRIDES[i].0 == byte {
            return OVERRIDES[i].1;
        }
        i += 1;
    }

    let cp = match byte {
        0x21..=0x7E => byte as u32,
        0x80..=0xBF => 0xC0 + (byte as u32 - 0x80),
        0xC0..=0xFF => 0x100 + (byte as u32 - 0xC0),
        _ => panic!("control bytes, space and DEL need an override"),
    };
    match char::from_u32(cp) {
        Some(ch) => ch,
        None => panic!("invalid code point"),
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rstest::rstest;

    use super::*;
    use crate::glyph::LeadClass;

    #[test]
    fn build_is_idempotent() {
        let a = CodeTable::build();
        let b = CodeTable::build();
        assert_eq!(a, b);
        assert_eq!(a, CODE_TABLE);
    }

    #[test]
    fn decode_inverts_encode() {
        for (byte, glyph) in CODE_TABLE.iter() {
            assert_eq!(CODE_TABLE.decode_byte(glyph.as_bytes()), Some(byte), "{glyph:?}");
        }
    }

    #[test]
    fn glyphs_are_injective() {
        let mut glyphs: Vec<Glyph> = CODE_TABLE.iter().map(|(_, g)| g).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), 256);
    }

    #[test]
    fn no_glyph_is_a_prefix_of_another() {
        for (a, ga) in CODE_TABLE.iter() {
            for (b, gb) in CODE_TABLE.iter() {
                if a != b {
                    assert!(
                        !gb.as_bytes().starts_with(ga.as_bytes()),
                        "{ga:?} is a prefix of {gb:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn glyph_shapes_match_lead_ranges() {
        for (byte, glyph) in CODE_TABLE.iter() {
            let bytes = glyph.as_bytes();
            match glyph.len() {
                1 => {
                    assert!((0x21..=0x7E).contains(&bytes[0]));
                    assert_eq!(bytes[0], byte);
                }
                2 | 3 => {
                    assert!((0xC2..=0xEF).contains(&bytes[0]), "{glyph:?}");
                    assert!(bytes[1..].iter().all(|b| (0x80..=0xBF).contains(b)));
                }
                n => panic!("unexpected glyph length {n}"),
            }
            assert_eq!(LeadClass::of(bytes[0]).max_len(), glyph.len());
            assert!(!bytes.iter().any(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r')));
        }
    }

    #[test]
    fn ascii_passthrough_except_overrides() {
        for byte in 0x21..=0x7Eu8 {
            let overridden = OVERRIDES.iter().any(|&(b, _)| b == byte);
            let glyph = CODE_TABLE.encode_glyph(byte);
            assert_eq!(glyph.as_bytes() == [byte], !overridden, "{byte:#04x}");
        }
    }

    #[rstest]
    #[case(0x00, &[0xE2, 0x88, 0x85])]
    #[case(0x0B, &[0xE2, 0x8A, 0xA7])]
    #[case(0x20, &[0xE2, 0x90, 0xA3])]
    #[case(0x21, &[0xEF, 0xB9, 0x97])]
    #[case(0x41, b"A")]
    #[case(0x7F, &[0xE2, 0x8C, 0xA6])]
    #[case(0x80, &[0xC3, 0x80])]
    #[case(0x97, &[0xC3, 0x97])]
    #[case(0x98, &[0xC5, 0x8C])]
    #[case(0xB8, &[0xC5, 0x8F])]
    #[case(0xBF, &[0xC3, 0xBF])]
    #[case(0xC0, &[0xC4, 0x80])]
    #[case(0xFF, &[0xC4, 0xBF])]
    fn published_glyphs(#[case] byte: u8, #[case] utf8: &[u8]) {
        assert_eq!(CODE_TABLE.encode_glyph(byte).as_bytes(), utf8);
    }

    #[rstest]
    #[case::lone_continuation(&[0x85])]
    #[case::truncated(&[0xE2, 0x88])]
    #[case::two_scalars(b"AB")]
    #[case::two_glyphs("\u{00C0}\u{00C0}".as_bytes())]
    #[case::unmapped_scalar("\u{FFFD}".as_bytes())]
    #[case::space(b" ")]
    #[case::empty(b"")]
    #[case::overlong(&[0xC1, 0x81])]
    fn decode_byte_misses(#[case] input: &[u8]) {
        assert_eq!(CODE_TABLE.decode_byte(input), None);
    }

    #[test]
    fn decode_char_covers_wide_and_narrow() {
        assert_eq!(CODE_TABLE.decode_char('\u{FE6B}'), Some(b'@'));
        assert_eq!(CODE_TABLE.decode_char('\u{00C0}'), Some(0x80));
        assert_eq!(CODE_TABLE.decode_char('"'), None);
        assert_eq!(CODE_TABLE.decode_char('\u{FFFD}'), None);
    }

    #[test]
    fn entries_report_code_points() {
        let entries: Vec<TableEntry> = CODE_TABLE.entries().collect();
        assert_eq!(entries.len(), 256);
        assert_eq!(entries[0].code_point, 0x2205);
        assert_eq!(entries[0x7C].code_point, 0x2223);
        assert_eq!(entries[0xFF].code_point, 0x13F);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn entries_serialize_as_published_rows() {
        let row = serde_json::to_value(CODE_TABLE.entries().next().unwrap()).unwrap();
        assert_eq!(
            row,
            serde_json::json!({
                "byte": 0,
                "glyph": "∅",
                "code_point": "U+2205",
                "utf8": "e28885",
            })
        );
    }
}
