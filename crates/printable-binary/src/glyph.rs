//! Glyphs and UTF-8 lead-byte classification.
//!
//! A [`Glyph`] is the UTF-8 encoding of a single code point, at most three
//! bytes long. Every byte value maps to exactly one glyph (see
//! [`crate::CodeTable`]).

use core::fmt;

/// The UTF-8 byte sequence that stands for one encoded byte value.
///
/// Glyphs are always a single, valid, shortest-form UTF-8 scalar of one to
/// three bytes. The unused tail of `bytes` is zeroed so derived comparisons
/// only depend on the encoded sequence.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Glyph {
    bytes: [u8; Glyph::MAX_LEN],
    len: u8,
}

impl Glyph {
    /// Longest glyph in bytes.
    pub const MAX_LEN: usize = 3;

    /// Encodes `ch` as a glyph.
    ///
    /// # Panics
    ///
    /// Panics if `ch` needs four UTF-8 bytes. Inside a `const` context this
    /// is a compile-time error.
    #[must_use]
    pub const fn from_char(ch: char) -> Self {
        let cp = ch as u32;
        if cp < 0x80 {
            Self {
                bytes: [cp as u8, 0, 0],
                len: 1,
            }
        } else if cp < 0x800 {
            Self {
                bytes: [0xC0 | (cp >> 6) as u8, 0x80 | (cp & 0x3F) as u8, 0],
                len: 2,
            }
        } else if cp < 0x1_0000 {
            Self {
                bytes: [
                    0xE0 | (cp >> 12) as u8,
                    0x80 | ((cp >> 6) & 0x3F) as u8,
                    0x80 | (cp & 0x3F) as u8,
                ],
                len: 3,
            }
        } else {
            panic!("glyphs are limited to three UTF-8 bytes")
        }
    }

    /// The encoded UTF-8 bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// The glyph as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: `from_char` is the only constructor and always writes a
        // complete shortest-form UTF-8 sequence of `len` bytes.
        unsafe { core::str::from_utf8_unchecked(self.as_bytes()) }
    }

    /// The code point this glyph encodes.
    #[must_use]
    pub fn to_char(self) -> char {
        self.as_str().chars().next().unwrap_or_default()
    }

    /// Number of bytes in the glyph (1-3).
    #[inline]
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    /// The first byte of the glyph.
    #[inline]
    #[must_use]
    pub const fn lead(self) -> u8 {
        self.bytes[0]
    }
}

impl fmt::Debug for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Glyph({:?} U+{:04X} {:02X?})",
            self.to_char(),
            self.to_char() as u32,
            self.as_bytes()
        )
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a byte as the first byte of a UTF-8 sequence.
///
/// The decoder uses this to decide how many bytes it tries to match first.
/// Bytes that can never start a sequence (continuation bytes, `0xC0`,
/// `0xC1` and `0xF5..=0xFF`) are [`LeadClass::Invalid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadClass {
    /// `0x00..=0x7F`
    Ascii,
    /// `0xC2..=0xDF`
    Two,
    /// `0xE0..=0xEF`
    Three,
    /// `0xF0..=0xF4`. No glyph is four bytes long, so these never match.
    Four,
    /// Anything else.
    Invalid,
}

impl LeadClass {
    /// Classifies `byte`.
    #[inline]
    #[must_use]
    pub const fn of(byte: u8) -> Self {
        match byte {
            0x00..=0x7F => Self::Ascii,
            0xC2..=0xDF => Self::Two,
            0xE0..=0xEF => Self::Three,
            0xF0..=0xF4 => Self::Four,
            _ => Self::Invalid,
        }
    }

    /// Longest sequence a byte of this class could start.
    #[inline]
    #[must_use]
    pub const fn max_len(self) -> usize {
        match self {
            Self::Ascii | Self::Invalid => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }
}
