//! Reversible encoding of arbitrary bytes as printable UTF-8 glyphs.
//!
//! Every byte value maps to one fixed glyph of one to three UTF-8 bytes.
//! Printable ASCII mostly stands for itself, control and shell-sensitive
//! bytes get distinctive symbols, and the high half maps into Latin-1 and
//! Latin Extended. The glyph set is prefix-free, so the text decodes back
//! to the exact input with a greedy longest match.
//!
//! ```rust
//! use printable_binary::{decode, encode};
//!
//! let text = encode(b"Hello, World!");
//! assert_eq!(text, "Hello,\u{2423}World\u{FE57}");
//! assert_eq!(decode(text.as_bytes()), b"Hello, World!");
//! ```
//!
//! Decoding is forgiving by default: spaces, tabs and line breaks are
//! layout and get dropped, and bytes that start no glyph are skipped. See
//! [`DecoderOptions`] for the strict variant and [`Decoder`] for feeding
//! input in chunks.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod decoder;
mod encoder;
mod error;
mod format;
mod glyph;
#[cfg(feature = "listing")]
mod listing;
mod options;
mod table;

#[cfg(any(test, feature = "fuzzing"))]
mod chunk_utils;

#[cfg(test)]
mod tests;

#[cfg(any(test, feature = "fuzzing"))]
#[doc(hidden)]
pub use chunk_utils::{produce_chunks, split_at_offsets};
pub use decoder::{DecodeSummary, Decoded, Decoder, decode, decode_with};
pub use encoder::{encode, encode_into, encoded_len};
pub use error::{DecodeError, LayoutError};
pub use format::{Grouper, Layout, format_grouped};
pub use glyph::{Glyph, LeadClass};
#[cfg(feature = "listing")]
pub use listing::{
    Instruction, ListingLine, RECEIPT, annotate_cstool, annotate_objdump, parse_cstool_line,
    parse_objdump_line, render_instruction,
};
pub use options::DecoderOptions;
pub use table::{CODE_TABLE, CodeTable, TableEntry};
