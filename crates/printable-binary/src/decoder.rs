//! Decoder: longest-match-first tokenizer from glyph text back to bytes.
//!
//! What it does
//! - Drops ASCII space, tab, LF and CR before scanning (unless
//!   [`DecoderOptions::keep_whitespace`] is set). No glyph contains them, so
//!   grouped or line-wrapped text decodes the same as the bare glyph stream.
//! - Classifies the lead byte of the pending input with [`LeadClass`], tries
//!   to match that many bytes, then one fewer, down to one. The first match
//!   wins.
//! - Skips exactly one byte when nothing matches, counting it. In strict
//!   mode the skip is reported as [`DecodeError::Unrecognized`] instead.
//!
//! Streaming
//! - Input may arrive in chunks split anywhere, including inside a glyph.
//!   The decoder keeps a window of pending non-whitespace bytes and only
//!   resolves it once it holds as many bytes as the lead class asks for.
//!   [`Decoder::finish`] resolves whatever is left with a shorter window.
//!
//! Invariants
//! - The window never holds more than four bytes: after every resolution
//!   step it is shorter than the length its lead byte requires.
//! - For any input and any chunking, the bytes produced equal those of a
//!   single `feed` of the whole input followed by `finish`.
//! - Single-byte glyphs are `< 0x80` and multi-byte glyphs start at `0xC2`
//!   or above, so a run of ASCII glyphs never merges into a longer match and
//!   a multi-byte glyph is never split into shorter ones.

use alloc::vec::Vec;

use crate::{
    error::DecodeError,
    glyph::LeadClass,
    options::DecoderOptions,
    table::CODE_TABLE,
};

const WINDOW: usize = 4;

/// Decodes `input` with the default lenient options.
///
/// Whitespace is ignored and unrecognized bytes are dropped, so this never
/// fails.
///
/// ```rust
/// use printable_binary::{decode, encode};
///
/// let text = encode(b"Hello, World!");
/// assert_eq!(decode(text.as_bytes()), b"Hello, World!");
/// assert_eq!(decode("He\nllo".as_bytes()), b"Hello");
/// ```
#[must_use]
pub fn decode(input: &[u8]) -> Vec<u8> {
    match decode_with(input, DecoderOptions::default()) {
        Ok(decoded) => decoded.bytes,
        Err(_) => unreachable!("lenient decoding does not fail"),
    }
}

/// Decodes `input` in one call with explicit options.
///
/// # Errors
///
/// Returns [`DecodeError::Unrecognized`] for the first byte that matches no
/// glyph when [`DecoderOptions::strict`] is set.
pub fn decode_with(input: &[u8], options: DecoderOptions) -> Result<Decoded, DecodeError> {
    let mut bytes = Vec::with_capacity(input.len());
    let mut decoder = Decoder::new(options);
    decoder.feed(input, &mut bytes)?;
    let summary = decoder.finish(&mut bytes)?;
    Ok(Decoded {
        bytes,
        skipped: summary.skipped,
    })
}

/// Output of [`decode_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The recovered bytes.
    pub bytes: Vec<u8>,
    /// Number of input bytes that matched no glyph and were dropped.
    pub skipped: usize,
}

/// Totals reported by [`Decoder::finish`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Bytes produced.
    pub decoded: usize,
    /// Input bytes dropped because they matched no glyph. Stripped
    /// whitespace is not counted.
    pub skipped: usize,
}

/// Pending input bytes with their positions in the raw stream.
#[derive(Debug, Clone, Copy, Default)]
struct Window {
    bytes: [u8; WINDOW],
    offsets: [usize; WINDOW],
    len: usize,
}

impl Window {
    #[inline]
    fn push(&mut self, byte: u8, offset: usize) {
        debug_assert!(self.len < WINDOW, "decoder window overflow");
        self.bytes[self.len] = byte;
        self.offsets[self.len] = offset;
        self.len += 1;
    }

    #[inline]
    fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    #[inline]
    fn consume(&mut self, n: usize) {
        self.bytes.copy_within(n..self.len, 0);
        self.offsets.copy_within(n..self.len, 0);
        self.len -= n;
    }
}

/// Longest-match-first streaming decoder.
///
/// ```rust
/// use printable_binary::{Decoder, DecoderOptions};
///
/// // "∅" split across two chunks, with a line break in the middle.
/// let mut decoder = Decoder::new(DecoderOptions::default());
/// let mut out = Vec::new();
/// decoder.feed(&[0xE2, 0x88], &mut out).unwrap();
/// assert!(out.is_empty());
/// decoder.feed(b"\n\x85A", &mut out).unwrap();
/// let summary = decoder.finish(&mut out).unwrap();
/// assert_eq!(out, [0x00, b'A']);
/// assert_eq!(summary.skipped, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecoderOptions,
    window: Window,
    /// Raw bytes fed so far, including stripped whitespace.
    offset: usize,
    decoded: usize,
    skipped: usize,
    /// Strict-mode failure; sticky once set.
    failed: Option<DecodeError>,
}

enum Step {
    Matched { byte: u8, len: usize },
    Unmatched,
    NeedMore,
}

impl Decoder {
    /// Creates a decoder with the given options.
    #[must_use]
    pub fn new(options: DecoderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// The options this decoder was created with.
    #[must_use]
    pub fn options(&self) -> DecoderOptions {
        self.options
    }

    /// Number of bytes dropped so far.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of bytes produced so far.
    #[must_use]
    pub fn decoded(&self) -> usize {
        self.decoded
    }

    /// Number of input bytes held back waiting for the rest of a glyph.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.window.len
    }

    /// Decodes the next chunk of input, appending recovered bytes to `out`.
    ///
    /// Bytes that may be the start of a glyph completed by a later chunk are
    /// kept until the next `feed` or [`finish`](Self::finish).
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`DecodeError::Unrecognized`] for the first
    /// byte that matches no glyph. The rest of the chunk is not processed and
    /// every later call returns the same error.
    pub fn feed(&mut self, chunk: &[u8], out: &mut Vec<u8>) -> Result<(), DecodeError> {
        if let Some(err) = self.failed {
            return Err(err);
        }
        out.reserve(chunk.len() / 2);

        for &byte in chunk {
            let offset = self.offset;
            self.offset += 1;
            if !self.options.keep_whitespace && is_format_whitespace(byte) {
                continue;
            }
            self.window.push(byte, offset);
            self.resolve(false, out)?;
        }
        Ok(())
    }

    /// Resolves any held-back bytes and returns the totals.
    ///
    /// Held-back bytes that do not form a glyph on their own are handled
    /// with the same longest-match and skip rules as the rest of the input.
    ///
    /// # Errors
    ///
    /// Returns the strict-mode error from an earlier [`feed`](Self::feed),
    /// or a new one if the held-back bytes contain an unrecognized byte.
    pub fn finish(mut self, out: &mut Vec<u8>) -> Result<DecodeSummary, DecodeError> {
        if let Some(err) = self.failed {
            return Err(err);
        }
        self.resolve(true, out)?;
        tracing::debug!(
            input = self.offset,
            decoded = self.decoded,
            skipped = self.skipped,
            "decoder finished"
        );
        Ok(DecodeSummary {
            decoded: self.decoded,
            skipped: self.skipped,
        })
    }

    fn resolve(&mut self, at_end: bool, out: &mut Vec<u8>) -> Result<(), DecodeError> {
        loop {
            match self.step(at_end) {
                Step::NeedMore => return Ok(()),
                Step::Matched { byte, len } => {
                    out.push(byte);
                    self.decoded += 1;
                    self.window.consume(len);
                }
                Step::Unmatched => {
                    let byte = self.window.bytes[0];
                    let offset = self.window.offsets[0];
                    self.window.consume(1);
                    self.skipped += 1;
                    tracing::trace!(byte, offset, "skipping unrecognized byte");
                    if self.options.strict {
                        let err = DecodeError::Unrecognized { byte, offset };
                        self.failed = Some(err);
                        return Err(err);
                    }
                }
            }
        }
    }

    /// Decides what to do with the front of the window.
    fn step(&self, at_end: bool) -> Step {
        let pending = self.window.as_slice();
        let Some(&lead) = pending.first() else {
            return Step::NeedMore;
        };

        let want = LeadClass::of(lead).max_len();
        if pending.len() < want && !at_end {
            return Step::NeedMore;
        }

        let candidate = &pending[..want.min(pending.len())];
        (1..=candidate.len())
            .rev()
            .find_map(|len| {
                CODE_TABLE
                    .decode_byte(&candidate[..len])
                    .map(|byte| Step::Matched { byte, len })
            })
            .unwrap_or(Step::Unmatched)
    }
}

#[inline]
const fn is_format_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}
