/// Configuration options for the decoder.
///
/// The defaults reproduce the lenient behaviour that decoding of annotated
/// or reformatted text relies on: formatting whitespace is removed and any
/// byte sequence that is not a glyph is silently skipped.
///
/// # Examples
///
/// ```rust
/// use printable_binary::{DecoderOptions, decode_with};
///
/// let options = DecoderOptions {
///     strict: true,
///     ..Default::default()
/// };
/// assert!(decode_with("AB\u{2205}".as_bytes(), options).is_ok());
/// assert!(decode_with(b"A\xFFB", options).is_err());
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Whether to stop at the first byte that cannot be matched to a glyph.
    ///
    /// When `false`, unmatched bytes are skipped one at a time and counted.
    /// When `true`, the first unmatched byte produces
    /// [`DecodeError::Unrecognized`](crate::DecodeError::Unrecognized).
    /// Strict decoding rejects any text interleaved with the glyphs, such as
    /// disassembler mnemonics.
    ///
    /// # Default
    ///
    /// `false`
    pub strict: bool,

    /// Whether to feed ASCII space, tab, line feed and carriage return to the
    /// scanner instead of removing them first.
    ///
    /// No glyph contains these bytes, so with this option set they are
    /// skipped like any other unrecognized byte (or rejected when
    /// [`strict`](Self::strict) is also set). Stripping happens before
    /// scanning, so a glyph split by a line break still decodes when this
    /// option is `false`.
    ///
    /// # Default
    ///
    /// `false`
    pub keep_whitespace: bool,
}
