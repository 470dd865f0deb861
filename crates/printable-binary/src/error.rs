use thiserror::Error;

/// Failure reported by a [`Decoder`](crate::Decoder) in strict mode.
///
/// Lenient decoding never fails.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A byte that does not start any glyph.
    #[error("unrecognized byte {byte:#04x} at offset {offset}")]
    Unrecognized {
        /// The offending byte.
        byte: u8,
        /// Position in the raw input, counting stripped whitespace.
        offset: usize,
    },
}

/// Failure parsing a [`Layout`](crate::Layout) from `NxM` notation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The `x` between the two numbers is missing.
    #[error("expected a layout like 8x10")]
    MissingSeparator,
    /// One side is not a number.
    #[error("invalid number in layout")]
    InvalidNumber(#[from] core::num::ParseIntError),
    /// One side is zero.
    #[error("layout dimensions must be at least 1")]
    Zero,
}
