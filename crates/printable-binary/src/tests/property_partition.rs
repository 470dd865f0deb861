use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;

use super::arbitrary::GlyphSoup;
use crate::{
    Decoder, DecoderOptions, Grouper, Layout, decode_with, encode, format_grouped,
    produce_chunks, split_at_offsets,
};

fn tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Property: feeding damaged input in arbitrary pieces gives exactly the
/// same bytes, skip count and strict-mode error as decoding it whole.
#[test]
fn partition_decode_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(soup: GlyphSoup, splits: Vec<usize>, options: DecoderOptions) -> bool {
        let whole = decode_with(&soup.0, options);

        let mut decoder = Decoder::new(options);
        let mut out = Vec::new();
        let mut fed = Ok(());
        for chunk in split_at_offsets(&soup.0, &splits) {
            fed = decoder.feed(chunk, &mut out);
            if fed.is_err() {
                break;
            }
            if decoder.pending() >= 4 {
                return false;
            }
        }
        let pieces = fed.and_then(|()| decoder.finish(&mut out));

        match (whole, pieces) {
            (Ok(whole), Ok(summary)) => {
                whole.bytes == out
                    && whole.skipped == summary.skipped
                    && summary.decoded == out.len()
            }
            (Err(a), Err(b)) => a == b,
            _ => false,
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(GlyphSoup, Vec<usize>, DecoderOptions) -> bool);
}

/// Property: grouping a stream piece by piece matches grouping it whole.
#[test]
fn partition_grouping_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: Vec<u8>, splits: Vec<usize>, layout: Layout) -> bool {
        let mut grouper = Grouper::new(layout);
        let mut pieces = String::new();
        for chunk in split_at_offsets(&bytes, &splits) {
            grouper.push_str(&encode(chunk), &mut pieces);
        }
        pieces == format_grouped(&encode(&bytes), layout) && grouper.glyphs() == bytes.len()
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<u8>, Vec<usize>, Layout) -> bool);
}

#[test]
fn even_chunks_split_glyphs() {
    let encoded = encode(&(0..=255).collect::<Vec<u8>>());
    for parts in 1..=17 {
        let mut decoder = Decoder::default();
        let mut out = Vec::new();
        for chunk in produce_chunks(encoded.as_bytes(), parts) {
            decoder.feed(chunk, &mut out).unwrap();
        }
        let summary = decoder.finish(&mut out).unwrap();
        assert_eq!(out, (0..=255).collect::<Vec<u8>>(), "{parts} parts");
        assert_eq!(summary.skipped, 0);
    }
}
