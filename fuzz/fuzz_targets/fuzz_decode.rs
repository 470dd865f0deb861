#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use printable_binary::{
    Decoder, DecoderOptions, Layout, decode, decode_with, encode, format_grouped,
    split_at_offsets,
};

#[derive(Debug, Arbitrary)]
struct Input {
    data: Vec<u8>,
    splits: Vec<usize>,
    strict: bool,
    keep_whitespace: bool,
    group: u8,
    groups_per_line: u8,
}

fuzz_target!(|input: Input| {
    let options = DecoderOptions {
        strict: input.strict,
        keep_whitespace: input.keep_whitespace,
    };

    // Arbitrary bytes as glyph text: chunked decoding must agree with one shot.
    let whole = decode_with(&input.data, options);
    let mut decoder = Decoder::new(options);
    let mut out = Vec::new();
    let mut fed = Ok(());
    for chunk in split_at_offsets(&input.data, &input.splits) {
        fed = decoder.feed(chunk, &mut out);
        if fed.is_err() {
            break;
        }
        assert!(decoder.pending() < 4);
    }
    match (whole, fed.and_then(|()| decoder.finish(&mut out))) {
        (Ok(whole), Ok(summary)) => {
            assert_eq!(whole.bytes, out);
            assert_eq!(whole.skipped, summary.skipped);
        }
        (Err(a), Err(b)) => assert_eq!(a, b),
        (whole, pieces) => panic!("one-shot {whole:?} but chunked {pieces:?}"),
    }

    // Arbitrary bytes as payload: encoding always round-trips.
    let encoded = encode(&input.data);
    assert_eq!(decode(encoded.as_bytes()), input.data);
    if let Some(layout) = Layout::new(input.group.into(), input.groups_per_line.into()) {
        let grouped = format_grouped(&encoded, layout);
        assert_eq!(decode(grouped.as_bytes()), input.data);
    }
});
