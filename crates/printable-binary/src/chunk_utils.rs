use alloc::vec::Vec;

/// Split `payload` into approximately equal-sized chunks.
///
/// Chunk boundaries ignore glyph boundaries on purpose: the decoder has to
/// reassemble glyphs split across feeds.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// Split `payload` at the positions given by `splits`, each taken modulo
/// the remaining length. Used to drive arbitrary partitions from quickcheck.
#[must_use]
pub fn split_at_offsets<'a>(payload: &'a [u8], splits: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::with_capacity(splits.len() + 1);
    let mut rest = payload;
    for &split in splits {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(1 + split % rest.len());
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}
