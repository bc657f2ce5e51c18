//! File BMT level construction and the carrier-chunk rule.

use bytes::BytesMut;

use crate::bmt::{MAX_SEGMENT_COUNT, SEGMENT_SIZE};
use crate::chunk::Chunk;

/// True when the rightmost chunk of a level must be promoted to the next
/// level: grouped alone, it would produce a parent whose payload wraps a
/// single address in zeros without combining any information.
pub(crate) fn has_carrier(level_len: usize) -> bool {
    level_len > 1 && level_len % MAX_SEGMENT_COUNT == 1
}

/// Split a level into the chunks to group and the promoted carrier, if any.
pub(crate) fn split_carrier(level: &[Chunk]) -> (&[Chunk], Option<&Chunk>) {
    if has_carrier(level.len()) {
        let (rest, carrier) = level.split_at(level.len() - 1);
        (rest, Some(&carrier[0]))
    } else {
        (level, None)
    }
}

/// Combine up to 128 children into an intermediate chunk whose payload is
/// the concatenation of the child addresses and whose span is the sum of the
/// child spans.
pub(crate) fn intermediate_chunk(children: &[Chunk]) -> Chunk {
    let mut payload = BytesMut::with_capacity(children.len() * SEGMENT_SIZE);
    let mut span = 0u64;
    for child in children {
        payload.extend_from_slice(child.address().as_bytes());
        span += child.span();
    }

    Chunk::new_unchecked(span, payload.freeze())
}

/// Build the level above `level`: group the non-carrier chunks in runs of up
/// to 128 and re-append the carrier, which the next round re-examines.
pub(crate) fn next_level(level: &[Chunk]) -> Vec<Chunk> {
    let (groupable, carrier) = split_carrier(level);

    let mut next: Vec<Chunk> = groupable
        .chunks(MAX_SEGMENT_COUNT)
        .map(intermediate_chunk)
        .collect();
    if let Some(carrier) = carrier {
        next.push(carrier.clone());
    }

    next
}

/// Build all levels of the file BMT bottom-up until a single root remains.
///
/// A promoted carrier re-appears as the rightmost entry of every level it
/// traverses; the appearances are value-equal and share one payload buffer.
pub(crate) fn build_tree(leaves: Vec<Chunk>) -> Vec<Vec<Chunk>> {
    let mut levels = vec![leaves];
    while levels[levels.len() - 1].len() > 1 {
        let next = next_level(&levels[levels.len() - 1]);
        levels.push(next);
    }

    levels
}
