//! Segment inclusion proofs within a single chunk.

use alloy_primitives::{B256, Keccak256};

use super::constants::*;
use super::error::BmtError;
use crate::error::Result;
use crate::span::Span;

/// Rebuild a BMT root from a segment, its position and its sister segments.
///
/// Folds the sisters bottom-up: at each level the running hash is combined
/// from the left when the position bit is even and from the right when odd.
/// The caller compares the result against a known root; this function never
/// sees the tree.
pub fn root_hash_from_inclusion_proof(
    sister_segments: &[B256],
    segment: &[u8],
    mut position: usize,
) -> Result<B256> {
    if sister_segments.len() != PROOF_LENGTH {
        return Err(BmtError::invalid_proof_length(PROOF_LENGTH, sister_segments.len()).into());
    }
    if segment.len() != SEGMENT_SIZE {
        return Err(BmtError::invalid_segment_size(SEGMENT_SIZE, segment.len()).into());
    }

    let mut hash = B256::from_slice(segment);
    for sister in sister_segments {
        hash = merge_segment_pair(&hash, sister, position % 2 == 0);
        position >>= 1;
    }

    Ok(hash)
}

/// keccak256 of an ordered segment pair
pub(crate) fn merge_segment_pair(hash: &B256, sister: &B256, merge_from_right: bool) -> B256 {
    let mut hasher = Keccak256::new();
    if merge_from_right {
        hasher.update(hash);
        hasher.update(sister);
    } else {
        hasher.update(sister);
        hasher.update(hash);
    }
    hasher.finalize()
}

/// Chunk hash of a serialized span and a BMT root
pub(crate) fn hash_with_span(span: &Span, root: &B256) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(span);
    hasher.update(root);
    hasher.finalize()
}
