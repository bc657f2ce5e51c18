//! Binary Merkle Tree hasher over single-chunk payloads.

use alloy_primitives::{B256, keccak256};
use digest::{FixedOutput, FixedOutputReset, OutputSizeUser, Reset, Update};
use generic_array::{GenericArray, typenum::U32};

use super::constants::*;
use super::proof::hash_with_span;

/// BMT hasher producing Swarm chunk hashes with keccak256.
///
/// The buffered payload is zero-padded to the full chunk size, split into
/// 128 segments and reduced pairwise over seven levels; the resulting root
/// is finalized together with the span as `keccak256(span_le ‖ root)`. The
/// pairwise reduction runs the two half-trees in parallel, which is
/// transparent: the result is bitwise identical to a sequential evaluation.
#[derive(Debug, Clone, Default)]
pub struct BmtHasher {
    span: u64,
    pending: Vec<u8>,
}

impl BmtHasher {
    /// Create a hasher with an empty buffer and a zero span
    pub fn new() -> Self {
        Self {
            span: 0,
            pending: Vec::with_capacity(MAX_DATA_LENGTH),
        }
    }

    /// Set the span committed to by the final hash
    pub fn set_span(&mut self, span: u64) {
        self.span = span;
    }

    /// Get the current span
    pub fn span(&self) -> u64 {
        self.span
    }

    /// Append payload bytes to the buffer
    pub fn update_data(&mut self, data: &[u8]) {
        self.pending.extend_from_slice(data);
    }

    /// Compute the chunk hash over the current span and buffer
    /// (non-destructive)
    pub fn sum(&self) -> B256 {
        let mut buffer = [0u8; MAX_DATA_LENGTH];
        let len = self.pending.len().min(MAX_DATA_LENGTH);
        buffer[..len].copy_from_slice(&self.pending[..len]);

        let root = hash_halves(&buffer);
        hash_with_span(&self.span.to_le_bytes(), &root)
    }

    /// Compute the chunk hash, then clear the buffer and zero the span
    /// (destructive)
    pub fn finalize(&mut self) -> B256 {
        let result = self.sum();
        self.reset_internal();
        result
    }

    fn reset_internal(&mut self) {
        self.pending.clear();
        self.span = 0;
    }
}

/// Reduce a power-of-two buffer of segments to its BMT root, descending into
/// the two halves in parallel.
fn hash_halves(data: &[u8]) -> B256 {
    if data.len() == SEGMENT_PAIR_SIZE {
        return keccak256(data);
    }

    let (left, right) = data.split_at(data.len() / 2);
    let (left_hash, right_hash) = rayon::join(|| hash_halves(left), || hash_halves(right));

    let mut pair = [0u8; SEGMENT_PAIR_SIZE];
    pair[..SEGMENT_SIZE].copy_from_slice(left_hash.as_slice());
    pair[SEGMENT_SIZE..].copy_from_slice(right_hash.as_slice());
    keccak256(pair)
}

// Implement the Digest trait methods so the hasher slots in wherever a
// 32-byte digest is expected.
impl OutputSizeUser for BmtHasher {
    type OutputSize = U32;
}

impl Update for BmtHasher {
    fn update(&mut self, data: &[u8]) {
        self.update_data(data);
    }
}

impl Reset for BmtHasher {
    fn reset(&mut self) {
        self.reset_internal();
    }
}

impl FixedOutput for BmtHasher {
    fn finalize_into(self, out: &mut GenericArray<u8, Self::OutputSize>) {
        out.copy_from_slice(self.sum().as_slice());
    }
}

impl FixedOutputReset for BmtHasher {
    fn finalize_into_reset(&mut self, out: &mut GenericArray<u8, Self::OutputSize>) {
        out.copy_from_slice(self.finalize().as_slice());
    }
}

impl digest::HashMarker for BmtHasher {}
