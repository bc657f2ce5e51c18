//! Materialized intra-chunk BMT levels.

use alloy_primitives::{B256, Keccak256};

use super::constants::*;

/// The fully materialized binary Merkle tree of one chunk payload.
///
/// Level 0 holds the 128 zero-padded data segments; each level above halves
/// the count by hashing sibling pairs, down to the single root on level 7.
/// Sister extraction for proofs is pure index arithmetic over the levels.
#[derive(Debug, Clone)]
pub struct BmtTree {
    levels: Vec<Vec<B256>>,
}

impl BmtTree {
    /// Build the tree over a chunk payload of at most 4096 bytes.
    ///
    /// The payload is zero-padded to the full chunk size before hashing, so
    /// short payloads produce the same tree shape as full ones.
    pub(crate) fn new(payload: &[u8]) -> Self {
        debug_assert!(payload.len() <= MAX_DATA_LENGTH);

        let mut segments = Vec::with_capacity(MAX_SEGMENT_COUNT);
        for i in 0..MAX_SEGMENT_COUNT {
            let mut segment = [0u8; SEGMENT_SIZE];
            let start = i * SEGMENT_SIZE;
            if start < payload.len() {
                let end = (start + SEGMENT_SIZE).min(payload.len());
                segment[..end - start].copy_from_slice(&payload[start..end]);
            }
            segments.push(B256::from(segment));
        }

        let mut levels = Vec::with_capacity(CHUNK_BMT_LEVELS + 1);
        let mut current = segments;
        for _ in 0..CHUNK_BMT_LEVELS {
            let next = current
                .chunks_exact(2)
                .map(|pair| {
                    let mut hasher = Keccak256::new();
                    hasher.update(pair[0]);
                    hasher.update(pair[1]);
                    hasher.finalize()
                })
                .collect();
            levels.push(current);
            current = next;
        }
        levels.push(current);

        Self { levels }
    }

    /// All levels bottom-up: level 0 is the data segments, the last level
    /// holds only the root
    pub fn levels(&self) -> &[Vec<B256>] {
        &self.levels
    }

    /// The BMT root of the payload
    pub fn root(&self) -> B256 {
        self.levels[CHUNK_BMT_LEVELS][0]
    }

    /// Sister segments of `position` on the way from the data level to the
    /// root, ordered bottom-up.
    ///
    /// At level `k` the sibling of the traced node sits at
    /// `(position >> k) ^ 1`.
    pub fn sister_segments(&self, position: usize) -> [B256; PROOF_LENGTH] {
        debug_assert!(position < MAX_SEGMENT_COUNT);
        std::array::from_fn(|k| self.levels[k][(position >> k) ^ 1])
    }
}
