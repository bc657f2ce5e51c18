//! File-level inclusion proofs: bottom-up collection over the file BMT and
//! the tree-independent verifier.

use alloy_primitives::B256;

use super::ChunkedFile;
use super::tree::split_carrier;
use crate::address::SwarmAddress;
use crate::bmt::proof::{hash_with_span, merge_segment_pair};
use crate::bmt::{BmtError, CHUNK_BMT_LEVELS, MAX_DATA_LENGTH, MAX_SEGMENT_COUNT, SEGMENT_SIZE};
use crate::error::Result;
use crate::span::{Span, span_value};

/// One level of rising in a file inclusion proof.
///
/// Carries the span of the chunk the traced segment (or child address) sits
/// in, plus the seven sister segments along that chunk's intra-chunk BMT.
/// The proof for a segment is the ordered list of these records from the
/// leaf level to the root; levels skipped by a carrier chunk contribute no
/// record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkInclusionProof {
    /// Serialized span of the proved chunk
    pub span: Span,
    /// Sister segments ordered from the data level upward
    pub sister_segments: Vec<B256>,
}

/// Collect the bottom-up inclusion proof for `segment_index` of the file
/// payload.
pub(super) fn collect(
    file: &ChunkedFile,
    segment_index: u64,
) -> Result<Vec<ChunkInclusionProof>> {
    let file_size = file.span_value();
    if segment_index * SEGMENT_SIZE as u64 >= file_size {
        return Err(BmtError::segment_index_out_of_range(
            segment_index,
            file_size / SEGMENT_SIZE as u64,
        )
        .into());
    }

    let levels = file.bmt();
    let mut proofs = Vec::new();
    let mut idx = segment_index as usize;
    let mut level = 0;

    loop {
        if levels[level].len() == 1 {
            break;
        }
        let (working, _) = split_carrier(&levels[level]);

        // Position of the traced object within its chunk's payload, fixed
        // before any carrier ascent.
        let position = idx % MAX_SEGMENT_COUNT;
        let chunk_index = idx / MAX_SEGMENT_COUNT;

        let chunk = if chunk_index == working.len() {
            // The traced object is the in-transit carrier. It contributes no
            // record on the levels it skips, so rise with it until it has
            // merged next to genuine siblings; there it is the rightmost
            // chunk of its level.
            idx >>= CHUNK_BMT_LEVELS;
            while idx % MAX_SEGMENT_COUNT == 0 {
                level += 1;
                idx >>= CHUNK_BMT_LEVELS;
            }
            let merged = &levels[level];
            idx = merged.len() - 1;
            &merged[merged.len() - 1]
        } else {
            idx = chunk_index;
            &working[chunk_index]
        };

        proofs.push(ChunkInclusionProof {
            span: chunk.span_bytes(),
            sister_segments: chunk.inclusion_proof(position)?.to_vec(),
        });

        level += 1;
    }

    // The last record proves the traced branch within the root chunk.
    let root = &levels[levels.len() - 1][0];
    proofs.push(ChunkInclusionProof {
        span: root.span_bytes(),
        sister_segments: root.inclusion_proof(idx)?.to_vec(),
    });

    Ok(proofs)
}

/// Reconstruct the file address from an inclusion proof, the proved segment
/// and its index, without access to the tree.
///
/// Walks the records bottom-up: each record folds its seven sisters into the
/// running hash and commits the chunk's span, yielding that chunk's address,
/// which becomes the object proved by the next record. The last record's
/// span doubles as the file size, from which the verifier re-derives the
/// carrier shortcuts the collector took.
pub fn file_address_from_inclusion_proof(
    proof_chunks: &[ChunkInclusionProof],
    prove_segment: &[u8],
    prove_segment_index: u64,
) -> Result<SwarmAddress> {
    if proof_chunks.is_empty() {
        return Err(BmtError::invalid_proof_length(1, 0).into());
    }
    if prove_segment.len() != SEGMENT_SIZE {
        return Err(BmtError::invalid_segment_size(SEGMENT_SIZE, prove_segment.len()).into());
    }

    let file_size = span_value(&proof_chunks[proof_chunks.len() - 1].span);
    let mut last_chunk_index = file_size.saturating_sub(1) / MAX_DATA_LENGTH as u64;
    let mut segment_index = prove_segment_index;
    let mut hash = B256::from_slice(prove_segment);

    for proof_chunk in proof_chunks {
        if proof_chunk.sister_segments.len() != CHUNK_BMT_LEVELS {
            return Err(BmtError::invalid_proof_length(
                CHUNK_BMT_LEVELS,
                proof_chunk.sister_segments.len(),
            )
            .into());
        }

        let (parent_chunk_index, levels_skipped) =
            bmt_index_of_segment(segment_index, last_chunk_index);

        for sister in &proof_chunk.sister_segments {
            hash = merge_segment_pair(&hash, sister, segment_index % 2 == 0);
            segment_index /= 2;
        }
        hash = hash_with_span(&proof_chunk.span, &hash);

        // Lands on the carrier's resting position when the traced chunk was
        // carried, and on the uniform-division position otherwise.
        segment_index = parent_chunk_index;
        last_chunk_index >>= CHUNK_BMT_LEVELS as u32 * (levels_skipped + 1);
    }

    Ok(hash.into())
}

/// Position of a payload segment's chunk in the file BMT.
///
/// Returns the chunk's index on the level where it rests and the number of
/// levels it skipped as a carrier (zero for chunks that were never
/// promoted). `last_chunk_index` is the index of the file's rightmost chunk
/// on the segment's level.
pub fn bmt_index_of_segment(mut segment_index: u64, last_chunk_index: u64) -> (u64, u32) {
    let max_segment_count = MAX_SEGMENT_COUNT as u64;
    let mut levels_skipped = 0;

    let in_carrier = segment_index / max_segment_count == last_chunk_index // subsumed under the last chunk
        && last_chunk_index % max_segment_count == 0 // the last chunk is a carrier
        && last_chunk_index != 0; // more than a root chunk

    segment_index >>= CHUNK_BMT_LEVELS;
    if in_carrier {
        while segment_index % max_segment_count == 0 {
            levels_skipped += 1;
            segment_index >>= CHUNK_BMT_LEVELS;
        }
    }

    (segment_index, levels_skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmt::PROOF_LENGTH;
    use crate::error::PrimitivesError;
    use crate::span::make_span;
    use proptest::prelude::*;

    // A payload whose last leaf is a carrier chunk: 129 leaves, the 129th
    // holding a single 33-byte tail.
    const CARRIER_LEN: usize = 128 * MAX_DATA_LENGTH + 33;

    fn patterned(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    fn padded_segment(payload: &[u8], segment_index: u64) -> [u8; SEGMENT_SIZE] {
        let start = segment_index as usize * SEGMENT_SIZE;
        let end = (start + SEGMENT_SIZE).min(payload.len());
        let mut segment = [0u8; SEGMENT_SIZE];
        segment[..end - start].copy_from_slice(&payload[start..end]);
        segment
    }

    fn assert_round_trip(file: &ChunkedFile, segment_index: u64) -> Vec<ChunkInclusionProof> {
        let proof = file.inclusion_proof(segment_index).unwrap();
        let segment = padded_segment(file.payload(), segment_index);

        let address =
            file_address_from_inclusion_proof(&proof, &segment, segment_index).unwrap();
        assert_eq!(
            &address,
            file.address(),
            "proof round trip failed at segment {segment_index}"
        );
        proof
    }

    #[test]
    fn test_round_trip_single_chunk() {
        let file = ChunkedFile::new(vec![1u8, 2, 3]).unwrap();
        let proof = assert_round_trip(&file, 0);
        assert_eq!(proof.len(), 1);
    }

    #[test]
    fn test_round_trip_two_levels() {
        let payload = patterned(MAX_DATA_LENGTH + 1);
        let file = ChunkedFile::new(payload).unwrap();

        for segment_index in [0, 1, 127, 128] {
            let proof = assert_round_trip(&file, segment_index);
            assert_eq!(proof.len(), 2);
        }
    }

    #[test]
    fn test_round_trip_every_leaf_boundary() {
        let payload = patterned(3 * MAX_DATA_LENGTH + 100);
        let file = ChunkedFile::new(payload.clone()).unwrap();
        let max_index = (payload.len() as u64 - 1) / SEGMENT_SIZE as u64;

        for segment_index in [0, 127, 128, 255, 256, 383, 384, max_index] {
            assert_round_trip(&file, segment_index);
        }
    }

    #[test]
    fn test_carrier_proof_takes_the_shortcut() {
        let payload = patterned(CARRIER_LEN);
        let file = ChunkedFile::new(payload.clone()).unwrap();
        let last_index = (payload.len() as u64 - 1) / SEGMENT_SIZE as u64;

        // The traced segment sits in the carried leaf: one level is skipped,
        // so the proof is one record shorter than the tree is tall.
        assert_eq!(file.bmt().len(), 3);
        let proof = assert_round_trip(&file, last_index);
        assert_eq!(proof.len(), 2);

        // A segment in a grouped leaf rises through every level.
        let proof = assert_round_trip(&file, 0);
        assert_eq!(proof.len(), 3);
        assert_round_trip(&file, 1000);
    }

    #[test]
    fn test_intermediate_level_carrier() {
        // 128 full intermediate groups plus two extra leaves: the carrier
        // appears among the intermediate chunks, not the leaves.
        let payload = patterned(128 * 128 * MAX_DATA_LENGTH + 2 * MAX_DATA_LENGTH);
        let file = ChunkedFile::new(payload.clone()).unwrap();

        let levels = file.bmt();
        assert_eq!(levels.len(), 4);
        assert_eq!(levels[1].len(), 129);
        assert_eq!(levels[1][128].payload().len(), 2 * SEGMENT_SIZE);

        let last_index = (payload.len() as u64 - 1) / SEGMENT_SIZE as u64;
        let proof = assert_round_trip(&file, last_index);
        assert_eq!(proof.len(), 3);

        let proof = assert_round_trip(&file, 1000);
        assert_eq!(proof.len(), 4);

        let result = file.inclusion_proof(last_index + 1);
        assert!(matches!(
            result,
            Err(PrimitivesError::Bmt(BmtError::SegmentIndexOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_last_record_span_is_file_span() {
        for len in [100, MAX_DATA_LENGTH + 1, CARRIER_LEN] {
            let file = ChunkedFile::new(patterned(len)).unwrap();
            let proof = file.inclusion_proof(0).unwrap();
            assert_eq!(proof[proof.len() - 1].span, file.span());
        }
    }

    #[test]
    fn test_segment_index_out_of_range() {
        let payload = patterned(CARRIER_LEN);
        let file = ChunkedFile::new(payload.clone()).unwrap();
        let first_invalid = (payload.len() as u64 - 1) / SEGMENT_SIZE as u64 + 1;

        let err = file.inclusion_proof(first_invalid).unwrap_err();
        assert!(err.to_string().starts_with("The given segment index"));

        let err = ChunkedFile::new(vec![0u8; 33])
            .unwrap()
            .inclusion_proof(2)
            .unwrap_err();
        assert!(matches!(
            err,
            PrimitivesError::Bmt(BmtError::SegmentIndexOutOfRange { index: 2, max: 1 })
        ));
    }

    #[test]
    fn test_alter_one_segment() {
        let payload = patterned(CARRIER_LEN);
        let mut altered = payload.clone();
        altered[0] = altered[0].wrapping_add(1);

        let file = ChunkedFile::new(payload.clone()).unwrap();
        let altered_file = ChunkedFile::new(altered.clone()).unwrap();

        // The sisters of segment 0 never include segment 0 itself
        let proof = file.inclusion_proof(0).unwrap();
        let altered_proof = altered_file.inclusion_proof(0).unwrap();
        assert_eq!(proof, altered_proof);

        assert_ne!(file.address(), altered_file.address());

        let segment = padded_segment(&payload, 0);
        let altered_segment = padded_segment(&altered, 0);
        assert_ne!(segment, altered_segment);

        assert_eq!(
            &file_address_from_inclusion_proof(&proof, &segment, 0).unwrap(),
            file.address()
        );
        assert_eq!(
            &file_address_from_inclusion_proof(&altered_proof, &altered_segment, 0).unwrap(),
            altered_file.address()
        );
    }

    #[test]
    fn test_verifier_rejects_empty_proof() {
        let result = file_address_from_inclusion_proof(&[], &[0u8; SEGMENT_SIZE], 0);
        assert!(matches!(
            result,
            Err(PrimitivesError::Bmt(BmtError::InvalidProofLength { actual: 0, .. }))
        ));
    }

    #[test]
    fn test_verifier_rejects_short_sister_list() {
        let proof = [ChunkInclusionProof {
            span: make_span(3),
            sister_segments: vec![B256::ZERO; PROOF_LENGTH - 1],
        }];
        let result = file_address_from_inclusion_proof(&proof, &[0u8; SEGMENT_SIZE], 0);
        assert!(matches!(
            result,
            Err(PrimitivesError::Bmt(BmtError::InvalidProofLength {
                expected: PROOF_LENGTH,
                actual: 6,
            }))
        ));
    }

    #[test]
    fn test_verifier_rejects_bad_segment_size() {
        let file = ChunkedFile::new(vec![1u8, 2, 3]).unwrap();
        let proof = file.inclusion_proof(0).unwrap();

        let result = file_address_from_inclusion_proof(&proof, &[0u8; SEGMENT_SIZE + 1], 0);
        assert!(matches!(
            result,
            Err(PrimitivesError::Bmt(BmtError::InvalidSegmentSize { actual: 33, .. }))
        ));
    }

    #[test]
    fn test_bmt_index_of_segment() {
        // Plain chunks divide uniformly
        assert_eq!(bmt_index_of_segment(1000, 16385), (7, 0));
        assert_eq!(bmt_index_of_segment(2_097_407, 16385), (16385, 0));

        // A carried chunk skips levels until it rests
        assert_eq!(bmt_index_of_segment(16385, 128), (1, 1));
        assert_eq!(bmt_index_of_segment(16384, 128), (1, 1));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn test_random_round_trips(
            len in 1usize..=3 * MAX_DATA_LENGTH,
            index_seed in any::<u64>(),
        ) {
            let payload = patterned(len);
            let file = ChunkedFile::new(payload.clone()).unwrap();

            let max_index = (len as u64 - 1) / SEGMENT_SIZE as u64;
            let segment_index = index_seed % (max_index + 1);
            assert_round_trip(&file, segment_index);
        }
    }
}
