//! Constants used in the Binary Merkle Tree implementation

/// Hash size in bytes (keccak256)
pub const HASH_SIZE: usize = 32;

/// Size of a segment in the BMT (same as hash size)
pub const SEGMENT_SIZE: usize = HASH_SIZE;

/// Length of a segment pair (two segments)
pub(crate) const SEGMENT_PAIR_SIZE: usize = 2 * SEGMENT_SIZE;

/// Number of segments in a fully populated chunk payload
pub const MAX_SEGMENT_COUNT: usize = 128;

/// Maximum chunk payload size in bytes (128 segments of 32 bytes)
pub const MAX_DATA_LENGTH: usize = MAX_SEGMENT_COUNT * SEGMENT_SIZE;

/// Internal levels of the intra-chunk BMT (log2(128))
pub const CHUNK_BMT_LEVELS: usize = 7;

/// Number of sister segments in an intra-chunk inclusion proof, one per
/// internal tree level
pub const PROOF_LENGTH: usize = CHUNK_BMT_LEVELS;
