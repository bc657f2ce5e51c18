use thiserror::Error;

/// Errors specific to BMT and proof operations
#[derive(Error, Debug)]
pub enum BmtError {
    /// Segment index does not address a segment of the proved payload
    #[error("The given segment index {index} is greater than {max}")]
    SegmentIndexOutOfRange {
        /// The offending index
        index: u64,
        /// The highest segment count of the payload
        max: u64,
    },

    /// Proof has the wrong number of entries
    #[error("Invalid proof length: expected {expected}, got {actual}")]
    InvalidProofLength {
        /// Required number of entries
        expected: usize,
        /// Number of entries received
        actual: usize,
    },

    /// Proved segment is not exactly one segment wide
    #[error("Invalid segment size: expected {expected} bytes, got {actual}")]
    InvalidSegmentSize {
        /// Required segment width in bytes
        expected: usize,
        /// Width of the segment received
        actual: usize,
    },
}

impl BmtError {
    /// Error for a segment index past the end of the proved payload
    pub fn segment_index_out_of_range(index: u64, max: u64) -> Self {
        Self::SegmentIndexOutOfRange { index, max }
    }

    /// Error for a proof with the wrong number of entries
    pub fn invalid_proof_length(expected: usize, actual: usize) -> Self {
        Self::InvalidProofLength { expected, actual }
    }

    /// Error for a proved segment of the wrong width
    pub fn invalid_segment_size(expected: usize, actual: usize) -> Self {
        Self::InvalidSegmentSize { expected, actual }
    }
}
