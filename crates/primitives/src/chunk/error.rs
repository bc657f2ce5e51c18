use thiserror::Error;

/// Errors specific to chunk operations
#[derive(Error, Debug)]
pub enum ChunkError {
    /// Payload does not fit in a single chunk
    #[error("Payload too large for chunk: {actual} bytes exceeds maximum of {max}")]
    PayloadTooLarge {
        /// Maximum chunk payload size
        max: usize,
        /// Size of the payload received
        actual: usize,
    },

    /// A span at or below the chunk capacity must equal the payload length
    #[error("Span does not match payload length: span {span}, payload {actual} bytes")]
    SpanMismatch {
        /// The claimed span
        span: u64,
        /// Actual payload length
        actual: usize,
    },

    /// Buffer too short to contain a serialized chunk
    #[error("Insufficient data for chunk: need at least {expected} bytes, got {actual}")]
    InsufficientData {
        /// Minimum number of bytes required
        expected: usize,
        /// Number of bytes received
        actual: usize,
    },
}

impl ChunkError {
    /// Error for a payload exceeding the chunk capacity
    pub fn payload_too_large(max: usize, actual: usize) -> Self {
        Self::PayloadTooLarge { max, actual }
    }

    /// Error for a span that contradicts the payload length
    pub fn span_mismatch(span: u64, actual: usize) -> Self {
        Self::SpanMismatch { span, actual }
    }

    /// Error for a buffer too short to deserialize
    pub fn insufficient_data(expected: usize, actual: usize) -> Self {
        Self::InsufficientData { expected, actual }
    }
}
