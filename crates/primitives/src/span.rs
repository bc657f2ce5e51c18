//! Span encoding
//!
//! A span counts the original payload bytes subsumed under a chunk,
//! serialized as a 64-bit little-endian unsigned integer. Leaf chunks carry
//! the unpadded length of their slice, intermediate chunks the sum of their
//! children's spans, and the root chunk the total file length.

/// Size of a serialized span in bytes
pub const SPAN_SIZE: usize = std::mem::size_of::<u64>();

/// A serialized span: a 64-bit little-endian unsigned integer
pub type Span = [u8; SPAN_SIZE];

/// Encode a byte count as a span
#[inline]
pub fn make_span(value: u64) -> Span {
    value.to_le_bytes()
}

/// Decode a span back into the byte count it covers
#[inline]
pub fn span_value(span: &Span) -> u64 {
    u64::from_le_bytes(*span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_layout() {
        assert_eq!(make_span(3), [3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(make_span(4096), [0, 16, 0, 0, 0, 0, 0, 0]);
        assert_eq!(make_span(u64::MAX), [0xff; SPAN_SIZE]);
    }

    #[test]
    fn test_serialise_and_deserialise() {
        for value in [1, 4096, u32::MAX as u64, 15_726_634, u64::MAX] {
            assert_eq!(span_value(&make_span(value)), value);
        }
    }
}
