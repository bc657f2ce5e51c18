//! Content-addressed chunk implementation
//!
//! This module provides the chunk record: an 8-byte span and at most 4096
//! payload bytes, addressed by the keccak256 hash of the span and the BMT
//! root of the zero-padded payload.

use std::fmt;
use std::sync::OnceLock;

use alloy_primitives::{B256, hex};
use bytes::{Bytes, BytesMut};

use crate::bmt::{
    BmtError, BmtHasher, BmtTree, MAX_DATA_LENGTH, MAX_SEGMENT_COUNT, PROOF_LENGTH,
};
use crate::chunk::ChunkAddress;
use crate::chunk::error::ChunkError;
use crate::error::{PrimitivesError, Result};
use crate::span::{SPAN_SIZE, Span, make_span};

/// A content-addressed chunk.
///
/// Leaf chunks carry a slice of the original input; intermediate chunks
/// carry a concatenation of child chunk addresses with the children's summed
/// span. Both flavors share this one representation — the distinction lives
/// in how the payload was populated. The payload is stored unpadded; hashing
/// pads it to the full chunk size. Immutable once created; the address is
/// computed lazily and cached.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Number of payload bytes subsumed under this chunk
    span: u64,
    /// The unpadded payload
    payload: Bytes,
    /// Cache for the chunk's address
    address: OnceLock<ChunkAddress>,
}

impl Chunk {
    /// Create a chunk over `payload` with the span set to the payload
    /// length.
    #[must_use = "this returns a new chunk without modifying the input"]
    pub fn new(payload: impl Into<Bytes>) -> Result<Self> {
        let payload = validate_payload(payload)?;
        let span = payload.len() as u64;
        Ok(Self::new_unchecked(span, payload))
    }

    /// Create a chunk with an explicit span.
    ///
    /// Spans at or below the chunk capacity must equal the payload length;
    /// larger spans are taken as-is, since an intermediate chunk subsumes
    /// more bytes than it stores.
    #[must_use = "this returns a new chunk without modifying the input"]
    pub fn with_span(payload: impl Into<Bytes>, span: u64) -> Result<Self> {
        let payload = validate_payload(payload)?;
        if span <= MAX_DATA_LENGTH as u64 && span != payload.len() as u64 {
            return Err(ChunkError::span_mismatch(span, payload.len()).into());
        }
        Ok(Self::new_unchecked(span, payload))
    }

    // Callers guarantee the payload fits in a chunk.
    pub(crate) fn new_unchecked(span: u64, payload: Bytes) -> Self {
        Self {
            span,
            payload,
            address: OnceLock::new(),
        }
    }

    /// The unpadded payload bytes
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// The payload zero-padded to the full chunk size
    pub fn data(&self) -> [u8; MAX_DATA_LENGTH] {
        let mut data = [0u8; MAX_DATA_LENGTH];
        data[..self.payload.len()].copy_from_slice(&self.payload);
        data
    }

    /// The number of payload bytes subsumed under this chunk
    pub fn span(&self) -> u64 {
        self.span
    }

    /// The span in its serialized little-endian form
    pub fn span_bytes(&self) -> Span {
        make_span(self.span)
    }

    /// The chunk address: `keccak256(span ‖ bmt_root(payload))`, computed on
    /// first use and cached
    pub fn address(&self) -> &ChunkAddress {
        self.address.get_or_init(|| {
            let mut hasher = BmtHasher::new();
            hasher.set_span(self.span);
            hasher.update_data(&self.payload);
            hasher.sum().into()
        })
    }

    /// The materialized intra-chunk BMT of the padded payload
    pub fn bmt(&self) -> BmtTree {
        BmtTree::new(&self.payload)
    }

    /// Sister segments proving the inclusion of the segment at `position`
    /// under this chunk's BMT root, ordered from the data level upward.
    pub fn inclusion_proof(&self, position: usize) -> Result<[B256; PROOF_LENGTH]> {
        if position >= MAX_SEGMENT_COUNT {
            return Err(BmtError::segment_index_out_of_range(
                position as u64,
                MAX_SEGMENT_COUNT as u64,
            )
            .into());
        }
        Ok(self.bmt().sister_segments(position))
    }

    /// Total serialized size in bytes (span plus payload)
    pub fn size(&self) -> usize {
        SPAN_SIZE + self.payload.len()
    }
}

/// Validates the payload size and returns the payload as Bytes.
fn validate_payload(payload: impl Into<Bytes>) -> Result<Bytes> {
    let payload = payload.into();
    if payload.len() > MAX_DATA_LENGTH {
        return Err(ChunkError::payload_too_large(MAX_DATA_LENGTH, payload.len()).into());
    }
    Ok(payload)
}

impl From<Chunk> for Bytes {
    fn from(chunk: Chunk) -> Self {
        let mut bytes = BytesMut::with_capacity(chunk.size());
        bytes.extend_from_slice(&chunk.span_bytes());
        bytes.extend_from_slice(&chunk.payload);
        bytes.freeze()
    }
}

impl TryFrom<Bytes> for Chunk {
    type Error = PrimitivesError;

    fn try_from(mut buf: Bytes) -> Result<Self> {
        if buf.len() < SPAN_SIZE {
            return Err(ChunkError::insufficient_data(SPAN_SIZE, buf.len()).into());
        }

        let span_bytes = buf.split_to(SPAN_SIZE);
        let span = u64::from_le_bytes(span_bytes.as_ref().try_into()?);

        Self::with_span(buf, span)
    }
}

impl TryFrom<&[u8]> for Chunk {
    type Error = PrimitivesError;

    fn try_from(buf: &[u8]) -> Result<Self> {
        Self::try_from(Bytes::copy_from_slice(buf))
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk[{}]", hex::encode(&self.address().as_bytes()[..8]))
    }
}

impl PartialEq for Chunk {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for Chunk {}

#[cfg(any(test, feature = "arbitrary"))]
impl<'a> arbitrary::Arbitrary<'a> for Chunk {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let len: usize = u.int_in_range(0..=MAX_DATA_LENGTH)?;
        let mut buf = vec![0; len];
        u.fill_buffer(&mut buf)?;

        Ok(Self::new_unchecked(len as u64, buf.into()))
    }
}
