//! Chunked files and the multi-level file BMT
//!
//! A payload longer than one chunk is split into 4096-byte leaf chunks,
//! whose addresses are grouped 128 at a time into intermediate chunks, and
//! so on up to a single root whose address is the file address. A lone
//! right-edge chunk is never grouped alone: the carrier-chunk rule promotes
//! it upward until it can be packed next to genuine siblings (or becomes the
//! root), keeping the tree dense.
//!
//! ## Example Usage
//!
//! ```
//! use propolis_primitives::file::{ChunkedFile, file_address_from_inclusion_proof};
//!
//! let file = ChunkedFile::new(b"hello world".as_slice()).unwrap();
//!
//! // Prove the first segment and rebuild the address from the proof alone.
//! let proof = file.inclusion_proof(0).unwrap();
//! let mut segment = [0u8; 32];
//! segment[..11].copy_from_slice(b"hello world");
//!
//! let address = file_address_from_inclusion_proof(&proof, &segment, 0).unwrap();
//! assert_eq!(&address, file.address());
//! ```

pub(crate) mod error;
mod proof;
mod tree;

pub use error::FileError;
pub use proof::{ChunkInclusionProof, bmt_index_of_segment, file_address_from_inclusion_proof};

use std::sync::OnceLock;

use bytes::Bytes;

use crate::bmt::MAX_DATA_LENGTH;
use crate::chunk::{Chunk, ChunkAddress};
use crate::error::Result;
use crate::span::{Span, make_span};

/// A payload chunked into a file BMT.
///
/// Holds the input bytes and the leaf chunks; the full tree is built on
/// first use and cached. Everything is immutable after construction.
#[derive(Debug, Clone)]
pub struct ChunkedFile {
    /// The original payload
    payload: Bytes,
    /// Leaf chunks in input order
    leaf_chunks: Vec<Chunk>,
    /// Cache for the tree levels
    tree: OnceLock<Vec<Vec<Chunk>>>,
}

impl ChunkedFile {
    /// Chunk `payload` into 4096-byte leaves. The payload must cover at
    /// least one byte; the last leaf keeps its unpadded length as its span.
    pub fn new(payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();
        if payload.is_empty() {
            return Err(FileError::EmptyPayload.into());
        }

        let mut leaf_chunks = Vec::with_capacity(payload.len().div_ceil(MAX_DATA_LENGTH));
        let mut offset = 0;
        while offset < payload.len() {
            let end = (offset + MAX_DATA_LENGTH).min(payload.len());
            leaf_chunks.push(Chunk::new(payload.slice(offset..end))?);
            offset = end;
        }

        Ok(Self {
            payload,
            leaf_chunks,
            tree: OnceLock::new(),
        })
    }

    /// The original payload
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// The leaf chunks in input order
    pub fn leaf_chunks(&self) -> &[Chunk] {
        &self.leaf_chunks
    }

    /// All levels of the file BMT bottom-up; the last level holds only the
    /// root. Built on first use and cached.
    pub fn bmt(&self) -> &[Vec<Chunk>] {
        self.tree
            .get_or_init(|| tree::build_tree(self.leaf_chunks.clone()))
    }

    /// The root chunk of the file BMT
    pub fn root_chunk(&self) -> &Chunk {
        let levels = self.bmt();
        &levels[levels.len() - 1][0]
    }

    /// The file address: the address of the root chunk
    pub fn address(&self) -> &ChunkAddress {
        self.root_chunk().address()
    }

    /// The file span: the total payload length, serialized little-endian
    pub fn span(&self) -> Span {
        make_span(self.payload.len() as u64)
    }

    /// The total payload length in bytes
    pub fn span_value(&self) -> u64 {
        self.payload.len() as u64
    }

    /// Collect the bottom-up inclusion proof for the payload segment at
    /// `segment_index`, one record per level the traced chunk occupies.
    pub fn inclusion_proof(&self, segment_index: u64) -> Result<Vec<ChunkInclusionProof>> {
        proof::collect(self, segment_index)
    }
}
