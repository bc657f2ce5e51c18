//! Swarm BMT content addressing primitives
//!
//! This crate computes the Swarm-compatible Binary Merkle Tree (BMT) address
//! of an arbitrary byte payload and produces compact inclusion proofs for
//! any 32-byte segment, verifiable by a third party that never sees the
//! tree.
//!
//! ## Key Components
//!
//! - **Chunks**: span plus up-to-4096-byte payload, content-addressed by
//!   `keccak256(span ‖ bmt_root(payload))` ([`Chunk`])
//! - **File BMT**: multi-level tree over chunk addresses with the
//!   carrier-chunk promotion rule ([`ChunkedFile`])
//! - **Inclusion proofs**: bottom-up collection and tree-free verification
//!   ([`ChunkedFile::inclusion_proof`], [`file_address_from_inclusion_proof`])
//!
//! ## Usage Examples
//!
//! ```
//! use propolis_primitives::{Chunk, ChunkedFile, file_address_from_inclusion_proof};
//!
//! // Address a single chunk of data
//! let chunk = Chunk::new(b"Hello, world!".as_slice()).unwrap();
//! let address = chunk.address();
//! assert!(!address.is_zero());
//!
//! // Address a file and prove one of its segments
//! let payload = vec![0x42u8; 10_000];
//! let file = ChunkedFile::new(payload.clone()).unwrap();
//!
//! let segment_index = 200;
//! let proof = file.inclusion_proof(segment_index).unwrap();
//! let segment: [u8; 32] = payload[6400..6432].try_into().unwrap();
//!
//! let rebuilt = file_address_from_inclusion_proof(&proof, &segment, segment_index).unwrap();
//! assert_eq!(&rebuilt, file.address());
//! ```

// Re-export dependencies that are part of our public API
pub use bytes;

pub mod address;
pub mod bmt;
pub mod chunk;
pub mod error;
pub mod file;
pub mod span;

// Re-export core constants
pub use bmt::MAX_DATA_LENGTH as MAX_CHUNK_SIZE;
pub use span::{SPAN_SIZE, Span, make_span, span_value};

// Re-export core types
pub use address::SwarmAddress;
pub use error::{PrimitivesError, Result};

// Core BMT functionality
pub use bmt::{BmtHasher, BmtTree, root_hash_from_inclusion_proof};

// Core chunk and file functionality
pub use chunk::{Chunk, ChunkAddress};
pub use file::{
    ChunkInclusionProof, ChunkedFile, bmt_index_of_segment, file_address_from_inclusion_proof,
};
