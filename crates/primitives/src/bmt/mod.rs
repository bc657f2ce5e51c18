//! Binary Merkle Tree (BMT) implementation
//!
//! This module implements the intra-chunk BMT: a fixed-shape binary Merkle
//! tree over the 128 segments of a zero-padded 4096-byte chunk payload. The
//! tree root, hashed together with the chunk's span, yields the chunk hash.
//!
//! ## Key Components
//!
//! - **BmtHasher**: chunk hashing with span support
//! - **BmtTree**: materialized tree levels for sister-segment extraction
//! - **root_hash_from_inclusion_proof**: tree-free proof verification
//!
//! ## Example Usage
//!
//! ```
//! use propolis_primitives::bmt::BmtHasher;
//!
//! let data = b"hello world";
//! let mut hasher = BmtHasher::new();
//! hasher.set_span(data.len() as u64);
//! hasher.update_data(data);
//!
//! let hash = hasher.sum();
//! assert_eq!(hash.len(), 32);
//! ```

mod constants;
pub(crate) mod error;
mod hasher;
pub(crate) mod proof;
mod tree;

pub use constants::{
    CHUNK_BMT_LEVELS, HASH_SIZE, MAX_DATA_LENGTH, MAX_SEGMENT_COUNT, PROOF_LENGTH, SEGMENT_SIZE,
};
pub use error::BmtError;
pub use hasher::BmtHasher;
pub use proof::root_hash_from_inclusion_proof;
pub use tree::BmtTree;
