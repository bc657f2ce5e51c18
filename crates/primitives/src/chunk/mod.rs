//! Chunk types and operations
//!
//! This module provides the chunk record shared by leaf and intermediate
//! chunks of a file BMT, along with creation, serialization and per-chunk
//! inclusion proofs.

mod content;
pub(crate) mod error;

pub use content::Chunk;
pub use error::ChunkError;

use crate::SwarmAddress;

/// Type alias for chunk addresses
pub type ChunkAddress = SwarmAddress;
