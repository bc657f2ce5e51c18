//! Error types for the propolis-primitives crate
//!
//! The crate uses a two-level error hierarchy: `PrimitivesError` is the
//! top-level type, wrapping the component-specific errors raised by the BMT,
//! chunk and file subsystems. All failures are synchronous and total; no
//! operation retries internally, and the hash primitive is infallible.

use thiserror::Error;

/// Result type for operations in the primitives crate
pub type Result<T> = std::result::Result<T, PrimitivesError>;

/// Main error type for the primitives crate
///
/// Wraps the component-specific errors (`BmtError`, `ChunkError`,
/// `FileError`) to provide a unified error interface.
#[derive(Error, Debug)]
pub enum PrimitivesError {
    /// Errors from intra-chunk BMT and proof operations
    #[error(transparent)]
    Bmt(#[from] crate::bmt::BmtError),

    /// Errors from chunk operations
    #[error(transparent)]
    Chunk(#[from] crate::chunk::ChunkError),

    /// Errors from file chunking and the file BMT
    #[error(transparent)]
    File(#[from] crate::file::FileError),

    /// Array conversion errors
    #[error("Array conversion error: {0}")]
    ArrayConversion(#[from] std::array::TryFromSliceError),
}
