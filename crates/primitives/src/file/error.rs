use thiserror::Error;

/// Errors specific to file chunking
#[derive(Error, Debug)]
pub enum FileError {
    /// A chunked file must cover at least one payload byte
    #[error("Empty payload: a chunked file requires at least one byte")]
    EmptyPayload,
}
