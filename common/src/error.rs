use std::error::Error as StdError;

/// Errors from embedding a frame into a grid or recovering one from it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EmbedError {
    #[error(
        "canvas too small: frame needs {needed_width}x{needed_rows} samples, \
         {available_width}x{available_rows} available"
    )]
    InsufficientCanvas {
        needed_width: u32,
        needed_rows: u32,
        available_width: u32,
        available_rows: u32,
    },

    #[error("not enough data found: {available} < {needed} bytes")]
    TruncatedData { needed: usize, available: usize },

    #[error("no certificate found")]
    NotFound,

    #[error("digest mismatch")]
    Integrity,

    #[error("payload is empty")]
    EmptyPayload,

    #[error("digest must be {expected} bytes, got {actual}")]
    DigestLength { expected: usize, actual: usize },

    #[error("payload of {0} bytes does not fit the frame length field")]
    PayloadTooLarge(usize),

    #[error("raster width of {0} samples is too narrow")]
    InvalidWidth(u32),

    #[error("row {row} has {actual} samples, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("certificate rejected")]
    Certificate(#[source] Box<dyn StdError + Send + Sync>),
}
