//! Error types for texeval

use thiserror::Error;

/// Main error type for texeval operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in image of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid algorithm: {0}. Use lbp, glcm, or wld.")]
    UnknownDescriptor(String),

    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Worker for sub-image {index} failed: {source}")]
    Worker {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("Descriptor length mismatch: expected {expected}, got {actual}")]
    DescriptorLength { expected: usize, actual: usize },

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for texeval operations
pub type Result<T> = std::result::Result<T, Error>;
