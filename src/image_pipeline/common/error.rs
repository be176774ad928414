use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Short read at offset {offset}: expected {expected} bytes, {available} available")]
    ShortRead {
        offset: u64,
        expected: usize,
        available: usize,
    },

    #[error("Sample count does not fill plane geometry: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Odd image dimensions need explicit chroma truncation: width={0}, height={1}")]
    OddDimensions(usize, usize),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConversionError {
    /// A short read is how a multi-frame file runs out; everything else is a real failure.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, ConversionError::ShortRead { .. })
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
