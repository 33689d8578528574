use crate::models::Step;
use map_dither::{MatchError, TooFewColors};
use thiserror::Error;

/// Failures of the height pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("maximum height {max_height} is below the minimum of {minimum}")]
    InvalidHeightBudget { max_height: u32, minimum: u32 },

    #[error("column {column} still reaches height {height} after natural compression (limit {max_height})")]
    CompressionFailed {
        column: usize,
        height: u32,
        max_height: u32,
    },

    #[error("internal consistency check failed: {0}")]
    InternalConsistency(String),
}

/// Everything a conversion session can refuse to do.
///
/// All variants are recoverable: the session stays in its last valid step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("only {count} usable map colors, adjust the palette selection")]
    TooFewColors { count: usize, indices: Vec<u8> },

    #[error("image is empty")]
    EmptyImage,

    #[error("{operation} needs the session to be {required}, but it is {current}")]
    PrematureOperation {
        operation: &'static str,
        required: Step,
        current: Step,
    },

    #[error("column {column} still reaches height {height} after natural compression (limit {max_height})")]
    CompressionFailed {
        column: usize,
        height: u32,
        max_height: u32,
    },

    #[error("maximum height {max_height} is below the minimum of {minimum}")]
    InvalidHeightBudget { max_height: u32, minimum: u32 },

    #[error("internal consistency check failed: {0}")]
    InternalConsistency(String),
}

impl From<TooFewColors> for SessionError {
    fn from(e: TooFewColors) -> Self {
        SessionError::TooFewColors {
            count: e.count,
            indices: e.indices,
        }
    }
}

impl From<BuildError> for SessionError {
    fn from(e: BuildError) -> Self {
        match e {
            BuildError::InvalidHeightBudget {
                max_height,
                minimum,
            } => SessionError::InvalidHeightBudget {
                max_height,
                minimum,
            },
            BuildError::CompressionFailed {
                column,
                height,
                max_height,
            } => SessionError::CompressionFailed {
                column,
                height,
                max_height,
            },
            BuildError::InternalConsistency(msg) => SessionError::InternalConsistency(msg),
        }
    }
}

impl From<MatchError> for SessionError {
    fn from(e: MatchError) -> Self {
        match e {
            MatchError::EmptyImage => SessionError::EmptyImage,
            // the session only converts once an allowed set exists
            MatchError::NotReady => SessionError::InternalConsistency(e.to_string()),
        }
    }
}

/// Image file problems (PNG in, PNG out).
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("Unsupported PNG layout: {0:?}")]
    UnsupportedLayout(png::ColorType),

    #[error("Image too large: {width}x{height}")]
    TooLarge { width: u32, height: u32 },

    #[error("Invalid pixel grid: {0}")]
    Grid(#[from] map_dither::GridSizeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
