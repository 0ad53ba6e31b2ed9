//! Codec error types
//!
//! Only the slice-and-offset API can fail; the fixed-array functions are total.

use thiserror::Error;

/// Result type for pq-bytes operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors raised when a slice cannot hold the requested scalar
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Not enough bytes after `offset`
    #[error("Buffer too short: need {needed} bytes at offset {offset}, {available} available")]
    BufferTooShort {
        needed: usize,
        offset: usize,
        available: usize,
    },

    /// `offset + width` does not fit in `usize`
    #[error("Offset overflow: {offset} + {width}")]
    OffsetOverflow { offset: usize, width: usize },
}

impl CodecError {
    pub fn buffer_too_short(needed: usize, offset: usize, available: usize) -> Self {
        CodecError::BufferTooShort {
            needed,
            offset,
            available,
        }
    }
}
