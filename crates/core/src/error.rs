//! Error types for RecordIO
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Clean end of stream is not an error: readers report it as `Ok(None)`.
//! Everything here is either an I/O fault, a broken stream, or a caller
//! precondition violation.

use crate::config::RecordConfigError;
use crate::format::ChunkFlag;
use std::io;
use thiserror::Error;

/// Result type alias for RecordIO operations
pub type Result<T> = std::result::Result<T, RecordIoError>;

/// Error types for reading and writing RecordIO streams
#[derive(Debug, Error)]
pub enum RecordIoError {
    /// Underlying stream read or write failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Bytes at a chunk boundary are not the magic marker
    #[error("Bad magic at offset {offset}: found {found:02x?}")]
    BadMagic {
        /// Stream offset of the expected magic
        offset: u64,
        /// Bytes found instead
        found: [u8; 4],
    },

    /// Stream ended inside a chunk or inside a split record
    #[error("Truncated chunk at offset {offset}: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Stream offset where the short read started
        offset: u64,
        /// Bytes required
        expected: usize,
        /// Bytes available
        actual: usize,
    },

    /// Continuation flag out of sequence
    #[error("Unexpected {flag} chunk at offset {offset} (inside record: {in_record})")]
    UnexpectedFlag {
        /// Stream offset of the chunk
        offset: u64,
        /// Flag found
        flag: ChunkFlag,
        /// Whether a split record was being reassembled
        in_record: bool,
    },

    /// Record exceeds the format or configured size limit
    #[error("Record too large: {len} bytes (max {max})")]
    RecordTooLarge {
        /// Record length
        len: usize,
        /// Limit in effect
        max: usize,
    },

    /// Configuration rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] RecordConfigError),
}

impl RecordIoError {
    /// Whether this error means the stream content is malformed.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            RecordIoError::BadMagic { .. }
                | RecordIoError::Truncated { .. }
                | RecordIoError::UnexpectedFlag { .. }
        )
    }

    /// Whether this error came from the underlying stream.
    pub fn is_io(&self) -> bool {
        matches!(self, RecordIoError::Io(_))
    }
}
