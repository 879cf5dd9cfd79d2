//! Reader and writer configuration.

use crate::format::MAX_CHUNK_LEN;

/// RecordIO configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordConfig {
    /// Largest logical record in bytes (default: 2^30 - 1).
    ///
    /// The writer rejects larger payloads. The reader stops reassembling a
    /// record once it grows past this, so a corrupt stream cannot make it
    /// allocate without bound.
    pub max_record_len: usize,

    /// Reject continuation flags out of sequence (default: true).
    ///
    /// With this off, the reader trusts chunk adjacency and ends a record at
    /// the first complete or end chunk it sees.
    pub strict_flags: bool,
}

impl Default for RecordConfig {
    fn default() -> Self {
        RecordConfig {
            max_record_len: MAX_CHUNK_LEN,
            strict_flags: true,
        }
    }
}

impl RecordConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum record length (builder pattern).
    pub fn with_max_record_len(mut self, len: usize) -> Self {
        self.max_record_len = len;
        self
    }

    /// Set strict flag checking (builder pattern).
    pub fn with_strict_flags(mut self, strict: bool) -> Self {
        self.strict_flags = strict;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), RecordConfigError> {
        if self.max_record_len == 0 {
            return Err(RecordConfigError::ZeroMaxRecordLen);
        }
        if self.max_record_len > MAX_CHUNK_LEN {
            return Err(RecordConfigError::MaxRecordLenTooLarge(self.max_record_len));
        }
        Ok(())
    }

    /// Create a configuration for testing (small records).
    pub fn for_testing() -> Self {
        RecordConfig {
            max_record_len: 64 * 1024, // 64KB
            strict_flags: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordConfigError {
    /// Record limit is zero.
    #[error("Maximum record length must be at least 1 byte")]
    ZeroMaxRecordLen,

    /// Record limit does not fit in a chunk header.
    #[error("Maximum record length {0} exceeds the 2^30 - 1 byte format limit")]
    MaxRecordLenTooLarge(usize),
}
