//! Core types for RecordIO
//!
//! This crate defines the pieces shared by every reader and writer:
//! - Format constants: magic marker, header size, alignment, length limit
//! - ChunkFlag: continuation flag of a chunk
//! - LRecord: packed chunk header (flag + length)
//! - RecordConfig: size limit and flag checking
//! - RecordIoError: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod format;

pub use config::{RecordConfig, RecordConfigError};
pub use error::{RecordIoError, Result};
pub use format::{
    is_aligned, pad_len, ChunkFlag, LRecord, ALIGNMENT, CHUNK_HEADER_SIZE, LENGTH_BITS,
    LENGTH_MASK, LRECORD_SIZE, MAGIC, MAGIC_BYTES, MAGIC_SIZE, MAX_CHUNK_LEN,
};
