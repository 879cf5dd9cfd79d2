//! Stream layer for RecordIO
//!
//! This crate moves records between byte streams and memory:
//!
//! - Writer: frames records into chunks on any `std::io::Write`
//! - Reader: reassembles records from any `std::io::Read`
//! - Scanner: recovers records from a damaged in-memory buffer
//! - Chunk helpers: magic splitting and record-start search

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunk;
pub mod reader;
pub mod scanner;
pub mod writer;

pub use chunk::{count_magic, find_record_start, split_on_magic};
pub use reader::{ReaderCounters, RecordReader, Records};
pub use scanner::{ChunkScanner, ScanStats, ScannedRecord};
pub use writer::{encode_record, RecordWriter, WriterCounters};
