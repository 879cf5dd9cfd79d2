//! RecordIO - chunked, magic-delimited record framing
//!
//! A RecordIO stream is a sequence of 4-byte aligned chunks. Each chunk
//! starts with a fixed magic marker and a packed header word holding a
//! 2-bit continuation flag and a 30-bit payload length. Records whose bytes
//! contain the magic are split around every occurrence, so a reader that
//! lands in the middle of a stream can find the next record by looking for
//! the marker.
//!
//! # Quick Start
//!
//! ```
//! use recordio::{RecordReader, RecordWriter, MAGIC_BYTES};
//!
//! let mut writer = RecordWriter::new(Vec::new());
//! writer.write_record(b"hello").unwrap();
//! writer.write_record(&MAGIC_BYTES).unwrap();
//! assert_eq!(writer.except_counter(), 1);
//!
//! let stream = writer.into_inner();
//! let mut reader = RecordReader::new(stream.as_slice());
//! assert_eq!(reader.read_record().unwrap(), Some(b"hello".to_vec()));
//! assert_eq!(reader.read_record().unwrap(), Some(MAGIC_BYTES.to_vec()));
//! assert_eq!(reader.read_record().unwrap(), None);
//! ```
//!
//! # Architecture
//!
//! - `recordio-core`: wire constants, header packing, config and errors
//! - `recordio-stream`: the writer, the reader and the resynchronizing scanner
//!
//! This crate re-exports both.

pub use recordio_core::*;
pub use recordio_stream::*;
