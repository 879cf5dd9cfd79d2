//! RecordIO writer.
//!
//! The writer frames each record into one or more chunks and appends them
//! to any `std::io::Write` sink. A record containing the magic bytes is
//! split around every occurrence so that the magic only ever appears on the
//! wire as a chunk marker.

use crate::chunk::{split_on_magic, write_chunk};
use recordio_core::{ChunkFlag, LRecord, RecordConfig, RecordIoError, Result, MAX_CHUNK_LEN};
use std::io::Write;
use tracing::{debug, trace};

/// Cumulative writer counters.
///
/// These counters accumulate over the lifetime of the RecordWriter
/// and are never reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterCounters {
    /// Logical records written
    pub records: u64,
    /// Chunks written (one per record, more when records are split)
    pub chunks: u64,
    /// Total bytes written to the stream, padding included
    pub bytes_written: u64,
    /// Magic occurrences escaped by splitting records
    pub magic_collisions: u64,
}

/// Writer of RecordIO streams.
///
/// After every successful `write_record` the number of bytes written is a
/// multiple of 4. On a write failure the stream may hold a partial chunk;
/// nothing is rolled back.
pub struct RecordWriter<W: Write> {
    /// Output stream
    inner: W,

    /// Configuration
    config: RecordConfig,

    /// Cumulative counters
    counters: WriterCounters,
}

impl<W: Write> RecordWriter<W> {
    /// Create a writer with the default configuration.
    pub fn new(inner: W) -> Self {
        RecordWriter {
            inner,
            config: RecordConfig::default(),
            counters: WriterCounters::default(),
        }
    }

    /// Create a writer with a custom configuration.
    pub fn with_config(inner: W, config: RecordConfig) -> Result<Self> {
        config.validate()?;
        Ok(RecordWriter {
            inner,
            config,
            counters: WriterCounters::default(),
        })
    }

    /// Append one logical record to the stream.
    ///
    /// Empty records are legal and produce a single empty chunk.
    pub fn write_record(&mut self, payload: &[u8]) -> Result<()> {
        let max = self.config.max_record_len.min(MAX_CHUNK_LEN);
        if payload.len() > max {
            return Err(RecordIoError::RecordTooLarge {
                len: payload.len(),
                max,
            });
        }

        let segments = split_on_magic(payload);
        let count = segments.len();
        if count > 1 {
            debug!(
                len = payload.len(),
                collisions = count - 1,
                "Splitting record around magic occurrences"
            );
        }

        for (index, segment) in segments.iter().enumerate() {
            self.write_segment(ChunkFlag::for_segment(index, count), segment)?;
        }

        self.counters.records += 1;
        self.counters.magic_collisions += (count - 1) as u64;

        trace!(
            len = payload.len(),
            chunks = count,
            position = self.counters.bytes_written,
            "Wrote record"
        );
        Ok(())
    }

    fn write_segment(&mut self, flag: ChunkFlag, segment: &[u8]) -> Result<()> {
        let header = LRecord::new(flag, segment.len()).ok_or(RecordIoError::RecordTooLarge {
            len: segment.len(),
            max: MAX_CHUNK_LEN,
        })?;

        let written = write_chunk(&mut self.inner, header, segment)?;
        self.counters.chunks += 1;
        self.counters.bytes_written += written as u64;
        Ok(())
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Number of magic occurrences escaped so far.
    pub fn except_counter(&self) -> u64 {
        self.counters.magic_collisions
    }

    /// Bytes written since the writer was created.
    pub fn position(&self) -> u64 {
        self.counters.bytes_written
    }

    /// Cumulative counters.
    pub fn counters(&self) -> WriterCounters {
        self.counters.clone()
    }

    /// Configuration in effect.
    pub fn config(&self) -> &RecordConfig {
        &self.config
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    ///
    /// Writing to it directly breaks chunk alignment.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Unwrap the underlying stream.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Encode a single record into an in-memory buffer.
pub fn encode_record(payload: &[u8]) -> Result<Vec<u8>> {
    let mut writer = RecordWriter::new(Vec::new());
    writer.write_record(payload)?;
    Ok(writer.into_inner())
}
