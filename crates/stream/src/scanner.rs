//! Resynchronizing scanner over an in-memory RecordIO buffer.
//!
//! Where `RecordReader` fails on the first malformed chunk, the scanner
//! skips ahead to the next aligned magic marker that begins a record and
//! keeps going. Because the writer never lets the magic bytes appear inside
//! a payload, a marker at an aligned offset is a real chunk boundary.

use crate::chunk::find_record_start;
use crate::reader::RecordReader;
use recordio_core::{RecordConfig, RecordIoError, Result};
use tracing::warn;

/// A record recovered by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedRecord {
    /// Offset of the record's first chunk in the scanned buffer
    pub offset: usize,
    /// Reassembled record bytes
    pub data: Vec<u8>,
}

/// Totals for a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Records recovered
    pub records: usize,
    /// Bytes skipped while resynchronizing
    pub skipped_bytes: usize,
    /// Number of malformed regions skipped
    pub corrupt_regions: usize,
}

/// Iterator recovering records from a buffer, skipping malformed regions.
///
/// The buffer must start on a chunk boundary (offset 0 of a stream, or an
/// offset returned by [`find_record_start`]).
pub struct ChunkScanner<'a> {
    buf: &'a [u8],
    offset: usize,
    config: RecordConfig,
    stats: ScanStats,
}

impl<'a> ChunkScanner<'a> {
    /// Create a scanner with the default configuration.
    pub fn new(buf: &'a [u8]) -> Self {
        ChunkScanner {
            buf,
            offset: 0,
            config: RecordConfig::default(),
            stats: ScanStats::default(),
        }
    }

    /// Create a scanner with a custom configuration.
    ///
    /// The config applies to each decode attempt. With strict flags, orphaned
    /// continuation chunks count as corruption and are skipped.
    ///
    /// Each attempt decodes from scratch. With strict flags off, a long run of
    /// start and middle chunks with no end chunk is reassembled up to the end
    /// of the buffer from every resync point, which makes the scan quadratic
    /// in the length of the run.
    pub fn with_config(buf: &'a [u8], config: RecordConfig) -> Result<Self> {
        config.validate()?;
        Ok(ChunkScanner {
            buf,
            offset: 0,
            config,
            stats: ScanStats::default(),
        })
    }

    /// Current offset into the buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Totals so far.
    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// Scan the rest of the buffer, returning every recovered record.
    pub fn collect_all(mut self) -> (Vec<ScannedRecord>, ScanStats) {
        let records: Vec<_> = self.by_ref().collect();
        (records, self.stats)
    }

    fn decode_at(&self, offset: usize) -> Result<Option<(Vec<u8>, usize)>> {
        let mut reader = RecordReader::with_config(&self.buf[offset..], self.config.clone())?;
        let record = reader.read_record()?;
        Ok(record.map(|data| (data, reader.position() as usize)))
    }

    fn skip_from(&mut self, offset: usize, err: &RecordIoError) {
        let next = find_record_start(self.buf, offset + 1).unwrap_or(self.buf.len());
        let skipped = next - offset;

        warn!(
            offset,
            skipped,
            error = %err,
            "Skipping malformed RecordIO region"
        );

        self.stats.skipped_bytes += skipped;
        self.stats.corrupt_regions += 1;
        self.offset = next;
    }
}

impl Iterator for ChunkScanner<'_> {
    type Item = ScannedRecord;

    fn next(&mut self) -> Option<Self::Item> {
        while self.offset < self.buf.len() {
            let offset = self.offset;
            match self.decode_at(offset) {
                Ok(Some((data, consumed))) => {
                    self.offset += consumed;
                    self.stats.records += 1;
                    return Some(ScannedRecord { offset, data });
                }
                Ok(None) => {
                    self.offset = self.buf.len();
                }
                Err(err) => self.skip_from(offset, &err),
            }
        }
        None
    }
}
