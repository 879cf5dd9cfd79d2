//! RecordIO reader.
//!
//! The reader pulls chunks from any `std::io::Read` source and reassembles
//! one logical record per call. It never seeks and never buffers more than
//! the record being assembled.

use crate::chunk::read_full;
use recordio_core::{
    ChunkFlag, LRecord, RecordConfig, RecordIoError, Result, ALIGNMENT, LRECORD_SIZE,
    MAGIC_BYTES, MAGIC_SIZE,
};
use std::io::Read;
use tracing::{debug, trace, warn};

/// Cumulative reader counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderCounters {
    /// Logical records returned
    pub records: u64,
    /// Chunks consumed
    pub chunks: u64,
    /// Total bytes consumed from the stream
    pub bytes_read: u64,
}

/// Reader of RecordIO streams.
///
/// `Ok(None)` means the stream ended cleanly on a chunk boundary. Once that
/// happens the reader latches and every later call returns `Ok(None)`
/// without touching the stream. A stream that ends anywhere else is an
/// error, never a clean end.
pub struct RecordReader<R: Read> {
    /// Input stream
    inner: R,

    /// Configuration
    config: RecordConfig,

    /// Whether a clean end of stream was reached
    end_of_stream: bool,

    /// Cumulative counters
    counters: ReaderCounters,
}

impl<R: Read> RecordReader<R> {
    /// Create a reader with the default configuration.
    pub fn new(inner: R) -> Self {
        RecordReader {
            inner,
            config: RecordConfig::default(),
            end_of_stream: false,
            counters: ReaderCounters::default(),
        }
    }

    /// Create a reader with a custom configuration.
    pub fn with_config(inner: R, config: RecordConfig) -> Result<Self> {
        config.validate()?;
        Ok(RecordReader {
            inner,
            config,
            end_of_stream: false,
            counters: ReaderCounters::default(),
        })
    }

    /// Read the next logical record.
    ///
    /// Returns `Ok(None)` at a clean end of stream.
    pub fn read_record(&mut self) -> Result<Option<Vec<u8>>> {
        let mut record = Vec::new();
        if self.read_record_into(&mut record)? {
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }

    /// Read the next logical record into `out`, reusing its allocation.
    ///
    /// `out` is cleared first. Returns `Ok(false)` at a clean end of stream.
    /// On error `out` holds whatever was reassembled before the failure.
    pub fn read_record_into(&mut self, out: &mut Vec<u8>) -> Result<bool> {
        out.clear();
        if self.end_of_stream {
            return Ok(false);
        }

        let mut in_record = false;
        loop {
            let chunk_offset = self.counters.bytes_read;

            let mut magic = [0u8; MAGIC_SIZE];
            let n = read_full(&mut self.inner, &mut magic, &mut self.counters.bytes_read)?;

            if n == 0 && !in_record {
                self.end_of_stream = true;
                debug!(
                    offset = chunk_offset,
                    records = self.counters.records,
                    "End of RecordIO stream"
                );
                return Ok(false);
            }
            if n < MAGIC_SIZE {
                return Err(self.truncated(chunk_offset, MAGIC_SIZE, n));
            }
            if magic != MAGIC_BYTES {
                warn!(offset = chunk_offset, "Bad RecordIO magic");
                return Err(RecordIoError::BadMagic {
                    offset: chunk_offset,
                    found: magic,
                });
            }

            let mut word = [0u8; LRECORD_SIZE];
            self.fill(&mut word)?;
            let header = LRecord::from_bytes(word);
            self.check_flag(header.flag, in_record, chunk_offset)?;

            let len = out.len() + header.len();
            if len > self.config.max_record_len {
                warn!(
                    offset = chunk_offset,
                    len,
                    max = self.config.max_record_len,
                    "RecordIO record exceeds limit"
                );
                return Err(RecordIoError::RecordTooLarge {
                    len,
                    max: self.config.max_record_len,
                });
            }

            self.read_payload(out, header.len())?;

            let pad = header.pad_len();
            if pad > 0 {
                let mut zeros = [0u8; ALIGNMENT];
                self.fill(&mut zeros[..pad])?;
            }

            self.counters.chunks += 1;
            trace!(
                offset = chunk_offset,
                flag = %header.flag,
                len = header.length,
                "Read chunk"
            );

            if header.flag.ends_record() {
                self.counters.records += 1;
                return Ok(true);
            }

            // The split point stood for one magic occurrence in the record.
            out.extend_from_slice(&MAGIC_BYTES);
            in_record = true;
        }
    }

    /// Iterate over the remaining records.
    ///
    /// The iterator ends at a clean end of stream and stops after yielding
    /// the first error.
    pub fn records(&mut self) -> Records<'_, R> {
        Records {
            reader: self,
            done: false,
        }
    }

    fn check_flag(&self, flag: ChunkFlag, in_record: bool, offset: u64) -> Result<()> {
        if !self.config.strict_flags {
            return Ok(());
        }
        // Outside a record only complete/start may appear; inside, only middle/end.
        if flag.begins_record() == in_record {
            warn!(offset, %flag, in_record, "RecordIO continuation flag out of sequence");
            return Err(RecordIoError::UnexpectedFlag {
                offset,
                flag,
                in_record,
            });
        }
        Ok(())
    }

    fn read_payload(&mut self, out: &mut Vec<u8>, len: usize) -> Result<()> {
        let offset = self.counters.bytes_read;
        let start = out.len();
        // `take` grows the buffer as data arrives instead of trusting the header.
        let result = (&mut self.inner).take(len as u64).read_to_end(out);
        // Bytes read before an error stay in `out`; count them either way.
        let n = out.len() - start;
        self.counters.bytes_read += n as u64;
        result?;
        if n < len {
            return Err(self.truncated(offset, len, n));
        }
        Ok(())
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        let offset = self.counters.bytes_read;
        let n = read_full(&mut self.inner, buf, &mut self.counters.bytes_read)?;
        if n < buf.len() {
            return Err(self.truncated(offset, buf.len(), n));
        }
        Ok(())
    }

    fn truncated(&self, offset: u64, expected: usize, actual: usize) -> RecordIoError {
        warn!(offset, expected, actual, "Truncated RecordIO chunk");
        RecordIoError::Truncated {
            offset,
            expected,
            actual,
        }
    }

    /// Whether a clean end of stream has been reached.
    pub fn is_end_of_stream(&self) -> bool {
        self.end_of_stream
    }

    /// Bytes consumed since the reader was created.
    pub fn position(&self) -> u64 {
        self.counters.bytes_read
    }

    /// Cumulative counters.
    pub fn counters(&self) -> ReaderCounters {
        self.counters.clone()
    }

    /// Configuration in effect.
    pub fn config(&self) -> &RecordConfig {
        &self.config
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwrap the underlying stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Iterator over the records of a [`RecordReader`].
pub struct Records<'a, R: Read> {
    reader: &'a mut RecordReader<R>,
    done: bool,
}

impl<R: Read> Iterator for Records<'_, R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for Records<'_, R> {}
