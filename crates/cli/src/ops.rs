//! Subcommand implementations.
//!
//! Each operation works on generic readers and writers where it can so the
//! tests can drive it without touching stdin or stdout.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use recordio_core::is_aligned;
use recordio_stream::{ChunkScanner, RecordReader, RecordWriter};
use serde::Serialize;
use tracing::debug;

/// Result of a `pack` run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackSummary {
    pub records: u64,
    pub bytes_written: u64,
    pub magic_collisions: u64,
}

/// Totals reported by `stat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileStats {
    pub records: u64,
    pub chunks: u64,
    /// Records spread over more than one chunk
    pub split_records: u64,
    pub magic_collisions: u64,
    pub empty_records: u64,
    pub payload_bytes: u64,
    pub largest_record: u64,
    pub file_bytes: u64,
}

/// One record found by `scan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEntry {
    pub offset: usize,
    pub len: usize,
}

/// Result of a `scan` run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub records: Vec<ScanEntry>,
    pub skipped_bytes: usize,
    pub corrupt_regions: usize,
}

/// Write records read from `input`: the whole input as one record, or one
/// record per line with the newline removed.
pub fn pack_input<W: Write, R: BufRead>(
    writer: &mut RecordWriter<W>,
    mut input: R,
    lines: bool,
) -> recordio_core::Result<()> {
    if lines {
        for line in input.split(b'\n') {
            writer.write_record(&line?)?;
        }
    } else {
        let mut record = Vec::new();
        input.read_to_end(&mut record)?;
        writer.write_record(&record)?;
    }
    Ok(())
}

/// Pack `inputs` (or stdin when empty) into the file at `out`.
pub fn pack(out: &Path, inputs: &[PathBuf], lines: bool, append: bool) -> Result<PackSummary> {
    if append {
        if let Ok(meta) = out.metadata() {
            if !is_aligned(meta.len()) {
                bail!(
                    "cannot append to {}: length {} is not a multiple of 4",
                    out.display(),
                    meta.len()
                );
            }
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(out)
        .with_context(|| format!("failed to open {}", out.display()))?;
    let mut writer = RecordWriter::new(BufWriter::new(file));

    if inputs.is_empty() {
        pack_input(&mut writer, io::stdin().lock(), lines).context("failed to pack stdin")?;
    } else {
        for path in inputs {
            let input = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            pack_input(&mut writer, BufReader::new(input), lines)
                .with_context(|| format!("failed to pack {}", path.display()))?;
            debug!(input = %path.display(), records = writer.counters().records, "Packed input");
        }
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush {}", out.display()))?;

    let counters = writer.counters();
    Ok(PackSummary {
        records: counters.records,
        bytes_written: counters.bytes_written,
        magic_collisions: counters.magic_collisions,
    })
}

/// Turn `\n`, `\t`, `\0` and `\\` escapes into bytes.
pub fn unescape_separator(raw: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut utf8 = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
            continue;
        }
        match chars.next() {
            Some('n') => out.push(b'\n'),
            Some('t') => out.push(b'\t'),
            Some('0') => out.push(0),
            Some('\\') => out.push(b'\\'),
            Some(other) => {
                out.push(b'\\');
                let mut utf8 = [0u8; 4];
                out.extend_from_slice(other.encode_utf8(&mut utf8).as_bytes());
            }
            None => out.push(b'\\'),
        }
    }
    out
}

/// Copy every record from `input` to `out`, each followed by `separator`.
///
/// Returns the number of records written. Records already written stay
/// written when a later chunk turns out to be corrupt.
pub fn cat_records<R: Read, W: Write>(
    input: R,
    out: &mut W,
    separator: &[u8],
    hex: bool,
) -> Result<u64> {
    let mut reader = RecordReader::new(input);
    let mut record = Vec::new();
    let mut count = 0;

    while reader
        .read_record_into(&mut record)
        .with_context(|| format!("failed to read record {}", count))?
    {
        if hex {
            for byte in &record {
                write!(out, "{:02x}", byte)?;
            }
        } else {
            out.write_all(&record)?;
        }
        out.write_all(separator)?;
        count += 1;
    }

    out.flush()?;
    Ok(count)
}

/// Read a whole stream and total its records and chunks.
pub fn stat_records<R: Read>(input: R) -> recordio_core::Result<FileStats> {
    let mut reader = RecordReader::new(input);
    let mut record = Vec::new();
    let mut stats = FileStats::default();

    loop {
        let chunks_before = reader.counters().chunks;
        if !reader.read_record_into(&mut record)? {
            break;
        }

        let len = record.len() as u64;
        stats.records += 1;
        stats.payload_bytes += len;
        stats.largest_record = stats.largest_record.max(len);
        if len == 0 {
            stats.empty_records += 1;
        }
        if reader.counters().chunks - chunks_before > 1 {
            stats.split_records += 1;
        }
    }

    let counters = reader.counters();
    stats.chunks = counters.chunks;
    stats.magic_collisions = counters.chunks - counters.records;
    stats.file_bytes = counters.bytes_read;
    Ok(stats)
}

/// Run `stat` on a file.
pub fn stat(path: &Path) -> Result<FileStats> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    stat_records(BufReader::new(file))
        .with_context(|| format!("failed to read {}", path.display()))
}

/// Scan a buffer, recovering what records it can.
pub fn scan_buffer(buf: &[u8]) -> ScanReport {
    let mut scanner = ChunkScanner::new(buf);
    let records = scanner
        .by_ref()
        .map(|record| ScanEntry {
            offset: record.offset,
            len: record.data.len(),
        })
        .collect();

    let stats = scanner.stats();
    ScanReport {
        records,
        skipped_bytes: stats.skipped_bytes,
        corrupt_regions: stats.corrupt_regions,
    }
}

/// Run `scan` on a file.
pub fn scan(path: &Path) -> Result<ScanReport> {
    let buf = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(scan_buffer(&buf))
}
