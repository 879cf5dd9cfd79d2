//! Chunk-level helpers shared by the writer, reader and scanner.

use recordio_core::{LRecord, ALIGNMENT, CHUNK_HEADER_SIZE, MAGIC_BYTES, MAGIC_SIZE};
use std::io::{self, Read, Write};

const ZERO_PAD: [u8; ALIGNMENT] = [0; ALIGNMENT];

/// Split a payload around every occurrence of the magic bytes.
///
/// Occurrences are matched leftmost first at any byte offset and are not
/// part of any segment: joining the segments with `MAGIC_BYTES` restores the
/// payload. A payload without the magic yields exactly one segment. Adjacent
/// occurrences, or an occurrence at either end, yield empty segments.
pub fn split_on_magic(payload: &[u8]) -> Vec<&[u8]> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut pos = 0;

    while pos + MAGIC_SIZE <= payload.len() {
        if payload[pos..pos + MAGIC_SIZE] == MAGIC_BYTES {
            segments.push(&payload[start..pos]);
            pos += MAGIC_SIZE;
            start = pos;
        } else {
            pos += 1;
        }
    }

    segments.push(&payload[start..]);
    segments
}

/// Count occurrences of the magic bytes in a payload.
pub fn count_magic(payload: &[u8]) -> usize {
    split_on_magic(payload).len() - 1
}

/// Write one chunk: magic, header, payload, zero padding.
///
/// Returns the number of bytes written, always a multiple of 4.
pub(crate) fn write_chunk<W: Write>(
    out: &mut W,
    header: LRecord,
    payload: &[u8],
) -> io::Result<usize> {
    debug_assert_eq!(header.len(), payload.len());

    out.write_all(&MAGIC_BYTES)?;
    out.write_all(&header.to_bytes())?;
    out.write_all(payload)?;

    let pad = header.pad_len();
    if pad > 0 {
        out.write_all(&ZERO_PAD[..pad])?;
    }

    Ok(header.chunk_len())
}

/// Read until `buf` is full or the stream ends.
///
/// Unlike `read_exact`, a short read is not an error: the caller gets the
/// count and decides whether zero bytes means a clean end of stream. Every
/// byte taken from `reader` is added to `consumed`, including those read
/// before an error.
pub(crate) fn read_full<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    consumed: &mut u64,
) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => {
                filled += n;
                *consumed += n as u64;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Find the next offset at or after `from` where a record begins.
///
/// Only 4-aligned offsets are considered. A record begins where the magic
/// bytes are followed by a complete or start header; middle and end chunks
/// are skipped because they cannot be decoded on their own.
pub fn find_record_start(buf: &[u8], from: usize) -> Option<usize> {
    let mut pos = from.div_ceil(ALIGNMENT) * ALIGNMENT;

    while pos + CHUNK_HEADER_SIZE <= buf.len() {
        if buf[pos..pos + MAGIC_SIZE] == MAGIC_BYTES {
            let mut word = [0u8; 4];
            word.copy_from_slice(&buf[pos + MAGIC_SIZE..pos + CHUNK_HEADER_SIZE]);
            if LRecord::from_bytes(word).flag.begins_record() {
                return Some(pos);
            }
        }
        pos += ALIGNMENT;
    }

    None
}
