//! RecordIO chunk format.
//!
//! A RecordIO stream is a plain concatenation of chunks. There is no file
//! header, footer or record count; the stream ends at EOF.
//!
//! # Chunk Layout
//!
//! ```text
//! ┌──────────────┬──────────────┬─────────────────────────┬─────────────┐
//! │ Magic (4)    │ LRecord (4)  │ Payload (length bytes)  │ Pad (0..=3) │
//! └──────────────┴──────────────┴─────────────────────────┴─────────────┘
//!
//! LRecord (u32):
//! ┌────────────┬─────────────────────────────────────────────────────────┐
//! │ cflag (2)  │ length (30)                                             │
//! │ bits 31-30 │ bits 29-0                                               │
//! └────────────┴─────────────────────────────────────────────────────────┘
//! ```
//!
//! Magic and LRecord are written in native byte order. Pad bytes are zero and
//! bring every chunk to a multiple of 4 bytes, so every chunk starts at a
//! 4-aligned stream offset.
//!
//! # Continuation Flags
//!
//! When a record contains the magic bytes, the writer splits the record
//! around each occurrence. The occurrence is not stored; the boundary between
//! two chunks of the same record stands for it, and the reader puts it back.
//!
//! | cflag | Meaning                              |
//! |-------|--------------------------------------|
//! | 0     | Complete record in a single chunk    |
//! | 1     | First chunk of a split record        |
//! | 2     | Interior chunk of a split record     |
//! | 3     | Last chunk of a split record         |

use std::fmt;

/// Magic number marking the start of every chunk.
pub const MAGIC: u32 = 0x3ed7_230a;

/// Magic number as it appears on the wire.
pub const MAGIC_BYTES: [u8; 4] = MAGIC.to_ne_bytes();

/// Size of the magic marker in bytes.
pub const MAGIC_SIZE: usize = 4;

/// Size of the packed LRecord header in bytes.
pub const LRECORD_SIZE: usize = 4;

/// Size of the fixed part of a chunk (magic + LRecord).
pub const CHUNK_HEADER_SIZE: usize = MAGIC_SIZE + LRECORD_SIZE;

/// Chunk alignment in bytes.
pub const ALIGNMENT: usize = 4;

/// Number of low bits holding the chunk length.
pub const LENGTH_BITS: u32 = 30;

/// Mask selecting the length bits of an LRecord.
pub const LENGTH_MASK: u32 = (1 << LENGTH_BITS) - 1;

/// Largest payload a single chunk (and therefore a record) may carry.
pub const MAX_CHUNK_LEN: usize = LENGTH_MASK as usize;

const _: () = assert!(std::mem::size_of::<u32>() == LRECORD_SIZE);
const _: () = assert!(CHUNK_HEADER_SIZE % ALIGNMENT == 0);

/// Role of a chunk in reassembling a logical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChunkFlag {
    /// Whole record in one chunk.
    Complete = 0,
    /// First chunk of a split record.
    Start = 1,
    /// Interior chunk of a split record.
    Middle = 2,
    /// Final chunk of a split record.
    End = 3,
}

impl ChunkFlag {
    /// Decode a flag from its 2-bit wire value.
    ///
    /// Only the low two bits are considered, so every `u32` maps to a flag.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0 => ChunkFlag::Complete,
            1 => ChunkFlag::Start,
            2 => ChunkFlag::Middle,
            _ => ChunkFlag::End,
        }
    }

    /// 2-bit wire value.
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Whether this chunk finishes a logical record.
    pub const fn ends_record(self) -> bool {
        matches!(self, ChunkFlag::Complete | ChunkFlag::End)
    }

    /// Whether this chunk may be the first chunk of a logical record.
    pub const fn begins_record(self) -> bool {
        matches!(self, ChunkFlag::Complete | ChunkFlag::Start)
    }

    /// Flag for segment `index` of a record split into `count` segments.
    pub const fn for_segment(index: usize, count: usize) -> Self {
        if count <= 1 {
            ChunkFlag::Complete
        } else if index == 0 {
            ChunkFlag::Start
        } else if index + 1 == count {
            ChunkFlag::End
        } else {
            ChunkFlag::Middle
        }
    }
}

impl fmt::Display for ChunkFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChunkFlag::Complete => "complete",
            ChunkFlag::Start => "start",
            ChunkFlag::Middle => "middle",
            ChunkFlag::End => "end",
        };
        f.write_str(name)
    }
}

/// Packed chunk header: continuation flag in bits 31-30, length in bits 29-0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LRecord {
    /// Continuation flag
    pub flag: ChunkFlag,
    /// Payload length in bytes, excluding padding
    pub length: u32,
}

impl LRecord {
    /// Create a header.
    ///
    /// Returns `None` if `length` does not fit in 30 bits.
    pub fn new(flag: ChunkFlag, length: usize) -> Option<Self> {
        if length > MAX_CHUNK_LEN {
            return None;
        }
        Some(LRecord {
            flag,
            length: length as u32,
        })
    }

    /// Pack into the wire word: `(cflag << 30) | length`.
    pub const fn pack(self) -> u32 {
        (self.flag.bits() << LENGTH_BITS) | (self.length & LENGTH_MASK)
    }

    /// Unpack a wire word. Total: every `u32` is a valid header.
    pub const fn unpack(word: u32) -> Self {
        LRecord {
            flag: ChunkFlag::from_bits(word >> LENGTH_BITS),
            length: word & LENGTH_MASK,
        }
    }

    /// Serialize to wire bytes.
    pub const fn to_bytes(self) -> [u8; LRECORD_SIZE] {
        self.pack().to_ne_bytes()
    }

    /// Deserialize from wire bytes.
    pub const fn from_bytes(bytes: [u8; LRECORD_SIZE]) -> Self {
        Self::unpack(u32::from_ne_bytes(bytes))
    }

    /// Payload length as `usize`.
    pub fn len(&self) -> usize {
        self.length as usize
    }

    /// Whether the chunk carries no payload.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of zero bytes following the payload.
    pub fn pad_len(&self) -> usize {
        pad_len(self.len())
    }

    /// Total on-wire size of the chunk this header describes.
    pub fn chunk_len(&self) -> usize {
        CHUNK_HEADER_SIZE + self.len() + self.pad_len()
    }
}

/// Padding needed after `len` payload bytes: `(4 - len % 4) % 4`.
pub const fn pad_len(len: usize) -> usize {
    (ALIGNMENT - len % ALIGNMENT) % ALIGNMENT
}

/// Whether a stream offset sits on a chunk boundary.
pub const fn is_aligned(offset: u64) -> bool {
    offset % ALIGNMENT as u64 == 0
}
