//! Corruption Tests
//!
//! Damaged streams must surface as errors, never as a clean end or as
//! silently altered records.

use crate::common::*;
use recordio::{find_record_start, ChunkScanner, RecordConfig};

#[test]
fn truncation_anywhere_inside_a_record_is_an_error() {
    let records = collision_records();
    let (stream, _) = encode_all(&records);
    let boundaries: Vec<usize> = {
        let mut writer = RecordWriter::new(Vec::new());
        records
            .iter()
            .map(|r| {
                writer.write_record(r).unwrap();
                writer.position() as usize
            })
            .collect()
    };

    for cut in 1..stream.len() {
        let (read, err) = decode_until_error(&stream[..cut]);
        let complete = boundaries.iter().filter(|b| **b <= cut).count();
        assert_eq!(read.len(), complete, "cut at {}", cut);
        assert_eq!(read[..], records[..complete]);

        if boundaries.contains(&cut) {
            assert!(err.is_none(), "cut at record boundary {}", cut);
        } else {
            let err = err.unwrap_or_else(|| panic!("cut at {} ended cleanly", cut));
            assert!(err.is_corruption(), "cut at {}: {}", cut, err);
        }
    }
}

#[test]
fn wrong_magic_is_rejected() {
    let (mut stream, _) = encode_all(&[b"first".to_vec(), b"second".to_vec()]);
    stream[16] ^= 0x01;

    let (read, err) = decode_until_error(&stream);
    assert_eq!(read, vec![b"first".to_vec()]);
    assert!(matches!(err, Some(RecordIoError::BadMagic { offset: 16, .. })));
}

#[test]
fn orphan_continuation_chunk_is_rejected() {
    let payload = cat(&[b"head", &MAGIC_BYTES, b"tail"]);
    let (stream, _) = encode_all(&[payload]);

    // Drop the START chunk so the stream begins with the END chunk.
    let end_chunk = &stream[12..];
    let (_, err) = decode_until_error(end_chunk);
    assert!(matches!(
        err,
        Some(RecordIoError::UnexpectedFlag {
            flag: ChunkFlag::End,
            in_record: false,
            ..
        })
    ));
}

#[test]
fn lenient_reader_accepts_orphan_continuation() {
    let payload = cat(&[b"head", &MAGIC_BYTES, b"tail"]);
    let (stream, _) = encode_all(&[payload]);

    let config = RecordConfig::new().with_strict_flags(false);
    let mut reader = RecordReader::with_config(&stream[12..], config).unwrap();
    assert_eq!(reader.read_record().unwrap().unwrap(), b"tail");
    assert_eq!(reader.read_record().unwrap(), None);
}

#[test]
fn record_size_limit_applies_to_reassembled_record() {
    let payload = cat(&[&[7; 10], &MAGIC_BYTES, &[8; 10]]);
    let (stream, _) = encode_all(&[payload]);

    let config = RecordConfig::new().with_max_record_len(20);
    let mut reader = RecordReader::with_config(stream.as_slice(), config).unwrap();
    assert!(matches!(
        reader.read_record(),
        Err(RecordIoError::RecordTooLarge { max: 20, .. })
    ));
}

#[test]
fn scanner_resynchronizes_from_any_offset() {
    let records = collision_records();
    let (stream, _) = encode_all(&records);

    for from in 0..stream.len() {
        let Some(start) = find_record_start(&stream, from) else {
            continue;
        };
        assert!(start >= from);
        assert_eq!(start % 4, 0);

        let (recovered, stats) = ChunkScanner::new(&stream[start..]).collect_all();
        assert_eq!(stats.skipped_bytes, 0, "resync from {}", from);
        let tail: Vec<_> = recovered.into_iter().map(|r| r.data).collect();
        assert_eq!(tail[..], records[records.len() - tail.len()..]);
    }
}

#[test]
fn testing_config_bounds_reassembly_of_many_empty_chunks() {
    // Empty chunks still grow the record by one restored magic each.
    let payload = MAGIC_BYTES.repeat(20_000);
    let (stream, collisions) = encode_all(&[payload]);
    assert_eq!(collisions, 20_000);
    assert_eq!(stream.len(), 20_001 * CHUNK_HEADER_SIZE);

    let mut reader =
        RecordReader::with_config(stream.as_slice(), RecordConfig::for_testing()).unwrap();
    assert!(matches!(
        reader.read_record(),
        Err(RecordIoError::RecordTooLarge { max: 65536, .. })
    ));
}
