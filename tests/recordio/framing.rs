//! Framing Tests
//!
//! Round trips on in-memory streams: collision splitting, alignment,
//! ordering and clean termination.

use crate::common::*;

#[test]
fn collision_records_roundtrip() {
    let records = collision_records();
    let (stream, collisions) = encode_all(&records);

    assert_eq!(collisions, 1 + 1 + 1 + 2 + 1);
    assert_eq!(decode_all(&stream), records);
}

#[test]
fn two_collisions_make_three_chunks() {
    let payload = cat(&[b"a", &MAGIC_BYTES, b"bc", &MAGIC_BYTES, b"def"]);
    let (stream, collisions) = encode_all(&[payload.clone()]);
    assert_eq!(collisions, 2);

    let headers = chunk_headers(&stream);
    let flags: Vec<_> = headers.iter().map(|(_, h)| h.flag).collect();
    assert_eq!(flags, [ChunkFlag::Start, ChunkFlag::Middle, ChunkFlag::End]);
    let lens: Vec<_> = headers.iter().map(|(_, h)| h.len()).collect();
    assert_eq!(lens, [1, 2, 3]);

    assert_eq!(decode_all(&stream), vec![payload]);
}

#[test]
fn every_record_ends_on_four_byte_boundary() {
    let mut writer = RecordWriter::new(Vec::new());
    for len in 0..=17 {
        let mut record = vec![0xA5; len];
        if len >= MAGIC_SIZE {
            record[..MAGIC_SIZE].copy_from_slice(&MAGIC_BYTES);
        }
        writer.write_record(&record).unwrap();
        assert_eq!(writer.position() % 4, 0, "record of {} bytes", len);
    }
    assert_eq!(writer.get_ref().len() % 4, 0);
}

#[test]
fn records_come_back_in_write_order() {
    let records: Vec<Vec<u8>> = (0..50u32)
        .map(|i| i.to_le_bytes().repeat(i as usize % 7))
        .collect();
    let (stream, _) = encode_all(&records);

    assert_eq!(decode_all(&stream), records);
}

#[test]
fn empty_record_is_one_empty_chunk() {
    let (stream, collisions) = encode_all(&[Vec::new()]);
    assert_eq!(collisions, 0);
    assert_eq!(stream.len(), CHUNK_HEADER_SIZE);

    let headers = chunk_headers(&stream);
    assert_eq!(headers.len(), 1);
    assert_eq!(headers[0].1.flag, ChunkFlag::Complete);
    assert!(headers[0].1.is_empty());

    assert_eq!(decode_all(&stream), vec![Vec::<u8>::new()]);
}

#[test]
fn clean_end_is_sticky() {
    let (stream, _) = encode_all(&[b"one".to_vec(), b"two".to_vec()]);
    let mut reader = RecordReader::new(stream.as_slice());

    assert_eq!(reader.read_record().unwrap().unwrap(), b"one");
    assert_eq!(reader.read_record().unwrap().unwrap(), b"two");
    for _ in 0..3 {
        assert_eq!(reader.read_record().unwrap(), None);
        assert!(reader.is_end_of_stream());
    }
}

#[test]
fn magic_only_marks_chunk_starts() {
    let (stream, _) = encode_all(&collision_records());

    let starts: Vec<usize> = chunk_headers(&stream).iter().map(|(o, _)| *o).collect();
    let found: Vec<usize> = stream
        .windows(MAGIC_SIZE)
        .enumerate()
        .filter(|(_, w)| *w == MAGIC_BYTES)
        .map(|(i, _)| i)
        .collect();

    assert_eq!(found, starts);
}

#[test]
fn records_iterator_and_buffer_reuse_agree() {
    let records = collision_records();
    let (stream, _) = encode_all(&records);

    let mut reader = RecordReader::new(stream.as_slice());
    let iterated: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(iterated, records);

    let mut reader = RecordReader::new(stream.as_slice());
    let mut buf = Vec::new();
    let mut reused = Vec::new();
    while reader.read_record_into(&mut buf).unwrap() {
        reused.push(buf.clone());
    }
    assert_eq!(reused, records);
}

#[test]
fn reader_and_writer_counters_agree() {
    let records = collision_records();
    let mut writer = RecordWriter::new(Vec::new());
    for record in &records {
        writer.write_record(record).unwrap();
    }
    let written = writer.counters();

    let stream = writer.into_inner();
    let mut reader = RecordReader::new(stream.as_slice());
    while reader.read_record().unwrap().is_some() {}
    let read = reader.counters();

    assert_eq!(read.records, written.records);
    assert_eq!(read.chunks, written.chunks);
    assert_eq!(read.bytes_read, written.bytes_written);
    assert_eq!(written.chunks - written.records, written.magic_collisions);
}
