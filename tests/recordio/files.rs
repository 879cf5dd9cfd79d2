//! File Tests
//!
//! RecordIO files written, reopened, appended to and truncated on disk.

use crate::common::*;
use std::fs::OpenOptions;
use std::io::BufWriter;

#[test]
fn file_roundtrip_survives_reopen() {
    let file = TestFile::new("roundtrip.rec");
    let mut records = collision_records();
    records.push(Vec::new());
    records.push((0..=255u8).cycle().take(70_000).collect());

    file.write_records(&records);
    assert_eq!(file.len() % 4, 0);

    let mut reader = file.reader();
    let read: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(read, records);
    assert!(reader.is_end_of_stream());
}

#[test]
fn appending_to_a_file_continues_the_stream() {
    let file = TestFile::new("append.rec");
    file.write_records(&[b"first".to_vec()]);

    let handle = OpenOptions::new().append(true).open(&file.path).unwrap();
    let mut writer = RecordWriter::new(BufWriter::new(handle));
    writer.write_record(&MAGIC_BYTES).unwrap();
    writer.flush().unwrap();
    drop(writer);

    let mut reader = file.reader();
    let read: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(read, vec![b"first".to_vec(), MAGIC_BYTES.to_vec()]);
}

#[test]
fn truncated_file_keeps_its_prefix() {
    let file = TestFile::new("truncated.rec");
    let records: Vec<Vec<u8>> = (0..20u8).map(|i| vec![i; 30]).collect();
    file.write_records(&records);

    // Each record is one 40-byte chunk; cut into the middle of record 12.
    truncate_file(&file.path, 12 * 40 + 17);

    let mut reader = file.reader();
    let mut read = Vec::new();
    let err = loop {
        match reader.read_record() {
            Ok(Some(record)) => read.push(record),
            Ok(None) => panic!("truncated file ended cleanly"),
            Err(e) => break e,
        }
    };

    assert_eq!(read, records[..12]);
    assert!(matches!(err, RecordIoError::Truncated { .. }));
}
