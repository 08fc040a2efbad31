//! End-to-end scenarios for the forward stream, through its public API only.

use ustream_core::UStreamError;
use ustream_forward::from_owned;

#[test]
fn s6_flush_reproduces_the_entire_buffer_in_order() {
    let mut stream = from_owned((0u8..=200).collect());
    let mut collected = Vec::new();
    stream
        .flush(&mut |chunk| {
            collected.extend_from_slice(chunk);
            Ok(())
        })
        .unwrap();
    assert_eq!(collected, (0u8..=200).collect::<Vec<_>>());
}

#[test]
fn s7_mixed_read_then_flush_never_repeats_a_byte() {
    let data: Vec<u8> = (0u8..=255).collect();
    let mut stream = from_owned(data.clone());

    let mut prefix = vec![0u8; 50];
    stream.read(&mut prefix).unwrap();
    assert_eq!(prefix, data[..50]);

    let mut rest = Vec::new();
    stream
        .flush(&mut |chunk| {
            rest.extend_from_slice(chunk);
            Ok(())
        })
        .unwrap();
    assert_eq!(rest, data[50..]);
    assert_eq!(stream.get_remaining_size(), 0);
}

#[test]
fn read_to_eof_then_flush_reports_eof_with_an_empty_view() {
    let mut stream = from_owned(b"abc".to_vec());
    let mut buf = [0u8; 3];
    stream.read(&mut buf).unwrap();
    assert_eq!(stream.read(&mut buf), Err(UStreamError::Eof));

    let mut calls = 0;
    let mut saw_empty = false;
    let result = stream.flush(&mut |chunk| {
        calls += 1;
        saw_empty = chunk.is_empty();
        Ok(())
    });
    assert_eq!(result, Err(UStreamError::Eof));
    assert_eq!(calls, 1);
    assert!(saw_empty);
}
