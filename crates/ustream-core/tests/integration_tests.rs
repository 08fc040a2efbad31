//! Scenario and quantified-invariant tests exercising `ustream-core` as an
//! external consumer would, through its public API only.

use std::sync::Arc;
use std::thread;

use ustream_core::{concat, from_owned, from_static, UStreamError};

const ALPHANUM: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

fn read_all(inst: &mut ustream_core::Instance) -> Vec<u8> {
    let mut out = Vec::new();
    let mut buf = [0u8; 7];
    loop {
        match inst.read(&mut buf) {
            Ok(n) => out.extend_from_slice(&buf[..n]),
            Err(UStreamError::Eof) => break,
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }
    out
}

#[test]
fn s3_concat_read_crosses_the_join_transparently() {
    let base = from_static(b"the quick brown fox ");
    let tail = from_static(b"jumps over the lazy dog");
    let mut joined = concat(base, &tail).unwrap();

    let out = read_all(&mut joined);
    assert_eq!(out, b"the quick brown fox jumps over the lazy dog");
}

#[test]
fn s4_clones_read_in_parallel_without_interference() {
    let donor = Arc::new(from_static(ALPHANUM));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let donor = donor.clone();
            thread::spawn(move || {
                let mut clone = donor.clone_at(0).unwrap();
                read_all(&mut clone)
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), ALPHANUM);
    }
    // The donor itself was never read from.
    assert_eq!(donor.get_position().unwrap(), 0);
}

#[test]
fn s5_concat_clones_read_in_parallel_under_the_shared_lock() {
    let base = from_static(b"0123456789");
    let tail = from_static(b"abcdefghij");
    let joined = Arc::new(concat(base, &tail).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let joined = joined.clone();
            thread::spawn(move || {
                let mut clone = joined.clone_at(0).unwrap();
                read_all(&mut clone)
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), b"0123456789abcdefghij");
    }
}

#[test]
fn byte_identity_round_trip_through_owned_backend() {
    let data = (0u8..=255).collect::<Vec<_>>();
    let mut inst = from_owned(data.clone());
    assert_eq!(read_all(&mut inst), data);
}

#[test]
fn position_is_monotonic_across_a_full_read() {
    let mut inst = from_static(ALPHANUM);
    let mut last = inst.get_position().unwrap();
    let mut buf = [0u8; 3];
    loop {
        match inst.read(&mut buf) {
            Ok(_) => {
                let now = inst.get_position().unwrap();
                assert!(now > last);
                last = now;
            }
            Err(UStreamError::Eof) => break,
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }
}

#[test]
fn clone_is_independent_of_donor_position() {
    let mut donor = from_static(ALPHANUM);
    let mut buf = [0u8; 10];
    donor.read(&mut buf).unwrap();

    let clone = donor.clone_at(donor.get_position().unwrap()).unwrap();
    assert_eq!(clone.get_position().unwrap(), donor.get_position().unwrap());

    // Advancing the donor further must not move the clone.
    donor.read(&mut buf).unwrap();
    assert_ne!(donor.get_position().unwrap(), clone.get_position().unwrap());
}

#[test]
fn release_is_idempotent_up_to_the_same_frontier() {
    let mut inst = from_static(ALPHANUM);
    let mut buf = [0u8; 20];
    inst.read(&mut buf).unwrap();

    inst.release(9).unwrap();
    // A second release up to a point already covered is still legal, as
    // long as it does not try to move the frontier backward or past
    // `current`.
    inst.release(15).unwrap();
    assert_eq!(inst.set_position(15), Err(UStreamError::NoSuchElement));
    assert!(inst.set_position(16).is_ok());
}

#[test]
fn concat_length_equals_sum_of_remaining_sizes() {
    let mut base = from_static(b"0123456789");
    let mut skip = [0u8; 3];
    base.read(&mut skip).unwrap();
    let base_remaining = base.get_remaining_size();

    let tail = from_static(b"abcde");
    let tail_remaining = tail.get_remaining_size();

    let joined = concat(base, &tail).unwrap();
    assert_eq!(joined.get_remaining_size(), base_remaining + tail_remaining);
}

#[test]
fn concat_is_byte_identical_to_manual_concatenation() {
    let base = from_static(b"hello, ");
    let tail = from_static(b"world!");
    let mut joined = concat(base, &tail).unwrap();
    assert_eq!(read_all(&mut joined), b"hello, world!");
}

#[test]
fn clone_refuses_an_offset_that_would_overflow() {
    let inst = from_static(b"x");
    assert_eq!(
        inst.clone_at(usize::MAX).unwrap_err(),
        UStreamError::IllegalArgument
    );
}

#[test]
fn owning_release_runs_exactly_once_even_with_live_clones_disposed_first() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let calls = Arc::new(AtomicUsize::new(0));
    let calls2 = calls.clone();
    let donor = ustream_core::from_owned_with_release(b"payload".to_vec(), move |_| {
        calls2.fetch_add(1, Ordering::SeqCst);
    });

    let clone_a = donor.clone_at(0).unwrap();
    let clone_b = donor.clone_at(0).unwrap();
    drop(clone_a);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    drop(clone_b);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    drop(donor);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
