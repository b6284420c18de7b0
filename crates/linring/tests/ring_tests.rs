//! Scenario tests for RingBuffer
//!
//! These walk the ring through fill/drain, split/collapse, auto-reset and
//! cursor wrap-around sequences and check every query along the way.

use linring_rs::{Config, RingBuffer, RingError, SMALL_CONFIG};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Drain the ring one contiguous run at a time, collecting the bytes.
fn drain(ring: &mut RingBuffer<'_>) -> Vec<u8> {
    let mut out = Vec::new();
    while !ring.is_empty() {
        let run = ring.peek().to_vec();
        assert_eq!(run.len(), ring.consumable_size_continuous());
        ring.consume(run.len());
        out.extend_from_slice(&run);
    }
    out
}

#[test]
fn test_capacity_eight_fill_and_refill() {
    let mut storage = [0u8; 8];
    let mut ring = RingBuffer::new(&mut storage);

    assert!(ring.produce(&HEX[..8]));
    assert!(!ring.produce(&HEX[..1]));
    ring.consume(8);
    assert!(ring.is_empty());
    assert!(ring.produce(&HEX[..7]));
    ring.consume(6);
    assert_eq!(ring.consumable_size_continuous(), 1);
}

#[test]
fn test_split_reports_tail_then_front() {
    let mut storage = [0u8; 8];
    let mut ring = RingBuffer::new(&mut storage);

    assert!(ring.produce(b"AAAAAAA"));
    ring.consume(5);
    assert_eq!(ring.peek(), b"AA");

    // 1 byte left at the back, 5 free at the front.
    assert!(ring.produce(b"BBBB"));
    assert!(ring.is_split());
    assert_eq!(ring.consumable_size_continuous(), 2);
    assert_eq!(ring.consumable_size(), 6);
    assert_eq!(ring.peek(), b"AA");

    ring.consume(2);
    assert!(ring.is_split());
    assert_eq!(ring.peek(), b"BBBB");
    assert_eq!(ring.consumable_size_continuous(), 4);
    assert_eq!(ring.consumable_size(), 4);

    ring.consume(1);
    assert!(!ring.is_split());
    assert_eq!(ring.peek(), b"BBB");
    ring.consume(3);
    assert!(ring.is_empty());
    assert_eq!(ring.consumable_size(), 0);
}

#[test]
fn test_record_never_observed_split() {
    let mut storage = [0u8; 16];
    let mut ring = RingBuffer::new(&mut storage);

    assert!(ring.produce(&[1; 12]));
    ring.consume(10);

    // 4 bytes at the back, 10 at the front: the record must land at offset 0.
    let record = [7u8; 6];
    assert!(ring.produce(&record));
    assert_eq!(ring.peek(), &[1, 1]);
    ring.consume(2);
    assert_eq!(ring.peek(), &record);
}

#[test]
fn test_rejected_record_leaves_ring_untouched() {
    let mut storage = [0u8; 16];
    let mut ring = RingBuffer::new(&mut storage);

    assert!(ring.produce(&[1; 10]));
    ring.consume(4);
    // 6 at the back, 4 at the front: 7 fits nowhere.
    let before = format!("{ring:?}");
    assert_eq!(
        ring.try_produce(&[2; 7]),
        Err(RingError::Full {
            requested: 7,
            available: 6
        })
    );
    assert_eq!(format!("{ring:?}"), before);
    assert_eq!(drain(&mut ring), vec![1; 6]);
}

#[test]
fn test_auto_reset_accepts_full_capacity() {
    let mut storage = [0u8; 8];
    let mut ring = RingBuffer::new(&mut storage);

    assert!(ring.produce(&HEX[..3]));
    ring.consume(3);
    assert!(ring.is_empty());

    // Write offset is 3, yet the whole ring is usable again.
    assert_eq!(ring.available_to_produce(), 8);
    assert!(ring.produce(&HEX[8..16]));
    assert!(ring.is_full());
    assert_eq!(ring.peek(), &HEX[8..16]);
    assert_eq!(drain(&mut ring), HEX[8..16].to_vec());
}

#[test]
fn test_auto_reset_restarts_small_record_at_front() {
    let mut storage = [0u8; 8];
    {
        let mut ring = RingBuffer::new(&mut storage);
        assert!(ring.produce(b"xxxxx"));
        ring.consume(5);
        assert!(ring.produce(b"yy"));
        assert_eq!(ring.peek(), b"yy");
    }
    assert_eq!(&storage[..2], b"yy");
}

#[test]
fn test_cursors_wrap_through_counter_top() {
    let mut storage = [0u8; 8];
    let mut ring = RingBuffer::with_origin(&mut storage, u32::MAX - 3);

    // Empty with a nonzero write offset: the first record starts at 0 and
    // the second one lands right behind it.
    assert!(ring.produce(&HEX[..6]));
    assert!(ring.produce(&HEX[..2]));
    assert_eq!(ring.consumable_size(), 8);
    assert!(ring.is_full());
    assert_eq!(ring.peek(), b"01234501");
    ring.consume(6);

    assert_eq!(ring.consumable_size(), 2);
    assert_eq!(ring.peek(), &HEX[..2]);
    ring.consume(2);
    assert!(ring.is_empty());
}

#[test]
fn test_origin_does_not_change_behaviour() {
    let script: &[(bool, usize)] = &[
        (true, 5),
        (true, 2),
        (false, 4),
        (true, 3),
        (true, 1),
        (false, 3),
        (true, 4),
        (false, 2),
        (false, 4),
        (true, 8),
    ];

    let mut baseline = Vec::new();
    for origin in [0u32, u32::MAX - 3, u32::MAX, 1 << 31] {
        let mut storage = [0u8; 8];
        let mut ring = RingBuffer::with_origin(&mut storage, origin);
        let mut trace = Vec::new();
        for &(is_produce, n) in script {
            if is_produce {
                trace.push(ring.produce(&HEX[..n]) as usize);
            } else {
                let n = n.min(ring.consumable_size_continuous());
                ring.consume(n);
            }
            trace.push(ring.consumable_size_continuous());
            trace.push(ring.consumable_size());
            trace.push(ring.peek().first().copied().unwrap_or(0) as usize);
        }
        if origin == 0 {
            baseline = trace;
        } else {
            assert_eq!(trace, baseline, "origin {origin:#x} diverged");
        }
    }
}

#[test]
fn test_reset_after_split() {
    let mut storage = [0u8; 8];
    let mut ring = RingBuffer::new(&mut storage);

    assert!(ring.produce(&HEX[..6]));
    ring.consume(5);
    assert!(ring.produce(&HEX[..4]));
    assert!(ring.is_split());

    ring.reset();
    assert!(ring.is_empty());
    assert!(!ring.is_split());
    assert_eq!(ring.available_to_produce(), 8);
    assert!(ring.produce(&HEX[..8]));
    assert_eq!(ring.peek(), &HEX[..8]);
}

#[test]
fn test_drain_loop_empties_ring() {
    let mut storage = vec![0u8; SMALL_CONFIG.capacity()];
    let mut ring = RingBuffer::with_config(&mut storage, SMALL_CONFIG).unwrap();

    let mut expected = Vec::new();
    let mut seed = 7u8;
    for round in 0..50usize {
        let len = round % 37 + 1;
        let record: Vec<u8> = (0..len)
            .map(|_| {
                seed = seed.wrapping_mul(31).wrapping_add(11);
                seed
            })
            .collect();
        if ring.produce(&record) {
            expected.extend_from_slice(&record);
        } else {
            break;
        }
    }

    assert_eq!(drain(&mut ring), expected);
    assert!(ring.is_empty());
    assert_eq!(ring.consumable_size(), 0);
}

#[test]
fn test_metrics_track_rejections() {
    let mut storage = [0u8; 16];
    let mut ring = RingBuffer::with_config(&mut storage, Config::new(4, true)).unwrap();

    assert!(ring.produce(&[0; 16]));
    assert!(!ring.produce(&[0; 1]));
    assert!(!ring.produce(&[0; 17]));
    ring.consume(16);

    let metrics = ring.metrics();
    assert_eq!(metrics.records_produced, 1);
    assert_eq!(metrics.produce_rejections, 2);
    assert_eq!(metrics.bytes_consumed, 16);
}
