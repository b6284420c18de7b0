//! Length-prefixed framing on top of a RingBuffer.
//!
//! The ring stores raw bytes; this example writes each message as
//! `[len: u16 LE][payload]` in a single `produce_with` call, so a frame is
//! never split and the consumer can parse it straight out of `peek()`.
//!
//! The producer and consumer run on separate threads and share the ring
//! through a `Mutex`, which is the external synchronization the ring needs.

use linring_rs::{Config, RingBuffer};
use std::sync::Mutex;
use std::thread;
use std::time::Instant;

const HEADER: usize = 2;
const MESSAGES: usize = 200_000;

fn encode(buf: &mut [u8], payload: &[u8]) {
    buf[..HEADER].copy_from_slice(&(payload.len() as u16).to_le_bytes());
    buf[HEADER..].copy_from_slice(payload);
}

/// Returns the payload length of the frame at the start of `run`.
fn frame_len(run: &[u8]) -> usize {
    u16::from_le_bytes([run[0], run[1]]) as usize
}

fn main() {
    println!("linring Framed Records Example");
    println!("==============================\n");

    let config = Config::new(12, true); // 4 KiB
    let mut storage = vec![0u8; config.capacity()];
    let ring = Mutex::new(RingBuffer::with_config(&mut storage, config).unwrap());

    println!("Configuration:");
    println!("  Ring capacity: {} bytes", config.capacity());
    println!("  Messages: {}\n", MESSAGES);

    let start = Instant::now();

    let checksum = thread::scope(|s| {
        s.spawn(|| {
            let mut sent = 0;
            while sent < MESSAGES {
                let payload = format!("message #{sent}");
                let frame = HEADER + payload.len();
                let ok = ring
                    .lock()
                    .unwrap()
                    .produce_with(frame, |buf| encode(buf, payload.as_bytes()));
                if ok {
                    sent += 1;
                } else {
                    thread::yield_now();
                }
            }
        });

        let consumer = s.spawn(|| {
            let mut received = 0;
            let mut checksum = 0u64;
            while received < MESSAGES {
                let mut guard = ring.lock().unwrap();
                if guard.is_empty() {
                    drop(guard);
                    thread::yield_now();
                    continue;
                }
                let frame = {
                    let run = guard.peek();
                    let len = frame_len(run);
                    let payload = &run[HEADER..HEADER + len];
                    checksum = payload
                        .iter()
                        .fold(checksum, |acc, &b| acc.wrapping_mul(31).wrapping_add(b as u64));
                    HEADER + len
                };
                guard.consume(frame);
                received += 1;
            }
            checksum
        });

        consumer.join().unwrap()
    });

    let elapsed = start.elapsed();
    let metrics = ring.lock().unwrap().metrics();

    println!("Results:");
    println!("  Checksum: {:#018x}", checksum);
    println!("  Bytes produced: {}", metrics.bytes_produced);
    println!("  Rejected produces: {}", metrics.produce_rejections);
    println!("  Splits: {}", metrics.splits);
    println!("  Collapses: {}", metrics.collapses);
    println!("  Duration: {:?}", elapsed);
    println!(
        "  Throughput: {:.2} M msgs/sec",
        MESSAGES as f64 / elapsed.as_secs_f64() / 1_000_000.0
    );
}
