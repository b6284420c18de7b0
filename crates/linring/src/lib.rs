//! linring - Contiguous Byte Ring Buffer
//!
//! A fixed-capacity, allocation-free circular buffer for variable-sized
//! binary records. Every record a producer appends is stored as **one
//! contiguous run** or rejected entirely; it is never split across the
//! physical end of storage. Consumers therefore always get a linear view of
//! a payload, without scatter/gather and without the virtual-memory double
//! mapping of a "magic" ring buffer.
//!
//! # Key Features
//!
//! - Borrowed storage: the caller owns the bytes, the ring never allocates
//! - All-or-nothing writes, including in-place writes via `produce_with`
//! - Split state derived from three wrapping `u32` cursors, no flags
//! - Auto-reset: an empty ring restarts records at offset 0
//!
//! # Example
//!
//! ```
//! use linring_rs::RingBuffer;
//!
//! let mut storage = vec![0u8; 1024];
//! let mut ring = RingBuffer::new(&mut storage);
//!
//! assert!(ring.produce(b"hello"));
//! assert!(ring.produce(b"world"));
//!
//! // Consume in FIFO order; framing is up to the caller.
//! assert_eq!(ring.peek(), b"helloworld");
//! ring.consume(5);
//! assert_eq!(ring.peek(), b"world");
//! ring.consume(5);
//! assert!(ring.is_empty());
//! ```
//!
//! # Threading
//!
//! `RingBuffer` is a single-threaded value. Sharing it between a producer
//! thread and a consumer thread requires external synchronization.

mod config;
mod cursor;
mod error;
mod invariants;
mod metrics;
mod ring;

pub use config::{Config, LARGE_CONFIG, MAX_RING_BITS, SMALL_CONFIG};
pub use error::RingError;
pub use metrics::Metrics;
pub use ring::RingBuffer;
