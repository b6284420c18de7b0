/// Largest supported `ring_bits`.
///
/// While split, the distance between the read and write cursors can reach
/// `3 * capacity`; it must stay below `2^31` for split detection on `u32`
/// cursors to remain unambiguous.
pub const MAX_RING_BITS: u8 = 29;

/// Configuration for a [`RingBuffer`](crate::RingBuffer).
///
/// The ring never allocates. `Config` describes the storage the caller is
/// expected to hand in, and whether the ring should keep [`Metrics`](crate::Metrics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Ring buffer size as power of 2 (default: 12 = 4 KiB)
    pub ring_bits: u8,
    /// Enable metrics collection (slight overhead)
    pub enable_metrics: bool,
}

impl Config {
    /// Creates a new configuration with custom settings.
    pub const fn new(ring_bits: u8, enable_metrics: bool) -> Self {
        Self {
            ring_bits,
            enable_metrics,
        }
    }

    /// Returns the capacity of the ring buffer in bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        1 << self.ring_bits
    }

    /// Returns the mask for offset wrapping.
    #[inline]
    pub const fn mask(&self) -> usize {
        self.capacity() - 1
    }

    /// Returns true if `ring_bits` is within the supported range.
    #[inline]
    pub const fn validate(&self) -> bool {
        self.ring_bits <= MAX_RING_BITS
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ring_bits: 12, // 4 KiB
            enable_metrics: false,
        }
    }
}

/// Small configuration (256 bytes), handy for tests and tiny command queues
pub const SMALL_CONFIG: Config = Config::new(8, false);

/// Large configuration (1 MiB) for bulk payload staging
pub const LARGE_CONFIG: Config = Config::new(20, false);
