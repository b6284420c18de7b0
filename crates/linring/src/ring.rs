use crate::cursor::Cursors;
use crate::{Config, Metrics, RingError, MAX_RING_BITS};
use std::fmt;

// =============================================================================
// CALLER OBLIGATIONS
// =============================================================================
//
// `RingBuffer` is a single-threaded value type. It holds no atomics and no
// locks; every mutating call takes `&mut self`. A producer and a consumer on
// different threads must share it through external synchronization (a
// `Mutex`, or a channel handing the ring back and forth), which provides the
// happens-before edge between a `produce` and the `peek`/`consume` that
// observes it, and between a `consume` and the `produce` that reuses the
// freed bytes.
//
// `peek` hands out a borrow of the storage. The borrow checker ends that
// borrow before the next `produce`/`consume`/`reset`, so a view can never
// observe bytes being overwritten.
//
// =============================================================================

/// A fixed-capacity byte ring that stores every record contiguously.
///
/// The ring borrows its storage (`&'a mut [u8]`, length a power of two) and
/// never allocates. A record handed to [`produce`](Self::produce) is written
/// as one unbroken run or rejected outright: when it does not fit before the
/// physical end of storage but fits in front of the oldest live byte, the ring
/// restarts at offset 0 and leaves the unused bytes at the end as a gap.
///
/// The consumer reads with [`peek`](Self::peek), which always returns a
/// contiguous slice, and releases bytes with [`consume`](Self::consume).
///
/// # Example
///
/// ```
/// use linring_rs::RingBuffer;
///
/// let mut storage = [0u8; 8];
/// let mut ring = RingBuffer::new(&mut storage);
///
/// assert!(ring.produce(b"abcdef"));
/// ring.consume(5);
///
/// // Only 2 bytes left before the end, but 5 free in front: restart at 0.
/// assert!(ring.produce(b"wxyz"));
/// assert_eq!(ring.peek(), b"f");
/// ring.consume(1);
/// assert_eq!(ring.peek(), b"wxyz");
/// ```
pub struct RingBuffer<'a> {
    storage: &'a mut [u8],
    cursors: Cursors,
    config: Config,
    metrics: Metrics,
}

impl<'a> RingBuffer<'a> {
    /// Creates an empty ring over `storage`.
    ///
    /// # Panics
    ///
    /// Panics if `storage.len()` is zero, not a power of two, or larger than
    /// `2^MAX_RING_BITS`. Use [`try_new`](Self::try_new) to get an error instead.
    pub fn new(storage: &'a mut [u8]) -> Self {
        match Self::try_new(storage) {
            Ok(ring) => ring,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an empty ring over `storage`, validating its length.
    pub fn try_new(storage: &'a mut [u8]) -> Result<Self, RingError> {
        let len = storage.len();
        if !len.is_power_of_two() || len > 1 << MAX_RING_BITS {
            return Err(RingError::InvalidCapacity { len });
        }
        let config = Config::new(len.trailing_zeros() as u8, false);
        Ok(Self::from_parts(storage, config))
    }

    /// Creates an empty ring whose storage must match `config.capacity()`.
    pub fn with_config(storage: &'a mut [u8], config: Config) -> Result<Self, RingError> {
        if !config.validate() {
            return Err(RingError::InvalidCapacity {
                len: storage.len(),
            });
        }
        if storage.len() != config.capacity() {
            return Err(RingError::CapacityMismatch {
                expected: config.capacity(),
                actual: storage.len(),
            });
        }
        Ok(Self::from_parts(storage, config))
    }

    /// Creates an empty ring whose cursors start at `origin` instead of 0.
    ///
    /// Behaviour is identical to [`new`](Self::new); only the sequence numbers
    /// differ. Useful to exercise cursor wrap-around through `u32::MAX`.
    ///
    /// # Panics
    ///
    /// Same as [`new`](Self::new).
    pub fn with_origin(storage: &'a mut [u8], origin: u32) -> Self {
        let mut ring = Self::new(storage);
        ring.cursors = Cursors::at_origin(ring.cursors.size(), origin);
        ring
    }

    fn from_parts(storage: &'a mut [u8], config: Config) -> Self {
        Self {
            cursors: Cursors::new(storage.len() as u32),
            storage,
            config,
            metrics: Metrics::new(),
        }
    }

    // =========================================================================
    // STATUS
    // =========================================================================

    /// Returns the ring capacity in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns the configuration the ring was built with.
    #[inline]
    pub fn config(&self) -> Config {
        self.config
    }

    /// Returns a snapshot of the collected metrics.
    #[inline]
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// Returns true if no bytes are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    /// Returns true if every byte of storage holds live data.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.consumable_size() == self.capacity()
    }

    /// Returns true if live data occupies both a tail run and a front run.
    #[inline]
    pub fn is_split(&self) -> bool {
        self.cursors.is_split()
    }

    /// Returns the number of bytes [`peek`](Self::peek) would expose.
    #[inline]
    pub fn consumable_size_continuous(&self) -> usize {
        self.cursors.consumable_size_continuous() as usize
    }

    /// Returns the total number of live bytes.
    ///
    /// While split this can exceed
    /// [`consumable_size_continuous`](Self::consumable_size_continuous).
    #[inline]
    pub fn consumable_size(&self) -> usize {
        self.cursors.consumable_size() as usize
    }

    /// Returns the largest record [`produce`](Self::produce) would accept right now.
    #[inline]
    pub fn available_to_produce(&self) -> usize {
        self.cursors.available_to_produce() as usize
    }

    // =========================================================================
    // PRODUCER API
    // =========================================================================

    /// Append `data` as one contiguous run.
    ///
    /// Returns `false` without writing anything if no contiguous region of
    /// `data.len()` bytes is free. An empty `data` always succeeds and leaves
    /// the ring untouched.
    #[inline]
    pub fn produce(&mut self, data: &[u8]) -> bool {
        self.produce_with(data.len(), |dst| dst.copy_from_slice(data))
    }

    /// Like [`produce`](Self::produce), but reports how much would have fit.
    pub fn try_produce(&mut self, data: &[u8]) -> Result<(), RingError> {
        if self.produce(data) {
            Ok(())
        } else {
            Err(RingError::Full {
                requested: data.len(),
                available: self.available_to_produce(),
            })
        }
    }

    /// Reserve `n` contiguous bytes and let `fill` write them in place.
    ///
    /// `fill` receives exactly `n` bytes and is only called if the record
    /// fits. The cursors move after `fill` returns, so a panic inside `fill`
    /// leaves the ring unchanged.
    ///
    /// ```
    /// use linring_rs::RingBuffer;
    ///
    /// let mut storage = [0u8; 16];
    /// let mut ring = RingBuffer::new(&mut storage);
    /// assert!(ring.produce_with(4, |buf| buf.copy_from_slice(&7u32.to_le_bytes())));
    /// assert_eq!(ring.peek(), &7u32.to_le_bytes());
    /// ```
    pub fn produce_with<F>(&mut self, n: usize, fill: F) -> bool
    where
        F: FnOnce(&mut [u8]),
    {
        if n == 0 {
            return true;
        }

        let placement = if n <= self.capacity() {
            self.cursors.plan_produce(n as u32)
        } else {
            None
        };

        let Some(placement) = placement else {
            tracing::trace!(
                requested = n,
                available = self.available_to_produce(),
                "produce rejected"
            );
            if self.config.enable_metrics {
                self.metrics.produce_rejections += 1;
            }
            return false;
        };

        let offset = placement.offset();
        fill(&mut self.storage[offset..offset + n]);

        let was_split = self.cursors.is_split();
        self.cursors.commit(placement, n as u32);

        let split = !was_split && self.cursors.is_split();
        if split {
            tracing::trace!(
                requested = n,
                wrap = self.cursors.wrap(),
                write = self.cursors.write(),
                "record restarted at front, ring split"
            );
        }
        if self.config.enable_metrics {
            self.metrics.bytes_produced += n as u64;
            self.metrics.records_produced += 1;
            if split {
                self.metrics.splits += 1;
            }
        }
        true
    }

    // =========================================================================
    // CONSUMER API
    // =========================================================================

    /// Returns the next contiguous readable run.
    ///
    /// The slice is [`consumable_size_continuous`](Self::consumable_size_continuous)
    /// bytes long, and empty when the ring is empty.
    #[inline]
    pub fn peek(&self) -> &[u8] {
        let offset = self.cursors.read_offset();
        let len = self.consumable_size_continuous();
        &self.storage[offset..offset + len]
    }

    /// Release `n` bytes from the front of the contiguous run.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`consumable_size_continuous`](Self::consumable_size_continuous).
    /// Use [`try_consume`](Self::try_consume) to get an error instead.
    pub fn consume(&mut self, n: usize) {
        if let Err(err) = self.try_consume(n) {
            panic!("{err}");
        }
    }

    /// Release `n` bytes, rejecting requests beyond the contiguous run.
    pub fn try_consume(&mut self, n: usize) -> Result<(), RingError> {
        let available = self.consumable_size_continuous();
        if n > available {
            return Err(RingError::OverConsume {
                requested: n,
                available,
            });
        }

        let collapsed = self.cursors.consume(n as u32);
        if collapsed {
            tracing::trace!(
                consumed = n,
                read = self.cursors.read(),
                write = self.cursors.write(),
                "tail drained, ring collapsed"
            );
        }
        if self.config.enable_metrics {
            self.metrics.bytes_consumed += n as u64;
            if collapsed {
                self.metrics.collapses += 1;
            }
        }
        Ok(())
    }

    /// Discard all live bytes. Storage contents are left as they are.
    pub fn reset(&mut self) {
        self.cursors.reset();
        tracing::debug!(capacity = self.capacity(), "ring reset");
    }
}

impl fmt::Debug for RingBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("read", &self.cursors.read())
            .field("write", &self.cursors.write())
            .field("wrap", &self.cursors.wrap())
            .field("split", &self.is_split())
            .field("consumable", &self.consumable_size())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
