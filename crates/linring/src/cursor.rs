//! Cursor arithmetic for the contiguous ring.
//!
//! Positions are unbounded `u32` sequence numbers; the physical offset of any
//! cursor is `cursor & mask`. Nothing here touches storage, so every state
//! transition of [`RingBuffer`](crate::RingBuffer) can be reasoned about (and
//! tested) as pure arithmetic.
//!
//! # Split state
//!
//! When a record does not fit between the write offset and the end of
//! storage but does fit in front of the read offset, the producer restarts at
//! offset 0. The ring then holds two live runs:
//!
//! ```text
//!  0          write&mask      read&mask    wrap&mask      size
//!  ├─ front ───┤    free    ├──── tail ─────┤  skipped  ┤
//! ```
//!
//! No flag records this. Instead `write` is inflated by an extra `size` on
//! top of the distance to the next lap, which pushes the circular distance
//! between `read` and `write` above `size`. `wrap` remembers where the tail
//! ends. Once `read` reaches `wrap` the next consume applies the inverse
//! jump and the pair returns to the unsplit regime.
//!
//! # Limits
//!
//! While split, `write - read` can reach `3 * size`. Split detection compares
//! the *circular* distance against `size`, so that gap must stay below `2^31`.
//! [`MAX_RING_BITS`](crate::MAX_RING_BITS) bounds `size` to keep it there.
//! Total throughput is unbounded: cursors wrap through `u32::MAX` freely.

use crate::invariants::{
    debug_assert_bounded_count, debug_assert_front_behind_tail, debug_assert_front_offset,
    debug_assert_tail_in_range, debug_assert_within_continuous,
};

/// Minimal number of steps between two modular counters, in either direction.
#[inline]
pub(crate) fn circular_distance(a: u32, b: u32) -> u32 {
    let ab = a.wrapping_sub(b);
    let ba = b.wrapping_sub(a);
    ab.min(ba)
}

/// Where an accepted record will be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    /// Append at the current physical write offset.
    Append(usize),
    /// Restart at offset 0, splitting the ring.
    Front,
}

impl Placement {
    /// Physical offset of the first byte of the record.
    #[inline]
    pub(crate) fn offset(self) -> usize {
        match self {
            Placement::Append(offset) => offset,
            Placement::Front => 0,
        }
    }
}

/// Read, write and wrap cursors for a ring of `size` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursors {
    size: u32,
    mask: u32,
    read: u32,
    write: u32,
    wrap: u32,
}

impl Cursors {
    /// Creates empty cursors at sequence 0. `size` must be a power of two.
    pub(crate) const fn new(size: u32) -> Self {
        Self::at_origin(size, 0)
    }

    /// Creates empty cursors starting at an arbitrary sequence number.
    pub(crate) const fn at_origin(size: u32, origin: u32) -> Self {
        Self {
            size,
            mask: size - 1,
            read: origin,
            write: origin,
            wrap: origin,
        }
    }

    #[cfg(test)]
    pub(crate) const fn from_raw(size: u32, read: u32, write: u32, wrap: u32) -> Self {
        Self {
            size,
            mask: size - 1,
            read,
            write,
            wrap,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.read = 0;
        self.write = 0;
        self.wrap = 0;
    }

    #[inline]
    pub(crate) fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub(crate) fn read(&self) -> u32 {
        self.read
    }

    #[inline]
    pub(crate) fn write(&self) -> u32 {
        self.write
    }

    #[inline]
    pub(crate) fn wrap(&self) -> u32 {
        self.wrap
    }

    // =========================================================================
    // DERIVED STATE
    // =========================================================================

    #[inline]
    pub(crate) fn is_split(&self) -> bool {
        circular_distance(self.read, self.write) > self.size
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.write == self.read
    }

    /// Split, and the consumer has already released the whole tail.
    #[inline]
    fn tail_drained(&self) -> bool {
        self.read == self.wrap && self.is_split()
    }

    /// Physical offset of the next readable byte.
    #[inline]
    pub(crate) fn read_offset(&self) -> usize {
        if self.tail_drained() {
            0
        } else {
            (self.read & self.mask) as usize
        }
    }

    /// Bytes readable without crossing a discontinuity.
    #[inline]
    pub(crate) fn consumable_size_continuous(&self) -> u32 {
        self.consumable(true)
    }

    /// All live bytes, tail and front combined.
    #[inline]
    pub(crate) fn consumable_size(&self) -> u32 {
        self.consumable(false)
    }

    fn consumable(&self, continuous: bool) -> u32 {
        let live = if self.is_split() {
            if self.read == self.wrap {
                // A zero offset here means the front run fills the whole ring.
                let masked_write = self.write & self.mask;
                if masked_write != 0 {
                    masked_write
                } else {
                    self.size
                }
            } else {
                debug_assert_tail_in_range!(circular_distance(self.wrap, self.read), self.size);
                let tail = self.wrap.wrapping_sub(self.read) & self.mask;
                if continuous {
                    tail
                } else {
                    tail + (self.write & self.mask)
                }
            }
        } else {
            self.write.wrapping_sub(self.read)
        };
        debug_assert_bounded_count!(live, self.size);
        live
    }

    /// Free bytes between the end of the front run and the start of the tail.
    fn split_gap(&self) -> u32 {
        let masked_write = self.write & self.mask;
        if self.read == self.wrap {
            if masked_write != 0 {
                self.size - masked_write
            } else {
                0
            }
        } else {
            debug_assert_front_behind_tail!(self.read & self.mask, masked_write);
            self.read.wrapping_sub(self.write) & self.mask
        }
    }

    /// Largest record `plan_produce` would currently accept.
    pub(crate) fn available_to_produce(&self) -> u32 {
        if self.is_split() {
            return self.split_gap();
        }
        if self.is_empty() {
            return self.size;
        }
        let masked_write = self.write & self.mask;
        let masked_read = self.read & self.mask;
        if masked_write == 0 {
            masked_read
        } else {
            (self.size - masked_write).max(masked_read)
        }
    }

    // =========================================================================
    // PRODUCER
    // =========================================================================

    /// Decide where a record of `n` bytes goes, or `None` if it does not fit.
    ///
    /// `n` must be in `1..=size`.
    pub(crate) fn plan_produce(&self, n: u32) -> Option<Placement> {
        let masked_write = self.write & self.mask;

        // Only one split is tracked, so the front run can only grow into the gap.
        if self.is_split() {
            return (self.split_gap() >= n).then_some(Placement::Append(masked_write as usize));
        }

        let empty = self.is_empty();

        // Empty but parked mid-ring: restart at the front instead of
        // capping the record at the space left before the end.
        if masked_write != 0 && empty && self.size >= n {
            return Some(Placement::Front);
        }

        // Offset 0 on a non-empty ring means the back is filled up to the end.
        let back_full = masked_write == 0 && !empty;
        if !back_full && self.size - masked_write >= n {
            return Some(Placement::Append(masked_write as usize));
        }

        if self.read & self.mask >= n {
            return Some(Placement::Front);
        }

        None
    }

    /// Advance the write cursor for a record placed by `plan_produce`.
    pub(crate) fn commit(&mut self, placement: Placement, n: u32) {
        match placement {
            Placement::Append(_) => {
                self.write = self.write.wrapping_add(n);
            }
            Placement::Front => {
                let masked_write = self.write & self.mask;
                self.wrap = self.write;
                self.write = self
                    .write
                    .wrapping_add(self.size)
                    .wrapping_add(self.size - masked_write)
                    .wrapping_add(n);
                debug_assert_front_offset!(self.write & self.mask, n & self.mask);
            }
        }
    }

    // =========================================================================
    // CONSUMER
    // =========================================================================

    /// Release `n` bytes from the front. Returns true if this collapsed a split.
    ///
    /// `n` must not exceed `consumable_size_continuous()`.
    pub(crate) fn consume(&mut self, n: u32) -> bool {
        debug_assert_within_continuous!(n, self.consumable_size_continuous());

        if self.tail_drained() {
            let masked_read = self.read & self.mask;
            self.read = self
                .read
                .wrapping_add(self.size)
                .wrapping_add(self.size - masked_read)
                .wrapping_add(n);
            true
        } else {
            self.read = self.read.wrapping_add(n);
            false
        }
    }
}
