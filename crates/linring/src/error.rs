//! Error types for ring buffer operations.

use thiserror::Error;

/// Errors reported by the checked `RingBuffer` entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingError {
    /// Storage length is zero, not a power of two, or above the supported maximum.
    #[error("storage length {len} is not a power of two in 1..=2^29")]
    InvalidCapacity {
        /// Length of the rejected storage.
        len: usize,
    },

    /// Storage length does not match the configured capacity.
    #[error("storage length {actual} does not match configured capacity {expected}")]
    CapacityMismatch {
        /// Capacity derived from the `Config`.
        expected: usize,
        /// Length of the storage handed in.
        actual: usize,
    },

    /// No contiguous region large enough for the record.
    #[error("cannot produce {requested} bytes, only {available} contiguous bytes free")]
    Full {
        /// Bytes the caller tried to write.
        requested: usize,
        /// Largest record that would currently fit.
        available: usize,
    },

    /// Tried to release more than the current contiguous run.
    #[error("cannot consume {requested} bytes, only {available} continuous bytes readable")]
    OverConsume {
        /// Bytes the caller tried to release.
        requested: usize,
        /// Continuous consumable size at the time of the call.
        available: usize,
    },
}

impl RingError {
    /// Returns `true` if retrying after the consumer makes progress can succeed.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Full { .. })
    }
}
