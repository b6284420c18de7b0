//! Debug assertion macros for cursor invariants.
//!
//! Only active in debug builds (`#[cfg(debug_assertions)]`), so there is
//! zero overhead in release builds.
//!
//! Used by `Cursors`.

// =============================================================================
// Bounded live bytes
// =============================================================================

/// Assert that the live byte count does not exceed capacity.
///
/// **Invariant**: `0 ≤ consumable_size ≤ size`
///
/// Used in: `Cursors::consumable_size()` after computing either branch
macro_rules! debug_assert_bounded_count {
    ($count:expr, $size:expr) => {
        debug_assert!(
            $count <= $size,
            "bounded count violated: {} live bytes exceed capacity {}",
            $count,
            $size
        )
    };
}

// =============================================================================
// Split geometry
// =============================================================================

/// Assert that the undrained tail is shorter than the whole ring.
///
/// **Invariant**: while split and `read != wrap`, `distance(wrap, read) < size`
///
/// Used in: `Cursors::consumable_size()` on the tail branch
macro_rules! debug_assert_tail_in_range {
    ($distance:expr, $size:expr) => {
        debug_assert!(
            $distance < $size,
            "split tail of {} bytes is not shorter than capacity {}",
            $distance,
            $size
        )
    };
}

/// Assert that the front run has not overtaken the undrained tail.
///
/// **Invariant**: while split and `read != wrap`, `read & mask ≥ write & mask`
///
/// Used in: `Cursors::plan_produce()` on the split branch
macro_rules! debug_assert_front_behind_tail {
    ($masked_read:expr, $masked_write:expr) => {
        debug_assert!(
            $masked_read >= $masked_write,
            "front run end {} overtook tail start {}",
            $masked_write,
            $masked_read
        )
    };
}

/// Assert the physical write offset after restarting at the front.
///
/// **Invariant**: `(write & mask) == (n & mask)` after a split
///
/// Used in: `Cursors::commit_front()`
macro_rules! debug_assert_front_offset {
    ($masked_write:expr, $expected:expr) => {
        debug_assert!(
            $masked_write == $expected,
            "write offset {} after split, expected {}",
            $masked_write,
            $expected
        )
    };
}

// =============================================================================
// Consume precondition
// =============================================================================

/// Assert that a consume stays within the contiguous run.
///
/// **Invariant**: `n ≤ consumable_size_continuous()`
///
/// Used in: `Cursors::consume()`
macro_rules! debug_assert_within_continuous {
    ($n:expr, $continuous:expr) => {
        debug_assert!(
            $n <= $continuous,
            "consume of {} bytes exceeds continuous run of {}",
            $n,
            $continuous
        )
    };
}

// =============================================================================
// Re-exports for crate-internal use
// =============================================================================

pub(crate) use debug_assert_bounded_count;
pub(crate) use debug_assert_front_behind_tail;
pub(crate) use debug_assert_front_offset;
pub(crate) use debug_assert_tail_in_range;
pub(crate) use debug_assert_within_continuous;
