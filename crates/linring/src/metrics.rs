/// Optional counters describing ring activity.
///
/// Only updated when the ring was built with `Config::enable_metrics`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub bytes_produced: u64,
    pub bytes_consumed: u64,
    pub records_produced: u64,
    pub produce_rejections: u64,
    /// Records that restarted at offset 0 and split the buffer.
    pub splits: u64,
    /// Consumes that drained the tail and returned to the unsplit state.
    pub collapses: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }
}
