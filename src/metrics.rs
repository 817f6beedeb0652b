/// A 'snapshot' of what the collector has done so far.
///
/// Obtained by calling [`crate::ProgramState::metrics`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Number of full mark and sweep cycles that have run.
    pub collections: usize,

    /// How many of those cycles used the report sweep.
    pub report_collections: usize,

    /// How many of those cycles used the reclaim sweep.
    pub reclaim_collections: usize,

    /// Chunks marked by the most recent mark phase.
    pub last_marked: usize,

    /// Chunks freed by the most recent reclaim sweep.
    pub last_freed: usize,

    /// Running total of chunks freed by every reclaim sweep.
    pub total_freed: usize,

    /// Live chunks in the heap right now.
    pub heap_size: usize,

    /// Largest heap size seen at the start of any collection.
    pub max_heap_size: usize,
}
