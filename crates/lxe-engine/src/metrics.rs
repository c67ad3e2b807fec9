//! Per-run step counters.
//!
//! [`StepMetrics`] is owned by each [`SteppingAction`](crate::SteppingAction)
//! and merged across workers at the end of a run.

/// Counters collected by a stepping action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Steps offered to the stepping action.
    pub steps: u64,
    /// Steps that produced an output row.
    pub rows_recorded: u64,
    /// Steps outside every recorded region.
    pub steps_skipped: u64,
    /// Steps where the filter forced the track alive.
    pub forced_alive: u64,
    /// Steps where the filter terminated the track.
    pub forced_terminated: u64,
    /// Steps in recorded histories never offered because their track
    /// had already been terminated.
    pub steps_dropped: u64,
}

impl StepMetrics {
    /// Add another worker's counters into this one.
    pub fn merge(&mut self, other: &StepMetrics) {
        self.steps += other.steps;
        self.rows_recorded += other.rows_recorded;
        self.steps_skipped += other.steps_skipped;
        self.forced_alive += other.forced_alive;
        self.forced_terminated += other.forced_terminated;
        self.steps_dropped += other.steps_dropped;
    }
}
