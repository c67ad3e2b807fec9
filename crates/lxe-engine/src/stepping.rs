//! The per-step callback.
//!
//! [`SteppingAction::on_step`] is what the host invokes once per step:
//! the tracking filter runs first and may change the track's status,
//! then the recorder runs unconditionally on the same step.

use lxe_core::{RowSink, Step, StepError, TrackControl};
use lxe_record::{RecordOutcome, StepRecorder};
use lxe_tracking::{TrackingDecision, TrackingFilter};
use tracing::trace;

use crate::config::RunConfig;
use crate::metrics::StepMetrics;

/// What happened on one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// The filter's decision, already applied to the track.
    pub decision: TrackingDecision,
    /// Whether a row was appended.
    pub recorded: RecordOutcome,
}

/// Filter + recorder pair owned by one worker.
#[derive(Debug)]
pub struct SteppingAction<S> {
    filter: TrackingFilter,
    recorder: StepRecorder<S>,
    metrics: StepMetrics,
}

impl<S: RowSink> SteppingAction<S> {
    /// Combine an existing filter and recorder.
    pub fn new(filter: TrackingFilter, recorder: StepRecorder<S>) -> Self {
        Self {
            filter,
            recorder,
            metrics: StepMetrics::default(),
        }
    }

    /// Build from a run configuration, recording into `sink`.
    pub fn from_config(config: &RunConfig, sink: S) -> Self {
        Self::new(
            TrackingFilter::new(config.policy.clone()),
            StepRecorder::new(config.regions.clone(), sink),
        )
    }

    /// Process one step of the track behind `track`.
    ///
    /// Errors are fatal for the run: a step for an already-terminated
    /// track, a step without a current volume, or a sink failure.
    pub fn on_step<T: TrackControl + ?Sized>(
        &mut self,
        step: &Step<'_>,
        track: &mut T,
    ) -> Result<StepOutcome, StepError> {
        if track.status().is_terminated() {
            return Err(StepError::TrackTerminated {
                event_id: step.event_id,
                track_id: step.track.track_id,
            });
        }
        self.metrics.steps += 1;

        let decision = self.filter.decide_step(step);
        decision.apply(track);
        match decision {
            TrackingDecision::NoChange => {}
            TrackingDecision::ForceAlive => self.metrics.forced_alive += 1,
            TrackingDecision::ForceTerminate => self.metrics.forced_terminated += 1,
        }
        if decision.is_override() {
            trace!(
                event = %step.event_id,
                track = %step.track.track_id,
                species = step.track.species,
                step = step.track.step_number,
                ?decision,
                "tracking override"
            );
        }

        let recorded = self.recorder.record(step)?;
        match recorded {
            RecordOutcome::Recorded => self.metrics.rows_recorded += 1,
            RecordOutcome::Skipped => self.metrics.steps_skipped += 1,
        }
        Ok(StepOutcome { decision, recorded })
    }

    /// Count steps of a terminated track that were never offered.
    pub fn note_dropped(&mut self, steps: usize) {
        self.metrics.steps_dropped += steps as u64;
    }

    /// Flush the recorder's sink.
    pub fn flush(&mut self) -> Result<(), StepError> {
        self.recorder.flush()
    }

    /// Counters so far.
    pub fn metrics(&self) -> &StepMetrics {
        &self.metrics
    }

    /// The recorder's sink.
    pub fn sink(&self) -> &S {
        self.recorder.sink()
    }

    /// Consume the action, returning its sink and counters.
    pub fn into_parts(self) -> (S, StepMetrics) {
        (self.recorder.into_sink(), self.metrics)
    }
}
