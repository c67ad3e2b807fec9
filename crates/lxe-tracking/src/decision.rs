//! The filter's output and the adapter that applies it to a host track.

use lxe_core::{TrackControl, TrackStatus};

/// What the filter wants done with the current track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackingDecision {
    /// Leave the engine's own decision in place.
    NoChange,
    /// Keep the track alive, overriding any pending termination.
    ForceAlive,
    /// Stop and kill the track after this step.
    ForceTerminate,
}

impl TrackingDecision {
    /// Write the decision to a host track. `NoChange` touches nothing.
    pub fn apply<T: TrackControl + ?Sized>(self, track: &mut T) {
        match self {
            Self::NoChange => {}
            Self::ForceAlive => track.set_status(TrackStatus::ForcedAlive),
            Self::ForceTerminate => track.set_status(TrackStatus::ForcedTerminated),
        }
    }

    /// Whether applying this decision would mutate the track.
    pub fn is_override(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
