//! The per-step view handed over by the host transport toolkit.
//!
//! A [`Step`] borrows every name (species, processes, volume) from the
//! host for the duration of one stepping callback, so deciding whether
//! to act on a step never allocates.

use crate::id::{CopyIndex, EventId, TrackId};

/// Process name substituted when a step point has no defining process.
pub const UNKNOWN_PROCESS: &str = "unknown";

/// One end of a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepPoint<'a> {
    /// Position in mm.
    pub position: [f64; 3],
    /// Kinetic energy in MeV.
    pub kinetic_energy: f64,
    /// Global time in ns.
    pub global_time: f64,
    /// Name of the process that defined this point, if any.
    pub process: Option<&'a str>,
}

impl<'a> StepPoint<'a> {
    /// The defining process name, or [`UNKNOWN_PROCESS`] when absent.
    pub fn process_name(&self) -> &'a str {
        self.process.unwrap_or(UNKNOWN_PROCESS)
    }
}

/// The geometry region a track currently occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Volume<'a> {
    /// Physical volume name.
    pub name: &'a str,
    /// Copy number of this placement. Only meaningful for repeated
    /// placements; [`CopyIndex::NONE`] otherwise.
    pub copy_index: CopyIndex,
}

impl<'a> Volume<'a> {
    /// A volume without instancing.
    pub fn single(name: &'a str) -> Self {
        Self {
            name,
            copy_index: CopyIndex::NONE,
        }
    }

    /// One placement of a repeated volume.
    pub fn instance(name: &'a str, copy_index: i32) -> Self {
        Self {
            name,
            copy_index: CopyIndex(copy_index),
        }
    }
}

/// The owning track's identity at the time of the step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackInfo<'a> {
    /// Particle species name, e.g. `"gamma"` or `"Xe132"`.
    pub species: &'a str,
    /// Track id within the event.
    pub track_id: TrackId,
    /// Parent track id, [`TrackId::NO_PARENT`] for primaries.
    pub parent_id: TrackId,
    /// 1-based ordinal of this step within the track.
    pub step_number: u32,
}

/// Everything the filter and recorder read from one transport step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step<'a> {
    /// Event the step belongs to.
    pub event_id: EventId,
    /// The owning track.
    pub track: TrackInfo<'a>,
    /// Pre-step point.
    pub pre: StepPoint<'a>,
    /// Post-step point.
    pub post: StepPoint<'a>,
    /// Total energy deposited during the step, in MeV.
    pub energy_deposit: f64,
    /// The track's current volume. `None` only when the host has no
    /// navigator location for the track, which is a precondition
    /// violation for any recorded step.
    pub volume: Option<Volume<'a>>,
}

/// Continuation status of a track, as seen by the transport engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TrackStatus {
    /// Default: the engine decides whether to continue.
    #[default]
    Alive,
    /// Explicitly kept alive, overriding a pending stop.
    ForcedAlive,
    /// Explicitly stopped and killed. No further steps follow.
    ForcedTerminated,
}

impl TrackStatus {
    /// Whether the track will take no further steps.
    pub fn is_terminated(self) -> bool {
        matches!(self, Self::ForcedTerminated)
    }
}
