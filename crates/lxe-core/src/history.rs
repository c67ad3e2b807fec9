//! Owned step histories.
//!
//! A host that batches transport output (or a synthetic generator)
//! hands over whole events instead of one step at a time. Step ordinals
//! are not stored: they are the 1-based position in
//! [`TrackRecord::steps`], so they are strictly increasing by
//! construction.

use crate::id::{CopyIndex, EventId, TrackId};
use crate::step::{Step, StepPoint, TrackInfo, Volume};

/// Owned form of a [`StepPoint`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointRecord {
    /// Position in mm.
    pub position: [f64; 3],
    /// Kinetic energy in MeV.
    pub kinetic_energy: f64,
    /// Global time in ns.
    pub global_time: f64,
    /// Defining process, if any.
    pub process: Option<String>,
}

impl PointRecord {
    /// Borrow as a [`StepPoint`].
    pub fn as_point(&self) -> StepPoint<'_> {
        StepPoint {
            position: self.position,
            kinetic_energy: self.kinetic_energy,
            global_time: self.global_time,
            process: self.process.as_deref(),
        }
    }
}

/// Owned form of a [`Volume`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VolumeRecord {
    /// Physical volume name.
    pub name: String,
    /// Copy number, [`CopyIndex::NONE`] when not instanced.
    pub copy_index: CopyIndex,
}

/// One step of a recorded track, minus its ordinal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepRecord {
    /// Pre-step point.
    pub pre: PointRecord,
    /// Post-step point.
    pub post: PointRecord,
    /// Energy deposited during the step, in MeV.
    pub energy_deposit: f64,
    /// Current volume of the track.
    pub volume: Option<VolumeRecord>,
}

/// A track and its steps, in transport order.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackRecord {
    /// Particle species name.
    pub species: String,
    /// Track id within the event.
    pub track_id: TrackId,
    /// Parent track id.
    pub parent_id: TrackId,
    /// Steps in the order they were taken.
    pub steps: Vec<StepRecord>,
}

impl TrackRecord {
    /// Borrow step `index` (0-based) as a [`Step`] of `event_id`.
    ///
    /// Returns `None` past the end of the history.
    pub fn step(&self, event_id: EventId, index: usize) -> Option<Step<'_>> {
        let record = self.steps.get(index)?;
        let step_number = u32::try_from(index + 1).ok()?;
        Some(Step {
            event_id,
            track: TrackInfo {
                species: &self.species,
                track_id: self.track_id,
                parent_id: self.parent_id,
                step_number,
            },
            pre: record.pre.as_point(),
            post: record.post.as_point(),
            energy_deposit: record.energy_deposit,
            volume: record.volume.as_ref().map(|v| Volume {
                name: &v.name,
                copy_index: v.copy_index,
            }),
        })
    }

    /// Iterate the track's steps as borrowed [`Step`]s.
    pub fn iter_steps(&self, event_id: EventId) -> impl Iterator<Item = Step<'_>> + '_ {
        (0..self.steps.len()).filter_map(move |i| self.step(event_id, i))
    }
}

/// One event: a primary and every secondary it produced.
#[derive(Clone, Debug, PartialEq)]
pub struct EventRecord {
    /// Event id.
    pub event_id: EventId,
    /// Tracks in processing order.
    pub tracks: Vec<TrackRecord>,
}

impl EventRecord {
    /// Total number of recorded steps across all tracks.
    pub fn step_count(&self) -> usize {
        self.tracks.iter().map(|t| t.steps.len()).sum()
    }
}
