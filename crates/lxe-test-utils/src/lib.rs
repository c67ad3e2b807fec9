//! Test utilities and mock types for lxe development.
//!
//! Provides a [`StepBuilder`] for one-off steps, a [`MockTrack`] that
//! records status writes, a [`CollectingSink`] that can be told to fail,
//! and a seeded synthetic event generator in [`synthetic`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod synthetic;

pub use synthetic::{synthetic_events, SyntheticConfig};

use lxe_core::{
    CopyIndex, EventId, OutputRow, PointRecord, RowSink, SinkError, Step, TrackControl,
    TrackId, TrackInfo, TrackStatus, Volume, VolumeRecord,
};

/// Builder for a single [`Step`] with owned backing strings.
///
/// Defaults: event 0, a primary `"neutron"` track 1 on its first step,
/// no processes, no volume.
#[derive(Clone, Debug)]
pub struct StepBuilder {
    pub event_id: EventId,
    pub species: String,
    pub track_id: TrackId,
    pub parent_id: TrackId,
    pub step_number: u32,
    pub pre: PointRecord,
    pub post: PointRecord,
    pub energy_deposit: f64,
    pub volume: Option<VolumeRecord>,
}

impl StepBuilder {
    pub fn new(species: impl Into<String>) -> Self {
        Self {
            event_id: EventId(0),
            species: species.into(),
            track_id: TrackId(1),
            parent_id: TrackId::NO_PARENT,
            step_number: 1,
            pre: PointRecord::default(),
            post: PointRecord::default(),
            energy_deposit: 0.0,
            volume: None,
        }
    }

    pub fn event(mut self, id: i32) -> Self {
        self.event_id = EventId(id);
        self
    }

    pub fn track(mut self, id: i32) -> Self {
        self.track_id = TrackId(id);
        self
    }

    pub fn parent(mut self, id: i32) -> Self {
        self.parent_id = TrackId(id);
        self
    }

    pub fn step_number(mut self, n: u32) -> Self {
        self.step_number = n;
        self
    }

    pub fn creator(mut self, process: &str) -> Self {
        self.pre.process = Some(process.to_string());
        self
    }

    pub fn ender(mut self, process: &str) -> Self {
        self.post.process = Some(process.to_string());
        self
    }

    /// Pre-step kinetic energy in MeV.
    pub fn energy(mut self, mev: f64) -> Self {
        self.pre.kinetic_energy = mev;
        self
    }

    /// Energy deposit in MeV.
    pub fn deposit(mut self, mev: f64) -> Self {
        self.energy_deposit = mev;
        self
    }

    pub fn positions(mut self, pre: [f64; 3], post: [f64; 3]) -> Self {
        self.pre.position = pre;
        self.post.position = post;
        self
    }

    pub fn time(mut self, ns: f64) -> Self {
        self.post.global_time = ns;
        self
    }

    pub fn in_volume(mut self, name: &str) -> Self {
        self.volume = Some(VolumeRecord {
            name: name.to_string(),
            copy_index: CopyIndex::NONE,
        });
        self
    }

    pub fn in_copy(mut self, name: &str, copy: i32) -> Self {
        self.volume = Some(VolumeRecord {
            name: name.to_string(),
            copy_index: CopyIndex(copy),
        });
        self
    }

    pub fn build(&self) -> Step<'_> {
        Step {
            event_id: self.event_id,
            track: TrackInfo {
                species: &self.species,
                track_id: self.track_id,
                parent_id: self.parent_id,
                step_number: self.step_number,
            },
            pre: self.pre.as_point(),
            post: self.post.as_point(),
            energy_deposit: self.energy_deposit,
            volume: self.volume.as_ref().map(|v| Volume {
                name: &v.name,
                copy_index: v.copy_index,
            }),
        }
    }
}

/// A host track stand-in that remembers every status write.
#[derive(Clone, Debug, Default)]
pub struct MockTrack {
    pub status: TrackStatus,
    pub writes: Vec<TrackStatus>,
}

impl MockTrack {
    pub fn with_status(status: TrackStatus) -> Self {
        Self {
            status,
            writes: Vec::new(),
        }
    }
}

impl TrackControl for MockTrack {
    fn status(&self) -> TrackStatus {
        self.status
    }

    fn set_status(&mut self, status: TrackStatus) {
        self.status = status;
        self.writes.push(status);
    }
}

/// Sink that collects rows and can be armed to fail after N appends.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub rows: Vec<OutputRow>,
    pub fail_after: Option<usize>,
    pub flushes: usize,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::default()
        }
    }
}

impl RowSink for CollectingSink {
    fn append_row(&mut self, row: OutputRow) -> Result<(), SinkError> {
        if self.fail_after.is_some_and(|n| self.rows.len() >= n) {
            return Err(SinkError::Closed);
        }
        self.rows.push(row);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.flushes += 1;
        Ok(())
    }
}
