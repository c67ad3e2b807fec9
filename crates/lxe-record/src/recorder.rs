//! The per-step recorder.

use lxe_core::units::mev_to_kev;
use lxe_core::{OutputRow, RowSink, Step, StepError, Volume};

use crate::region::{Region, RegionTable};

/// Result of offering a step to the recorder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    /// One row was appended.
    Recorded,
    /// The step's volume is not allow-listed; nothing happened.
    Skipped,
}

/// Records steps that occur inside allow-listed regions.
///
/// The sink is injected at construction and is the only place rows go.
///
/// # Examples
///
/// ```
/// use lxe_core::{OutputRow, EventId, Step, StepPoint, TrackId, TrackInfo, Volume};
/// use lxe_record::{RecordOutcome, RegionTable, StepRecorder};
///
/// let point = StepPoint { position: [0.0; 3], kinetic_energy: 0.5, global_time: 1.0, process: None };
/// let step = Step {
///     event_id: EventId(0),
///     track: TrackInfo { species: "gamma", track_id: TrackId(2), parent_id: TrackId(1), step_number: 1 },
///     pre: point,
///     post: point,
///     energy_deposit: 0.1,
///     volume: Some(Volume::single("Xecylinder")),
/// };
///
/// let mut recorder = StepRecorder::new(RegionTable::default(), Vec::<OutputRow>::new());
/// assert_eq!(recorder.record(&step).unwrap(), RecordOutcome::Recorded);
/// let rows = recorder.into_sink();
/// assert_eq!(rows[0].tag, "Xe");
/// assert_eq!(rows[0].energy_kev, 500.0);
/// ```
#[derive(Debug)]
pub struct StepRecorder<S> {
    regions: RegionTable,
    sink: S,
    rows_recorded: u64,
}

impl<S: RowSink> StepRecorder<S> {
    /// Create a recorder over `regions`, appending to `sink`.
    pub fn new(regions: RegionTable, sink: S) -> Self {
        Self {
            regions,
            sink,
            rows_recorded: 0,
        }
    }

    /// Offer one step.
    ///
    /// Fails with [`StepError::MissingVolume`] if the step has no current
    /// volume, and with [`StepError::Sink`] if the sink rejects the row.
    pub fn record(&mut self, step: &Step<'_>) -> Result<RecordOutcome, StepError> {
        let volume = step.volume.ok_or(StepError::MissingVolume {
            event_id: step.event_id,
            track_id: step.track.track_id,
            step_number: step.track.step_number,
        })?;
        let Some(region) = self.regions.lookup(volume.name) else {
            return Ok(RecordOutcome::Skipped);
        };
        let row = extract_row(step, region, &volume);
        self.sink.append_row(row)?;
        self.rows_recorded += 1;
        Ok(RecordOutcome::Recorded)
    }

    /// Flush the sink.
    pub fn flush(&mut self) -> Result<(), StepError> {
        self.sink.flush()?;
        Ok(())
    }

    /// Rows appended so far by this recorder.
    pub fn rows_recorded(&self) -> u64 {
        self.rows_recorded
    }

    /// The region table.
    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    /// The sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the recorder and return the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Build the row for a step known to be inside `region`.
pub fn extract_row(step: &Step<'_>, region: &Region, volume: &Volume<'_>) -> OutputRow {
    OutputRow {
        energy_kev: mev_to_kev(step.pre.kinetic_energy),
        pre_position: step.pre.position,
        post_position: step.post.position,
        species: step.track.species.to_string(),
        event_id: step.event_id,
        track_id: step.track.track_id,
        parent_id: step.track.parent_id,
        energy_deposit_kev: mev_to_kev(step.energy_deposit),
        creator_process: step.pre.process_name().to_string(),
        end_process: step.post.process_name().to_string(),
        tag: region.tag.clone(),
        copy_index: region.copy_index(volume),
        time: step.post.global_time,
    }
}
