//! Step recording for regions of interest.
//!
//! Only steps taken inside an allow-listed volume are recorded. Each
//! recorded step becomes one fully-populated [`OutputRow`] tagged with
//! its region and, for instanced regions, the copy index of the
//! placement that was hit.
//!
//! # Architecture
//!
//! - [`RegionTable`] maps volume names to [`Region`]s (tag + instancing)
//! - [`StepRecorder`] extracts rows and appends them to an injected [`RowSink`]
//! - [`SharedTable`] is a cloneable in-memory table for several owners
//! - [`CsvTableWriter`] streams rows as CSV with the schema header
//!
//! [`OutputRow`]: lxe_core::OutputRow
//! [`RowSink`]: lxe_core::RowSink

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod csv;
pub mod recorder;
pub mod region;
pub mod sink;

pub use csv::{CsvTableWriter, StepCounter, STEP_COLUMN};
pub use recorder::{extract_row, RecordOutcome, StepRecorder};
pub use region::{
    Region, RegionKind, RegionTable, BULK_XENON_TAG, BULK_XENON_VOLUME, DEFAULT_TAG,
    SCINTILLATOR_TAG, SCINTILLATOR_VOLUME,
};
pub use sink::SharedTable;
