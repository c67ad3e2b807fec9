//! Core types and traits for liquid-xenon detector step processing.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the per-step view the host transport toolkit hands us, the track
//! status model, the fixed 17-column output row, error types, and the
//! two host-facing capabilities: [`RowSink`] and [`TrackControl`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod history;
pub mod id;
pub mod row;
pub mod step;
pub mod traits;
pub mod units;

pub use error::{SinkError, StepError};
pub use history::{EventRecord, PointRecord, StepRecord, TrackRecord, VolumeRecord};
pub use id::{CopyIndex, EventId, TrackId};
pub use row::{Cell, Column, ColumnType, OutputRow, OUTPUT_SCHEMA, TABLE_NAME, TABLE_TITLE};
pub use step::{Step, StepPoint, TrackInfo, TrackStatus, Volume, UNKNOWN_PROCESS};
pub use traits::{RowSink, TrackControl};
