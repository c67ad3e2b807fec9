//! Host-facing capabilities.
//!
//! The host toolkit owns the output table and the track objects. The
//! step-processing code only ever touches them through these two traits,
//! which keeps the decision logic testable without a transport engine.

use crate::error::SinkError;
use crate::row::OutputRow;
use crate::step::TrackStatus;

/// An append-only output table.
///
/// Implementations must preserve append order. A sink owned by one
/// worker is never called concurrently; sharing across workers is the
/// implementation's concern (see the merging sinks in `lxe-record` and
/// `lxe-engine`).
pub trait RowSink {
    /// Append one fully-populated row.
    fn append_row(&mut self, row: OutputRow) -> Result<(), SinkError>;

    /// Push buffered rows to their final destination.
    ///
    /// Default: no buffering, nothing to do.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: RowSink + ?Sized> RowSink for &mut S {
    fn append_row(&mut self, row: OutputRow) -> Result<(), SinkError> {
        (**self).append_row(row)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

impl<S: RowSink + ?Sized> RowSink for Box<S> {
    fn append_row(&mut self, row: OutputRow) -> Result<(), SinkError> {
        (**self).append_row(row)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

/// A plain buffer: single owner, append order preserved.
impl RowSink for Vec<OutputRow> {
    fn append_row(&mut self, row: OutputRow) -> Result<(), SinkError> {
        self.push(row);
        Ok(())
    }
}

/// Mutable access to a host track's continuation status.
pub trait TrackControl {
    /// Current status.
    fn status(&self) -> TrackStatus;

    /// Overwrite the status.
    fn set_status(&mut self, status: TrackStatus);
}

/// A bare status cell is its own track handle.
impl TrackControl for TrackStatus {
    fn status(&self) -> TrackStatus {
        *self
    }

    fn set_status(&mut self, status: TrackStatus) {
        *self = status;
    }
}
