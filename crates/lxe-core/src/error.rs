//! Error types for step processing.
//!
//! Organized by concern: [`SinkError`] for the output table and
//! [`StepError`] for the per-step pipeline. Missing optional data
//! (no process on a step point, no copy index) is never an error; it
//! is replaced by sentinels at extraction time.

use std::error::Error;
use std::fmt;
use std::io;

use crate::id::{EventId, TrackId};

/// Errors from appending rows to an output table.
#[derive(Debug)]
pub enum SinkError {
    /// An I/O error occurred while writing the table.
    Io(io::Error),
    /// The table no longer accepts rows (merger shut down or file closed).
    Closed,
    /// A thread panicked while holding the shared table lock.
    Poisoned,
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Closed => write!(f, "output table is closed"),
            Self::Poisoned => write!(f, "output table lock poisoned"),
        }
    }
}

impl Error for SinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Errors from processing a single step.
///
/// All variants are fatal for the run: the host must stop transporting
/// rather than continue with an incomplete table.
#[derive(Debug)]
pub enum StepError {
    /// The track had no current volume on a step that needs one.
    MissingVolume {
        /// Event of the offending step.
        event_id: EventId,
        /// Track of the offending step.
        track_id: TrackId,
        /// Step ordinal of the offending step.
        step_number: u32,
    },
    /// A step arrived for a track that was already forced-terminated.
    TrackTerminated {
        /// Event of the offending step.
        event_id: EventId,
        /// Track of the offending step.
        track_id: TrackId,
    },
    /// The output table rejected the row.
    Sink(SinkError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVolume {
                event_id,
                track_id,
                step_number,
            } => write!(
                f,
                "track {track_id} in event {event_id} has no current volume at step {step_number}"
            ),
            Self::TrackTerminated { event_id, track_id } => write!(
                f,
                "step received for terminated track {track_id} in event {event_id}"
            ),
            Self::Sink(e) => write!(f, "sink: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sink(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SinkError> for StepError {
    fn from(e: SinkError) -> Self {
        Self::Sink(e)
    }
}
