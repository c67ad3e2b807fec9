//! Stepping action and run lifecycle for the liquid-xenon detector.
//!
//! Ties the tracking filter and the step recorder into the one callback
//! the host transport toolkit invokes per step ([`SteppingAction`]), and
//! models the surrounding run: configuration ([`RunConfig`]), worker
//! threads each owning their own stepping action, and a single merger
//! appending every worker's rows to the output table ([`Run`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod merge;
pub mod metrics;
pub mod run;
pub mod stepping;

pub use config::{ConfigError, RunConfig, ScintillatorModel};
pub use merge::BatchSink;
pub use metrics::StepMetrics;
pub use run::{csv_sink, transport_event, Run, RunError, RunSummary};
pub use stepping::{StepOutcome, SteppingAction};
