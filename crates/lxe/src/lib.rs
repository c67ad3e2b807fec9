//! lxe: per-step track filtering and step recording for a liquid-xenon
//! detector simulation.
//!
//! Top-level facade re-exporting the public API of the lxe sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use lxe::prelude::*;
//!
//! let config = RunConfig::from_toml_str(
//!     r#"
//!     model = "CsI"
//!     workers = 1
//!     "#,
//! )
//! .unwrap();
//! let mut action = SteppingAction::from_config(&config, Vec::<OutputRow>::new());
//!
//! let point = StepPoint {
//!     position: [0.0, 0.0, 0.0],
//!     kinetic_energy: 0.05,
//!     global_time: 1.0,
//!     process: Some("ionIoni"),
//! };
//! // Second step of a xenon recoil that was not produced elastically.
//! let step = Step {
//!     event_id: EventId(0),
//!     track: TrackInfo {
//!         species: "Xe131",
//!         track_id: TrackId(4),
//!         parent_id: TrackId(1),
//!         step_number: 2,
//!     },
//!     pre: point,
//!     post: point,
//!     energy_deposit: 0.5,
//!     volume: Some(Volume::single("Xecylinder")),
//! };
//! let mut status = TrackStatus::Alive;
//! action.on_step(&step, &mut status).unwrap();
//!
//! assert_eq!(status, TrackStatus::ForcedTerminated);
//! let rows = action.sink();
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].tag, "Xe");
//! assert_eq!(rows[0].energy_deposit_kev, 500.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `lxe-core` | IDs, step views, output rows, sink and track traits |
//! | [`tracking`] | `lxe-tracking` | Recoil policy and the per-step tracking filter |
//! | [`record`] | `lxe-record` | Region table, step recorder, CSV and shared sinks |
//! | [`engine`] | `lxe-engine` | Stepping action, run configuration, run lifecycle |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`lxe-core`).
pub use lxe_core as types;

/// Tracking filter and recoil policy (`lxe-tracking`).
///
/// [`tracking::TrackingFilter`] decides, per step, whether a heavy-ion
/// recoil is forced alive or killed.
pub use lxe_tracking as tracking;

/// Region-filtered recording (`lxe-record`).
///
/// [`record::StepRecorder`] turns steps inside listed volumes into rows;
/// [`record::CsvTableWriter`] and [`record::SharedTable`] receive them.
pub use lxe_record as record;

/// Stepping action and run lifecycle (`lxe-engine`).
pub use lxe_engine as engine;

/// Common imports for typical lxe usage.
///
/// ```rust
/// use lxe::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use lxe_core::{
        CopyIndex, EventId, EventRecord, OutputRow, RowSink, Step, StepPoint, TrackControl,
        TrackId, TrackInfo, TrackStatus, Volume,
    };

    // Errors
    pub use lxe_core::{SinkError, StepError};

    // Tracking
    pub use lxe_tracking::{RecoilPolicy, TrackingDecision, TrackingFilter};

    // Recording
    pub use lxe_record::{CsvTableWriter, RecordOutcome, RegionKind, RegionTable, StepRecorder};

    // Engine
    pub use lxe_engine::{
        ConfigError, Run, RunConfig, RunError, RunSummary, ScintillatorModel, SteppingAction,
    };
}
