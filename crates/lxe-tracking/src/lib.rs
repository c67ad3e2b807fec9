//! Tracking-control filter for recoil species.
//!
//! The transport engine decides on its own whether to keep stepping a
//! track. For the recoil species of interest that default is
//! overridden: secondaries produced by elastic scattering are kept
//! alive, and any other multi-step history is cut after its first step.
//!
//! # Architecture
//!
//! - [`RecoilPolicy`] is the lookup table (species markers, elastic process)
//! - [`TrackingFilter::decide`] is a pure function of the step's track
//!   identity and creator process
//! - [`TrackingDecision::apply`] is the only code that mutates a track

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod decision;
pub mod filter;
pub mod policy;

pub use decision::TrackingDecision;
pub use filter::TrackingFilter;
pub use policy::{RecoilPolicy, DEFAULT_ELASTIC_PROCESS, DEFAULT_RECOIL_MARKER, TOLERATED_STEPS};
