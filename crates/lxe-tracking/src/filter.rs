//! The per-step tracking decision.
//!
//! Decision table for a species matching the policy:
//!
//! | parent is a track | creator process | step ordinal | decision |
//! |-------------------|-----------------|--------------|----------|
//! | yes               | elastic         | any          | `ForceAlive` |
//! | otherwise         |                 | > 1          | `ForceTerminate` |
//! | otherwise         |                 | 1            | `NoChange` |
//!
//! Every other species gets `NoChange`.

use lxe_core::{Step, TrackControl, TrackInfo};

use crate::decision::TrackingDecision;
use crate::policy::{RecoilPolicy, TOLERATED_STEPS};

/// Pure decision function over a [`RecoilPolicy`].
///
/// # Examples
///
/// ```
/// use lxe_core::{TrackId, TrackInfo};
/// use lxe_tracking::{TrackingDecision, TrackingFilter};
///
/// let filter = TrackingFilter::default();
/// let recoil = TrackInfo {
///     species: "Xe132",
///     track_id: TrackId(8),
///     parent_id: TrackId(5),
///     step_number: 3,
/// };
/// assert_eq!(filter.decide(&recoil, Some("hadElastic")), TrackingDecision::ForceAlive);
/// assert_eq!(filter.decide(&recoil, None), TrackingDecision::ForceTerminate);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackingFilter {
    policy: RecoilPolicy,
}

impl TrackingFilter {
    /// Create a filter over `policy`.
    pub fn new(policy: RecoilPolicy) -> Self {
        Self { policy }
    }

    /// The policy this filter applies.
    pub fn policy(&self) -> &RecoilPolicy {
        &self.policy
    }

    /// Decide for a track given the process that defined the pre-step
    /// point (`None` when the point has no process).
    pub fn decide(&self, track: &TrackInfo<'_>, creator_process: Option<&str>) -> TrackingDecision {
        if !self.policy.matches_species(track.species) {
            return TrackingDecision::NoChange;
        }
        if self
            .policy
            .is_elastic_recoil(track.parent_id.is_track(), creator_process)
        {
            TrackingDecision::ForceAlive
        } else if track.step_number > TOLERATED_STEPS {
            TrackingDecision::ForceTerminate
        } else {
            TrackingDecision::NoChange
        }
    }

    /// Decide for a full step, reading the pre-step process.
    pub fn decide_step(&self, step: &Step<'_>) -> TrackingDecision {
        self.decide(&step.track, step.pre.process)
    }

    /// Decide and apply to the host track in one call.
    pub fn filter<T: TrackControl + ?Sized>(
        &self,
        step: &Step<'_>,
        track: &mut T,
    ) -> TrackingDecision {
        let decision = self.decide_step(step);
        decision.apply(track);
        decision
    }
}
