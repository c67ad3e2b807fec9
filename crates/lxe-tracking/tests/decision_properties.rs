//! Property tests for the tracking decision table.

use lxe_core::TrackStatus;
use lxe_test_utils::{MockTrack, StepBuilder};
use lxe_tracking::{TrackingDecision, TrackingFilter};
use proptest::prelude::*;

fn arb_status() -> impl Strategy<Value = TrackStatus> {
    prop_oneof![
        Just(TrackStatus::Alive),
        Just(TrackStatus::ForcedAlive),
        Just(TrackStatus::ForcedTerminated),
    ]
}

fn arb_process() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("hadElastic".to_string())),
        Just(Some("Transportation".to_string())),
        "[a-zA-Z]{1,12}".prop_map(Some),
    ]
}

fn arb_recoil_species() -> impl Strategy<Value = String> {
    ("[A-Za-z]{0,3}", "[0-9]{0,3}").prop_map(|(prefix, mass)| format!("{prefix}Xe{mass}"))
}

fn arb_other_species() -> impl Strategy<Value = String> {
    "[a-z0-9+\\-]{1,10}".prop_filter("must not contain the marker", |s| !s.contains("Xe"))
}

fn step_for(species: &str, parent: i32, step_number: u32, process: &Option<String>) -> StepBuilder {
    let b = StepBuilder::new(species)
        .parent(parent)
        .step_number(step_number);
    match process {
        Some(p) => b.creator(p),
        None => b,
    }
}

fn is_elastic_exception(parent: i32, process: &Option<String>) -> bool {
    parent > 0 && process.as_deref() == Some("hadElastic")
}

proptest! {
    #[test]
    fn other_species_never_mutated(
        species in arb_other_species(),
        parent in -2i32..20,
        step_number in 1u32..100,
        process in arb_process(),
        prior in arb_status(),
    ) {
        let filter = TrackingFilter::default();
        let b = step_for(&species, parent, step_number, &process);
        let mut track = MockTrack::with_status(prior);
        let d = filter.filter(&b.build(), &mut track);
        prop_assert_eq!(d, TrackingDecision::NoChange);
        prop_assert!(track.writes.is_empty());
        prop_assert_eq!(track.status, prior);
    }

    #[test]
    fn elastic_secondaries_always_alive(
        species in arb_recoil_species(),
        parent in 1i32..1000,
        step_number in 1u32..100,
        prior in arb_status(),
    ) {
        let filter = TrackingFilter::default();
        let b = StepBuilder::new(species)
            .parent(parent)
            .step_number(step_number)
            .creator("hadElastic");
        let mut track = MockTrack::with_status(prior);
        filter.filter(&b.build(), &mut track);
        prop_assert_eq!(track.status, TrackStatus::ForcedAlive);
        prop_assert!(!track.status.is_terminated());
    }

    #[test]
    fn later_steps_without_exception_terminate(
        species in arb_recoil_species(),
        parent in -2i32..20,
        step_number in 2u32..100,
        process in arb_process(),
        prior in arb_status(),
    ) {
        prop_assume!(!is_elastic_exception(parent, &process));
        let filter = TrackingFilter::default();
        let b = step_for(&species, parent, step_number, &process);
        let mut track = MockTrack::with_status(prior);
        filter.filter(&b.build(), &mut track);
        prop_assert_eq!(track.status, TrackStatus::ForcedTerminated);
    }

    #[test]
    fn first_step_without_exception_unchanged(
        species in arb_recoil_species(),
        parent in -2i32..20,
        process in arb_process(),
        prior in arb_status(),
    ) {
        prop_assume!(!is_elastic_exception(parent, &process));
        let filter = TrackingFilter::default();
        let b = step_for(&species, parent, 1, &process);
        let mut track = MockTrack::with_status(prior);
        filter.filter(&b.build(), &mut track);
        prop_assert!(track.writes.is_empty());
        prop_assert_eq!(track.status, prior);
    }
}

#[test]
fn scenario_elastic_xenon_recoil() {
    let b = StepBuilder::new("Xe132")
        .parent(5)
        .step_number(3)
        .creator("hadElastic");
    let mut track = MockTrack::default();
    let d = TrackingFilter::default().filter(&b.build(), &mut track);
    assert_eq!(d, TrackingDecision::ForceAlive);
    assert_eq!(track.status, TrackStatus::ForcedAlive);
}

#[test]
fn scenario_primary_xenon_second_step() {
    let b = StepBuilder::new("Xe131").parent(0).step_number(2);
    let mut track = MockTrack::default();
    let d = TrackingFilter::default().filter(&b.build(), &mut track);
    assert_eq!(d, TrackingDecision::ForceTerminate);
    assert_eq!(track.writes, vec![TrackStatus::ForcedTerminated]);
}

#[test]
fn scenario_gamma_untouched() {
    let b = StepBuilder::new("gamma")
        .parent(2)
        .step_number(7)
        .creator("hadElastic");
    let mut track = MockTrack::default();
    let d = TrackingFilter::default().filter(&b.build(), &mut track);
    assert_eq!(d, TrackingDecision::NoChange);
    assert!(track.writes.is_empty());
}
