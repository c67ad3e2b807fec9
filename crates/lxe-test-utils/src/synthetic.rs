//! Seeded synthetic event streams.
//!
//! Generates plausible-looking cascades: a primary neutron, then a mix
//! of gammas, electrons, and xenon/sodium recoils, each stepping through
//! a mix of recorded volumes (`Xecylinder`, `Scintor`) and unrecorded
//! ones (`World`, `Shield`). Same seed, same events.

use lxe_core::{
    CopyIndex, EventId, EventRecord, PointRecord, StepRecord, TrackId, TrackRecord, VolumeRecord,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SECONDARY_SPECIES: &[&str] = &[
    "gamma", "e-", "Xe129", "Xe131", "Xe132", "Xe136", "proton", "Na23", "I127",
];

const PROCESSES: &[&str] = &[
    "hadElastic",
    "Transportation",
    "compt",
    "phot",
    "eIoni",
    "ionIoni",
    "neutronInelastic",
];

/// Shape of a synthetic stream.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    pub seed: u64,
    pub events: usize,
    /// Upper bound on tracks per event (at least 1: the primary).
    pub max_tracks: usize,
    /// Upper bound on steps per track (at least 1).
    pub max_steps: usize,
    /// Number of scintillator cubes copy indices are drawn from.
    pub scintillator_copies: i32,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            events: 16,
            max_tracks: 8,
            max_steps: 6,
            scintillator_copies: 8,
        }
    }
}

/// Generate `config.events` events with ids `0..events`.
pub fn synthetic_events(config: &SyntheticConfig) -> Vec<EventRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    (0..config.events)
        .map(|i| synthetic_event(&mut rng, config, EventId(i as i32)))
        .collect()
}

fn synthetic_event(rng: &mut ChaCha8Rng, config: &SyntheticConfig, event_id: EventId) -> EventRecord {
    let track_count = rng.random_range(1..=config.max_tracks.max(1));
    let mut tracks = Vec::with_capacity(track_count);
    for t in 0..track_count {
        let track_id = TrackId(t as i32 + 1);
        let (species, parent_id) = if t == 0 {
            ("neutron".to_string(), TrackId::NO_PARENT)
        } else {
            let species = SECONDARY_SPECIES[rng.random_range(0..SECONDARY_SPECIES.len())];
            (species.to_string(), TrackId(rng.random_range(1..=t as i32)))
        };
        let step_count = rng.random_range(1..=config.max_steps.max(1));
        let steps = (0..step_count)
            .map(|_| synthetic_step(rng, config))
            .collect();
        tracks.push(TrackRecord {
            species,
            track_id,
            parent_id,
            steps,
        });
    }
    EventRecord { event_id, tracks }
}

fn synthetic_step(rng: &mut ChaCha8Rng, config: &SyntheticConfig) -> StepRecord {
    let pre_position = random_position(rng);
    let post_position = random_position(rng);
    let kinetic_energy = rng.random_range(0.0..14.0);
    let t0 = rng.random_range(0.0..100.0);
    StepRecord {
        pre: PointRecord {
            position: pre_position,
            kinetic_energy,
            global_time: t0,
            process: random_process(rng),
        },
        post: PointRecord {
            position: post_position,
            kinetic_energy: kinetic_energy * rng.random_range(0.0..1.0),
            global_time: t0 + rng.random_range(0.0..5.0),
            process: random_process(rng),
        },
        energy_deposit: kinetic_energy * rng.random_range(0.0..0.2),
        volume: Some(random_volume(rng, config.scintillator_copies)),
    }
}

fn random_position(rng: &mut ChaCha8Rng) -> [f64; 3] {
    [
        rng.random_range(-500.0..500.0),
        rng.random_range(-500.0..500.0),
        rng.random_range(-500.0..500.0),
    ]
}

fn random_process(rng: &mut ChaCha8Rng) -> Option<String> {
    if rng.random_bool(0.15) {
        None
    } else {
        Some(PROCESSES[rng.random_range(0..PROCESSES.len())].to_string())
    }
}

fn random_volume(rng: &mut ChaCha8Rng, copies: i32) -> VolumeRecord {
    match rng.random_range(0..4) {
        0 => VolumeRecord {
            name: "Xecylinder".into(),
            copy_index: CopyIndex(0),
        },
        1 => VolumeRecord {
            name: "Scintor".into(),
            copy_index: CopyIndex(rng.random_range(0..copies.max(1))),
        },
        2 => VolumeRecord {
            name: "Shield".into(),
            copy_index: CopyIndex(0),
        },
        _ => VolumeRecord {
            name: "World".into(),
            copy_index: CopyIndex(0),
        },
    }
}
