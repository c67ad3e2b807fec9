//! Benchmark profiles for the lxe stepping pipeline.
//!
//! - [`reference_profile`]: default regions and policy, fixed worker count
//! - [`reference_stream`]: 256 seeded events, up to 12 tracks of 10 steps
//! - [`stress_stream`]: 4096 seeded events with the same shape

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use lxe_core::EventRecord;
use lxe_engine::RunConfig;
use lxe_test_utils::{synthetic_events, SyntheticConfig};

/// Default run configuration with an explicit worker count.
pub fn reference_profile(workers: usize) -> RunConfig {
    RunConfig {
        worker_count: Some(workers),
        ..RunConfig::default()
    }
}

/// 256 events, seeded.
pub fn reference_stream(seed: u64) -> Vec<EventRecord> {
    stream(seed, 256)
}

/// 4096 events, seeded. Same per-event shape as [`reference_stream`].
pub fn stress_stream(seed: u64) -> Vec<EventRecord> {
    stream(seed, 4096)
}

fn stream(seed: u64, events: usize) -> Vec<EventRecord> {
    synthetic_events(&SyntheticConfig {
        seed,
        events,
        max_tracks: 12,
        max_steps: 10,
        scintillator_copies: 16,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_stream_is_deterministic() {
        assert_eq!(reference_stream(7), reference_stream(7));
        assert_eq!(reference_stream(7).len(), 256);
    }

    #[test]
    fn reference_profile_validates() {
        assert!(reference_profile(4).validate().is_ok());
    }
}
