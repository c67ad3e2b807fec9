//! Unit conventions shared with the host toolkit.
//!
//! The host reports energies in MeV, lengths in mm, and times in ns.
//! Recorded energies are written in keV; positions and times are
//! written unchanged.

/// keV per MeV.
pub const KEV_PER_MEV: f64 = 1000.0;

/// Convert a host energy (MeV) to the recorded unit (keV).
#[inline]
pub fn mev_to_kev(mev: f64) -> f64 {
    KEV_PER_MEV * mev
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_mev_is_a_thousand_kev() {
        assert_eq!(mev_to_kev(1.0), 1000.0);
        assert_eq!(mev_to_kev(0.0), 0.0);
        assert_eq!(mev_to_kev(0.5), 500.0);
    }
}
