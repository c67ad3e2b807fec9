//! Recoil-species lookup table.

use smallvec::SmallVec;

/// Species marker for xenon recoils. Matches every isotope and charge
/// state (`"Xe131"`, `"Xe132[0.0]"`, ...).
pub const DEFAULT_RECOIL_MARKER: &str = "Xe";

/// Hadronic elastic scattering, the process that produces the recoils
/// worth following.
pub const DEFAULT_ELASTIC_PROCESS: &str = "hadElastic";

/// Number of steps a recoil-species track may take outside the elastic
/// exception before it is terminated.
///
/// Kept at 1 as recorded policy; it is not derived from the physics.
pub const TOLERATED_STEPS: u32 = 1;

/// Which species get overridden, and which process earns an exemption.
///
/// # Examples
///
/// ```
/// use lxe_tracking::RecoilPolicy;
///
/// let policy = RecoilPolicy::default().with_marker("Ar");
/// assert!(policy.matches_species("Xe129"));
/// assert!(policy.matches_species("Ar40"));
/// assert!(!policy.matches_species("neutron"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoilPolicy {
    markers: SmallVec<[String; 2]>,
    elastic_process: String,
}

impl Default for RecoilPolicy {
    fn default() -> Self {
        Self {
            markers: SmallVec::from_iter([DEFAULT_RECOIL_MARKER.to_string()]),
            elastic_process: DEFAULT_ELASTIC_PROCESS.to_string(),
        }
    }
}

impl RecoilPolicy {
    /// A policy with no species markers, so it matches nothing until
    /// [`with_marker`](Self::with_marker) is called.
    pub fn new(elastic_process: impl Into<String>) -> Self {
        Self {
            markers: SmallVec::new(),
            elastic_process: elastic_process.into(),
        }
    }

    /// Add a species marker. Empty and duplicate markers are ignored,
    /// since an empty marker would match every species.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        let marker = marker.into();
        if !marker.is_empty() && !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
        self
    }

    /// Configured species markers, in insertion order.
    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(String::as_str)
    }

    /// The process name that exempts a secondary from truncation.
    pub fn elastic_process(&self) -> &str {
        &self.elastic_process
    }

    /// Whether `species` contains any marker as a substring.
    pub fn matches_species(&self, species: &str) -> bool {
        self.markers.iter().any(|m| species.contains(m.as_str()))
    }

    /// Whether a track with this parent, created by this process, is an
    /// elastic-scattering secondary. An absent process never matches.
    pub fn is_elastic_recoil(&self, parent_is_track: bool, process: Option<&str>) -> bool {
        parent_is_track && process == Some(self.elastic_process.as_str())
    }
}
