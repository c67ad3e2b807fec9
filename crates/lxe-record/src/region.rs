//! Volume-name lookup table for recorded regions.

use indexmap::IndexMap;
use lxe_core::{CopyIndex, Volume};

/// Physical volume name of the liquid-xenon target.
pub const BULK_XENON_VOLUME: &str = "Xecylinder";

/// Physical volume name shared by every scintillator cube placement.
pub const SCINTILLATOR_VOLUME: &str = "Scintor";

/// Tag written for rows from [`BULK_XENON_VOLUME`].
pub const BULK_XENON_TAG: &str = "Xe";

/// Tag written for rows from [`SCINTILLATOR_VOLUME`].
pub const SCINTILLATOR_TAG: &str = "scintor";

/// Tag for regions allow-listed without an explicit tag.
pub const DEFAULT_TAG: &str = "default";

/// Whether a region has several physical placements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionKind {
    /// One placement; rows carry [`CopyIndex::NONE`].
    Bulk,
    /// Repeated placements; rows carry the placement's copy index.
    Instanced,
}

/// A recorded region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    /// Tag written into each row's `tag` column.
    pub tag: String,
    /// Instancing.
    pub kind: RegionKind,
}

impl Region {
    /// Copy index to record for a step in `volume`.
    pub fn copy_index(&self, volume: &Volume<'_>) -> CopyIndex {
        match self.kind {
            RegionKind::Bulk => CopyIndex::NONE,
            RegionKind::Instanced => volume.copy_index,
        }
    }
}

/// Ordered allow-list of recorded volumes, keyed by exact name.
///
/// # Examples
///
/// ```
/// use lxe_record::{RegionKind, RegionTable};
///
/// let mut table = RegionTable::default();
/// assert_eq!(table.lookup("Xecylinder").unwrap().tag, "Xe");
/// assert!(table.lookup("xecylinder").is_none());
///
/// table.allow("Veto", RegionKind::Bulk);
/// assert_eq!(table.lookup("Veto").unwrap().tag, "default");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionTable {
    regions: IndexMap<String, Region>,
}

impl Default for RegionTable {
    /// The liquid-xenon target and the scintillator cubes.
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert(BULK_XENON_VOLUME, BULK_XENON_TAG, RegionKind::Bulk);
        table.insert(SCINTILLATOR_VOLUME, SCINTILLATOR_TAG, RegionKind::Instanced);
        table
    }
}

impl RegionTable {
    /// A table that records nothing.
    pub fn empty() -> Self {
        Self {
            regions: IndexMap::new(),
        }
    }

    /// Add or replace a region. Returns the region previously stored
    /// under `volume`, if any.
    pub fn insert(
        &mut self,
        volume: impl Into<String>,
        tag: impl Into<String>,
        kind: RegionKind,
    ) -> Option<Region> {
        self.regions.insert(
            volume.into(),
            Region {
                tag: tag.into(),
                kind,
            },
        )
    }

    /// Add a region tagged [`DEFAULT_TAG`].
    pub fn allow(&mut self, volume: impl Into<String>, kind: RegionKind) -> Option<Region> {
        self.insert(volume, DEFAULT_TAG, kind)
    }

    /// The region recorded for `volume`, if it is allow-listed.
    pub fn lookup(&self, volume: &str) -> Option<&Region> {
        self.regions.get(volume)
    }

    /// Number of allow-listed volumes.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether nothing is allow-listed.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// `(volume, region)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Region)> {
        self.regions.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_two_regions_in_order() {
        let t = RegionTable::default();
        let names: Vec<&str> = t.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Xecylinder", "Scintor"]);
        assert_eq!(t.lookup("Scintor").unwrap().tag, "scintor");
        assert_eq!(t.lookup("Scintor").unwrap().kind, RegionKind::Instanced);
    }

    #[test]
    fn lookup_is_exact() {
        let t = RegionTable::default();
        for name in ["Xe", "Scintor_1", "scintor", "LogicScintor", "World", ""] {
            assert!(t.lookup(name).is_none(), "{name}");
        }
    }

    #[test]
    fn bulk_region_ignores_copy_number() {
        let t = RegionTable::default();
        let xe = t.lookup("Xecylinder").unwrap();
        assert_eq!(xe.copy_index(&Volume::instance("Xecylinder", 3)), CopyIndex::NONE);
        let sc = t.lookup("Scintor").unwrap();
        assert_eq!(sc.copy_index(&Volume::instance("Scintor", 3)), CopyIndex(3));
    }

    #[test]
    fn insert_replaces_and_returns_previous() {
        let mut t = RegionTable::default();
        let old = t.insert("Xecylinder", "LXe", RegionKind::Bulk).unwrap();
        assert_eq!(old.tag, "Xe");
        assert_eq!(t.lookup("Xecylinder").unwrap().tag, "LXe");
        assert_eq!(t.len(), 2);
        assert!(RegionTable::empty().is_empty());
    }
}
