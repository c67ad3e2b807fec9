//! Strongly-typed identifiers for events, tracks, and volume copies.

use std::fmt;

/// Identifies one event (a primary particle and its full cascade).
///
/// Assigned by the host's run manager, monotonically per run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub i32);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for EventId {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// Identifies a track within its owning event.
///
/// Also used for parent ids, where `TrackId(0)` means "no parent"
/// (the track is a primary).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub i32);

impl TrackId {
    /// The parent id carried by primary tracks.
    pub const NO_PARENT: TrackId = TrackId(0);

    /// Whether this id, read as a parent id, names a real track.
    ///
    /// True exactly when the id is strictly positive.
    pub fn is_track(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for TrackId {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// Which physical instance of a repeated volume a step occupied.
///
/// [`CopyIndex::NONE`] (`-1`) is written for regions that are not
/// instanced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CopyIndex(pub i32);

impl CopyIndex {
    /// Sentinel for "not an instanced region".
    pub const NONE: CopyIndex = CopyIndex(-1);
}

impl Default for CopyIndex {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for CopyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for CopyIndex {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_zero_is_not_a_track() {
        assert!(!TrackId::NO_PARENT.is_track());
        assert!(!TrackId(-3).is_track());
        assert!(TrackId(1).is_track());
    }

    #[test]
    fn copy_index_defaults_to_sentinel() {
        assert_eq!(CopyIndex::default(), CopyIndex(-1));
        assert_eq!(CopyIndex::NONE.to_string(), "-1");
    }
}
