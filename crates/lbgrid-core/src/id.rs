//! Strongly-typed identifiers for grids in a refinement hierarchy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Refinement level of a grid. Level 0 is the coarsest grid.
///
/// Each level halves the cell spacing of the level above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Level(pub u32);

impl Level {
    /// The coarsest level.
    pub const ROOT: Level = Level(0);

    /// The level directly below this one.
    pub fn finer(self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns `true` for level 0.
    pub fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Level {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Index of a refinement region among its siblings on one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub u32);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RegionId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies one grid in the hierarchy: a `(level, region)` pair.
///
/// The level-0 grid is always `GridKey::ROOT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridKey {
    /// Refinement level.
    pub level: Level,
    /// Region number among the grids on `level`.
    pub region: RegionId,
}

impl GridKey {
    /// The level-0 grid.
    pub const ROOT: GridKey = GridKey {
        level: Level(0),
        region: RegionId(0),
    };

    /// Construct a key from raw level and region numbers.
    pub fn new(level: u32, region: u32) -> Self {
        Self {
            level: Level(level),
            region: RegionId(region),
        }
    }
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}R{}", self.level, self.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_key_display() {
        assert_eq!(GridKey::new(2, 1).to_string(), "L2R1");
        assert_eq!(GridKey::ROOT.to_string(), "L0R0");
    }

    #[test]
    fn finer_level_increments() {
        assert_eq!(Level::ROOT.finer(), Level(1));
        assert!(Level::ROOT.is_root());
        assert!(!Level(3).is_root());
    }
}
