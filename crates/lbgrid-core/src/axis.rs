//! Cartesian axes and lattice dimensionality.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Cartesian axis of the lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    /// Streamwise axis (`i` index).
    X,
    /// Cross-stream axis (`j` index).
    Y,
    /// Spanwise axis (`k` index), degenerate in 2-D.
    Z,
}

impl Axis {
    /// All three axes in storage order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis in `[x, y, z]` arrays.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}

/// Number of spatial dimensions the lattice resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dimensionality {
    /// Square cells, single `k` layer.
    #[default]
    Two,
    /// Cubic cells.
    Three,
}

impl Dimensionality {
    /// Number of velocity components stored per cell.
    pub fn count(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Axes resolved by the lattice. The z axis is excluded in 2-D.
    pub fn axes(self) -> &'static [Axis] {
        match self {
            Self::Two => &Axis::ALL[..2],
            Self::Three => &Axis::ALL,
        }
    }

    /// Whether `axis` is resolved (not degenerate).
    pub fn resolves(self, axis: Axis) -> bool {
        axis != Axis::Z || self == Self::Three
    }

    /// Number of independent components of the symmetric `u_i u_j` tensor
    /// (3 in 2-D, 6 in 3-D).
    pub fn tensor_components(self) -> usize {
        3 * self.count() - 3
    }
}
