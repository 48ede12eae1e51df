//! Physical extents of the halo exchange layers of a partitioned grid.

use crate::axis::GridAxis;
use lbgrid_core::Axis;
use serde::{Deserialize, Serialize};

/// Sender and receiver layer bounds along one axis.
///
/// Each array holds `[low_lo, low_hi, high_lo, high_hi]`: the physical
/// interval of the layer at the low end of the axis, then at the high end.
/// The sender layers are the first and last owned nodes, the receiver
/// layers the halo nodes outside them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisLayers {
    /// Layers whose values are sent to the neighbouring ranks.
    pub sender: [f64; 4],
    /// Layers filled from the neighbouring ranks.
    pub recv: [f64; 4],
}

impl AxisLayers {
    /// Layers of a partitioned axis with spacing `dx`, or `None` when the
    /// axis has no halo nodes.
    pub fn from_axis(axis: &GridAxis, dx: f64) -> Option<Self> {
        if !axis.has_halo() || axis.len() < 3 {
            return None;
        }
        let p = axis.positions();
        let n = p.len();
        let around = |x: f64| [x - dx / 2.0, x + dx / 2.0];
        let [s0, s1] = around(p[1]);
        let [s2, s3] = around(p[n - 2]);
        let [r0, r1] = around(p[0]);
        let [r2, r3] = around(p[n - 1]);
        Some(Self {
            sender: [s0, s1, s2, s3],
            recv: [r0, r1, r2, r3],
        })
    }
}

/// Halo layers of a partitioned level-0 grid, one entry per resolved axis.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HaloLayers {
    /// Layers along x.
    pub x: Option<AxisLayers>,
    /// Layers along y.
    pub y: Option<AxisLayers>,
    /// Layers along z (`None` in 2-D).
    pub z: Option<AxisLayers>,
}

impl HaloLayers {
    /// Collect the layers of the three axes of a grid.
    pub fn from_axes(axes: &[GridAxis; 3], dx: f64) -> Self {
        Self {
            x: AxisLayers::from_axis(&axes[0], dx),
            y: AxisLayers::from_axis(&axes[1], dx),
            z: AxisLayers::from_axis(&axes[2], dx),
        }
    }

    /// Layers along `axis`.
    pub fn axis(&self, axis: Axis) -> Option<&AxisLayers> {
        match axis {
            Axis::X => self.x.as_ref(),
            Axis::Y => self.y.as_ref(),
            Axis::Z => self.z.as_ref(),
        }
    }
}
