//! Construction of a refined grid from its already-built parent.

use crate::grid::Grid;
use crate::label;
use lbgrid_core::{Axis, ConfigError, RegionNode, RegionSpec, SolverConfig};
use lbgrid_space::{Cell, GridAxis};
use tracing::debug;

/// Inclusive block of parent cells covered by a child grid, in the
/// parent's *local* indices.
///
/// When a region is clipped by a rank boundary the limits stop at the
/// edge of the parent's local index range (halo node included), not at
/// the region's declared edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoarseLimits {
    /// First covered parent index per axis.
    pub lo: [usize; 3],
    /// Last covered parent index per axis.
    pub hi: [usize; 3],
}

impl CoarseLimits {
    /// Parent cell containing child cell `cell`. Each parent cell holds a
    /// 2x2(x2) block of child cells.
    pub fn parent_cell(&self, cell: Cell) -> Cell {
        Cell::new(
            self.lo[0] + cell.i / 2,
            self.lo[1] + cell.j / 2,
            self.lo[2] + cell.k / 2,
        )
    }

    /// Number of parent cells covered along `axis`.
    pub fn span(&self, axis: Axis) -> usize {
        let a = axis.index();
        self.hi[a] - self.lo[a] + 1
    }
}

/// Coverage of `spec` on one axis of the parent: `(lo, hi, first child
/// index)`, or `None` if the region misses this part of the parent.
fn clip_axis(parent: &GridAxis, start: usize, end: usize) -> Option<(usize, usize, usize)> {
    if !(start..=end).any(|g| parent.to_local(g).is_some()) {
        return None;
    }
    let ind = parent.indices();
    let n = ind.len();
    let (second, penultimate) = match n {
        0 => return None,
        1 => (ind[0] + 1, ind[0]),
        _ => (ind[1], ind[n - 2]),
    };

    let (lo, first_index) = if start + 1 < second {
        (0, (ind[0].saturating_sub(start)) * 2)
    } else {
        (start + 1 - second, 0)
    };
    let hi = if end > penultimate + 1 {
        n - 1
    } else {
        end + 1 - second
    };
    Some((lo, hi, first_index))
}

/// Build the geometry and labels of the grid created by `node`.
///
/// Relabels the covered part of `parent` as a side effect. Returns
/// `Ok(None)` when the region does not reach the part of the parent held
/// on this rank.
pub(crate) fn build_child(
    parent: &mut Grid,
    node: &RegionNode<'_>,
    config: &SolverConfig,
    directions: usize,
) -> Result<Option<Grid>, ConfigError> {
    let spec: &RegionSpec = node.spec;
    let dims = parent.dims();
    let dx = parent.dx() / 2.0;

    let child_axis = |axis: Axis| -> Option<(GridAxis, usize, usize)> {
        let parent_axis = parent.axis(axis);
        if !dims.resolves(axis) {
            let z = parent_axis.position(0).unwrap_or_default();
            return Some((GridAxis::degenerate(z), 0, 0));
        }
        let a = axis.index();
        let (lo, hi, first) = clip_axis(parent_axis, spec.start[a], spec.end[a])?;
        let anchor = parent_axis.position(lo)?;
        Some((GridAxis::refined(first, 2 * (hi - lo + 1), anchor, dx), lo, hi))
    };
    let (Some(x), Some(y), Some(z)) = (
        child_axis(Axis::X),
        child_axis(Axis::Y),
        child_axis(Axis::Z),
    ) else {
        debug!(key = %node.key, parent = %node.parent, "region not on this rank, skipped");
        return Ok(None);
    };
    let lo = [x.1, y.1, z.1];
    let hi = [x.2, y.2, z.2];
    let axes = [x.0, y.0, z.0];
    let limits = CoarseLimits { lo, hi };

    let mut child = Grid::new(
        node.key,
        Some(node.parent),
        dims,
        dx,
        axes,
        parent.relaxation().refine(),
        directions,
    )
    .with_coarse_limits(limits);

    label::refine_labels(parent, &mut child, spec, limits);
    label::place_solid(&mut child, config)?;

    let extent = child.extent();
    debug!(
        key = %node.key,
        parent = %node.parent,
        lo = ?limits.lo,
        hi = ?limits.hi,
        nx = extent.nx,
        ny = extent.ny,
        nz = extent.nz,
        omega = child.omega(),
        "built refined grid"
    );
    Ok(Some(child))
}
