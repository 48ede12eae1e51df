//! Node index and position sequences along one grid axis.

use std::ops::Range;

/// `n` evenly spaced values from `lo` to `hi` inclusive.
///
/// Returns `[lo]` for `n == 1` and an empty vector for `n == 0`.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n).map(|i| lo + i as f64 * step).collect()
        }
    }
}

/// Wrap a position into the periodic interval `[lo, lo + length)`.
fn wrap_position(p: f64, lo: f64, length: f64) -> f64 {
    lo + (p - lo).rem_euclid(length)
}

/// Global node indices and cell-centre positions along one axis of a grid.
///
/// `indices()[n]` and `positions()[n]` describe the same node. On a
/// partitioned level-0 grid the first and last entries are halo nodes
/// owned by the neighbouring rank, with periodic wraparound at the domain
/// edges.
///
/// # Examples
///
/// ```
/// use lbgrid_space::GridAxis;
///
/// let axis = GridAxis::whole(4, [0.0, 1.0], 0.25);
/// assert_eq!(axis.indices(), &[0, 1, 2, 3]);
/// assert_eq!(axis.positions(), &[0.125, 0.375, 0.625, 0.875]);
/// assert_eq!(axis.to_local(2), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GridAxis {
    indices: Vec<usize>,
    positions: Vec<f64>,
    halo: bool,
}

impl GridAxis {
    /// An unpartitioned axis covering `cells` nodes between `bounds`.
    pub fn whole(cells: usize, bounds: [f64; 2], dx: f64) -> Self {
        Self {
            indices: (0..cells).collect(),
            positions: linspace(bounds[0] + dx / 2.0, bounds[1] - dx / 2.0, cells),
            halo: false,
        }
    }

    /// A rank-local axis owning global nodes `owned` (end exclusive) whose
    /// cells span physical `[pos[0], pos[1]]`, extended by one halo node at
    /// each end.
    ///
    /// Halo indices and positions wrap periodically against the global
    /// axis: `global_cells` nodes spanning `global_bounds`.
    pub fn partitioned(
        owned: Range<usize>,
        pos: [f64; 2],
        global_cells: usize,
        global_bounds: [f64; 2],
        dx: f64,
    ) -> Self {
        let n = global_cells;
        let owned_len = owned.len();
        let length = global_bounds[1] - global_bounds[0];

        let mut indices = Vec::with_capacity(owned_len + 2);
        indices.push((owned.start + n - 1) % n);
        indices.extend(owned.clone());
        indices.push(owned.end % n);

        let interior = linspace(pos[0] + dx / 2.0, pos[1] - dx / 2.0, owned_len);
        let mut positions = Vec::with_capacity(owned_len + 2);
        let first = interior.first().copied().unwrap_or(pos[0] + dx / 2.0);
        let last = interior.last().copied().unwrap_or(pos[1] - dx / 2.0);
        positions.push(wrap_position(first - dx, global_bounds[0], length));
        positions.extend(interior);
        positions.push(wrap_position(last + dx, global_bounds[0], length));

        Self {
            indices,
            positions,
            halo: true,
        }
    }

    /// A refined axis of `len` nodes numbered from `first_index`, whose
    /// first node sits half a (fine) cell below `anchor`.
    ///
    /// `anchor` is the centre of the first covered parent cell, so each
    /// parent cell holds two child nodes at `anchor -/+ dx/2`.
    pub fn refined(first_index: usize, len: usize, anchor: f64, dx: f64) -> Self {
        let lo = anchor - dx / 2.0;
        let hi = lo + len.saturating_sub(1) as f64 * dx;
        Self {
            indices: (first_index..first_index + len).collect(),
            positions: linspace(lo, hi, len),
            halo: false,
        }
    }

    /// A single-node axis (the z axis of a 2-D lattice).
    pub fn degenerate(position: f64) -> Self {
        Self {
            indices: vec![0],
            positions: vec![position],
            halo: false,
        }
    }

    /// Number of nodes, including halo nodes.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the axis has no nodes.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Global node indices in local order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Cell-centre positions in local order.
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Whether the first and last nodes are halo copies.
    pub fn has_halo(&self) -> bool {
        self.halo
    }

    /// Whether `global` appears anywhere on this axis, halo included.
    pub fn contains(&self, global: usize) -> bool {
        self.indices.contains(&global)
    }

    /// Map a global index to a local one.
    ///
    /// Local numbering is anchored at the second node (`local 1 ==
    /// indices()[1]`), which makes the mapping correct both with and
    /// without a halo node in front. Returns `None` outside the axis.
    pub fn to_local(&self, global: usize) -> Option<usize> {
        let local = match self.indices.as_slice() {
            [] => return None,
            [only] => global.checked_sub(*only)?,
            [_, second, ..] => (global + 1).checked_sub(*second)?,
        };
        (local < self.len()).then_some(local)
    }

    /// Global index of the node at `local`.
    pub fn global(&self, local: usize) -> Option<usize> {
        self.indices.get(local).copied()
    }

    /// Position of the node at `local`.
    pub fn position(&self, local: usize) -> Option<f64> {
        self.positions.get(local).copied()
    }
}
