//! Lattice-type labelling.
//!
//! Level 0 is labelled from the boundary configuration in a fixed order:
//! solid block, inlet, outlet, walls. Each refined grid is then labelled
//! from its parent, and the parent's covered cells are relabelled as
//! refined interior or transfer-to-finer so that every parent cell under
//! a child ends up either `Refined` or `TransferToFiner`.

use crate::grid::Grid;
use crate::subgrid::CoarseLimits;
use lbgrid_core::{Axis, ConfigError, LatticeType, RegionSpec, SolverConfig};
use lbgrid_space::{Cell, Field};
use std::ops::RangeInclusive;

/// Index-based access to a parent grid's labels during child labelling.
///
/// The child never holds a reference to its parent grid. It reads and
/// writes parent labels through this accessor, by parent-local cell.
pub struct ParentLabels<'a> {
    labels: &'a mut Field<LatticeType>,
}

impl<'a> ParentLabels<'a> {
    /// Wrap a parent's label field.
    pub fn new(labels: &'a mut Field<LatticeType>) -> Self {
        Self { labels }
    }

    /// Label of a parent cell.
    pub fn get(&self, cell: Cell) -> Option<LatticeType> {
        self.labels.get(cell, 0).copied()
    }

    /// Overwrite the label of a parent cell. Out-of-range cells are ignored.
    pub fn set(&mut self, cell: Cell, label: LatticeType) {
        if let Some(slot) = self.labels.get_mut(cell, 0) {
            *slot = label;
        }
    }
}

// ── Level 0 ────────────────────────────────────────────────────────

/// Apply solid, inlet, outlet and wall labels to a level-0 grid.
pub(crate) fn label_boundaries(grid: &mut Grid, config: &SolverConfig) -> Result<(), ConfigError> {
    let boundaries = &config.boundaries;
    let cells = config.domain.resolved_cells();

    place_solid(grid, config)?;

    let flow = boundaries.flow_axis;
    if boundaries.inlet {
        boundaries.check_inlet(&config.flow)?;
        label_face(grid, flow, 0, LatticeType::Inlet);
    }
    if boundaries.outlet {
        let last = cells[flow.index()].saturating_sub(1);
        label_face(grid, flow, last, LatticeType::Outlet);
    }
    for &axis in &boundaries.walls {
        if !grid.dims().resolves(axis) {
            continue;
        }
        let last = cells[axis.index()].saturating_sub(1);
        label_face(grid, axis, 0, LatticeType::Boundary);
        label_face(grid, axis, last, LatticeType::Boundary);
    }
    Ok(())
}

/// Label the whole plane at global index `global` along `axis`, at every
/// local node carrying that index. A rank whose axis is not split holds
/// the face twice: once owned and once as a wrapped halo node.
fn label_face(grid: &mut Grid, axis: Axis, global: usize, label: LatticeType) {
    let on_face: Vec<bool> = grid
        .axis(axis)
        .indices()
        .iter()
        .map(|&g| g == global)
        .collect();
    if !on_face.contains(&true) {
        return;
    }
    let extent = grid.extent();
    let labels = grid.labels_mut();
    for cell in extent.cells() {
        let coord = match axis {
            Axis::X => cell.i,
            Axis::Y => cell.j,
            Axis::Z => cell.k,
        };
        if on_face.get(coord).copied().unwrap_or(false) {
            labels[cell][0] = label;
        }
    }
}

// ── Solid block ────────────────────────────────────────────────────

/// Label the configured solid block as boundary, if this grid hosts it.
///
/// The block is checked against the host's global extent first: the
/// level-0 cell count, or twice the region span on refined levels, where
/// the outer transfer layers must also stay clear.
pub(crate) fn place_solid(grid: &mut Grid, config: &SolverConfig) -> Result<(), ConfigError> {
    let Some(block) = &config.boundaries.solid else {
        return Ok(());
    };
    if block.host != grid.key() {
        return Ok(());
    }
    let dims = grid.dims();
    let extent = config
        .regions
        .global_extent(block.host, config.domain.resolved_cells(), dims)
        .ok_or(ConfigError::UnknownSolidHost { host: block.host })?;
    block.check_placement(extent, dims)?;

    let range = |axis: Axis| -> RangeInclusive<usize> {
        let a = axis.index();
        if dims.resolves(axis) {
            block.min[a]..=block.max[a]
        } else {
            0..=0
        }
    };
    for i in range(Axis::X) {
        for j in range(Axis::Y) {
            for k in range(Axis::Z) {
                if let Some(cell) = grid.to_local([i, j, k]) {
                    grid.labels_mut()[cell][0] = LatticeType::Boundary;
                }
            }
        }
    }
    Ok(())
}

// ── Refinement ─────────────────────────────────────────────────────

/// Label a freshly built child grid from its parent and relabel the
/// covered part of the parent.
pub(crate) fn refine_labels(
    parent: &mut Grid,
    child: &mut Grid,
    spec: &RegionSpec,
    limits: CoarseLimits,
) {
    mark_parent_interface(parent, spec);
    let extent = child.extent();
    let mut parent_labels = ParentLabels::new(parent.labels_mut());
    inherit_from_parent(child.labels_mut(), extent.cells(), &mut parent_labels, |c| {
        limits.parent_cell(c)
    });
}

/// Relabel the parent cells under a region: fluid cells on the region's
/// outer shell become transfer-to-finer, every interior cell becomes
/// refined. Cells not held on this rank are left alone.
fn mark_parent_interface(parent: &mut Grid, spec: &RegionSpec) {
    let dims = parent.dims();
    let range = |axis: Axis| -> RangeInclusive<usize> {
        let a = axis.index();
        if dims.resolves(axis) {
            spec.start[a]..=spec.end[a]
        } else {
            0..=0
        }
    };
    for i in range(Axis::X) {
        for j in range(Axis::Y) {
            for k in range(Axis::Z) {
                let global = [i, j, k];
                let Some(cell) = parent.to_local(global) else {
                    continue;
                };
                let slot = &mut parent.labels_mut()[cell][0];
                if spec.on_shell(global, dims) {
                    if *slot == LatticeType::Fluid {
                        *slot = LatticeType::TransferToFiner;
                    }
                } else {
                    *slot = LatticeType::Refined;
                }
            }
        }
    }
}

/// Derive child labels from the parent cell above each child cell.
///
/// Transfer-to-finer parents give transfer-to-coarser children, refined
/// parents give fluid children, and any other parent label is copied. In
/// the copied case the child cell with odd `i` and `j` forces its parent
/// to transfer-to-finer, so later children of that parent, and the
/// solver, see the parent as an interface cell.
fn inherit_from_parent(
    child: &mut Field<LatticeType>,
    cells: impl Iterator<Item = Cell>,
    parent: &mut ParentLabels<'_>,
    parent_of: impl Fn(Cell) -> Cell,
) {
    for cell in cells {
        let p = parent_of(cell);
        let Some(above) = parent.get(p) else {
            continue;
        };
        let label = match above {
            LatticeType::TransferToFiner => LatticeType::TransferToCoarser,
            LatticeType::Refined => LatticeType::Fluid,
            other => {
                if cell.i % 2 != 0 && cell.j % 2 != 0 {
                    parent.set(p, LatticeType::TransferToFiner);
                }
                other
            }
        };
        child[cell][0] = label;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lbgrid_space::Extent;

    #[test]
    fn parent_accessor_ignores_out_of_range() {
        let mut f = Field::filled(Extent::new(2, 2, 1), 1, LatticeType::Fluid);
        let mut p = ParentLabels::new(&mut f);
        p.set(Cell::new(5, 0, 0), LatticeType::Boundary);
        p.set(Cell::new(1, 1, 0), LatticeType::Inlet);
        assert_eq!(p.get(Cell::new(1, 1, 0)), Some(LatticeType::Inlet));
        assert_eq!(p.get(Cell::new(2, 0, 0)), None);
    }

    #[test]
    fn inheritance_rules() {
        // Parent row: [TransferToFiner, Refined, Boundary], one cell deep.
        let mut parent = Field::filled(Extent::new(3, 1, 1), 1, LatticeType::Fluid);
        parent[Cell::new(0, 0, 0)][0] = LatticeType::TransferToFiner;
        parent[Cell::new(1, 0, 0)][0] = LatticeType::Refined;
        parent[Cell::new(2, 0, 0)][0] = LatticeType::Boundary;

        let extent = Extent::new(6, 2, 1);
        let mut child = Field::filled(extent, 1, LatticeType::Fluid);
        let mut access = ParentLabels::new(&mut parent);
        inherit_from_parent(&mut child, extent.cells(), &mut access, |c| {
            Cell::new(c.i / 2, 0, 0)
        });

        assert_eq!(child[Cell::new(0, 1, 0)][0], LatticeType::TransferToCoarser);
        assert_eq!(child[Cell::new(3, 0, 0)][0], LatticeType::Fluid);
        // First three children of the boundary parent copy its label; the
        // odd/odd child flips the parent before being labelled itself.
        assert_eq!(child[Cell::new(4, 0, 0)][0], LatticeType::Boundary);
        assert_eq!(child[Cell::new(4, 1, 0)][0], LatticeType::Boundary);
        assert_eq!(child[Cell::new(5, 0, 0)][0], LatticeType::Boundary);
        assert_eq!(child[Cell::new(5, 1, 0)][0], LatticeType::Boundary);
        assert_eq!(parent[Cell::new(2, 0, 0)][0], LatticeType::TransferToFiner);
    }
}
