//! One level/region of the grid hierarchy.

use crate::profile::InletVelocity;
use crate::relax::Relaxation;
use crate::subgrid::CoarseLimits;
use lbgrid_core::{Axis, Dimensionality, GridKey, LatticeType, Level, RegionId};
use lbgrid_space::{Cell, Extent, Field, GridAxis, HaloLayers};

/// Macroscopic and population arrays of a grid.
///
/// Construction initialises these once; afterwards they belong to the
/// solver, which mutates them in place.
#[derive(Clone, Debug, PartialEq)]
pub struct GridFields {
    /// Velocity, one component per resolved axis.
    pub u: Field<f64>,
    /// Density.
    pub rho: Field<f64>,
    /// Cartesian body force, one component per resolved axis.
    pub force_xyz: Field<f64>,
    /// Body force projected on each lattice direction.
    pub force_i: Field<f64>,
    /// Time-averaged density.
    pub rho_timeav: Field<f64>,
    /// Time-averaged velocity.
    pub ui_timeav: Field<f64>,
    /// Time-averaged velocity products (`3 * dims - 3` components).
    pub uiuj_timeav: Field<f64>,
    /// Populations.
    pub f: Field<f64>,
    /// Equilibrium populations.
    pub feq: Field<f64>,
}

impl GridFields {
    fn zeroed(extent: Extent, dims: Dimensionality, directions: usize) -> Self {
        let d = dims.count();
        let zero = |components| Field::filled(extent, components, 0.0);
        Self {
            u: zero(d),
            rho: zero(1),
            force_xyz: zero(d),
            force_i: zero(directions),
            rho_timeav: zero(1),
            ui_timeav: zero(d),
            uiuj_timeav: zero(dims.tensor_components()),
            f: zero(directions),
            feq: zero(directions),
        }
    }
}

/// A structured grid at one refinement level.
///
/// Geometry (spacing, index and position sequences, parent coverage) and
/// the lattice-type labels are fixed once the hierarchy is built. The
/// [`GridFields`] are handed over to the solver.
#[derive(Clone, Debug)]
pub struct Grid {
    key: GridKey,
    parent: Option<GridKey>,
    dims: Dimensionality,
    dx: f64,
    axes: [GridAxis; 3],
    coarse_limits: Option<CoarseLimits>,
    labels: Field<LatticeType>,
    fields: GridFields,
    relaxation: Relaxation,
    inlet_velocity: Option<InletVelocity>,
    halo: Option<HaloLayers>,
}

impl Grid {
    /// A grid with every cell fluid and every field zeroed.
    pub(crate) fn new(
        key: GridKey,
        parent: Option<GridKey>,
        dims: Dimensionality,
        dx: f64,
        axes: [GridAxis; 3],
        relaxation: Relaxation,
        directions: usize,
    ) -> Self {
        let extent = Extent::new(axes[0].len(), axes[1].len(), axes[2].len());
        Self {
            key,
            parent,
            dims,
            dx,
            axes,
            coarse_limits: None,
            labels: Field::filled(extent, 1, LatticeType::Fluid),
            fields: GridFields::zeroed(extent, dims, directions),
            relaxation,
            inlet_velocity: None,
            halo: None,
        }
    }

    pub(crate) fn with_coarse_limits(mut self, limits: CoarseLimits) -> Self {
        self.coarse_limits = Some(limits);
        self
    }

    pub(crate) fn with_halo(mut self, halo: HaloLayers) -> Self {
        self.halo = Some(halo);
        self
    }

    // ── Identity ───────────────────────────────────────────────────

    /// Level and region of this grid.
    pub fn key(&self) -> GridKey {
        self.key
    }

    /// Refinement level (0 is coarsest).
    pub fn level(&self) -> Level {
        self.key.level
    }

    /// Region number among the grids of this level.
    pub fn region(&self) -> RegionId {
        self.key.region
    }

    /// Key of the grid this one refines, `None` on level 0.
    pub fn parent(&self) -> Option<GridKey> {
        self.parent
    }

    // ── Geometry ───────────────────────────────────────────────────

    /// Lattice dimensionality.
    pub fn dims(&self) -> Dimensionality {
        self.dims
    }

    /// Cell spacing, identical along every axis.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Physical time step. Equal to the spacing.
    pub fn dt(&self) -> f64 {
        self.dx
    }

    /// Index and position sequence along `axis`.
    pub fn axis(&self, axis: Axis) -> &GridAxis {
        &self.axes[axis.index()]
    }

    /// Index and position sequences along x, y and z.
    pub fn axes(&self) -> &[GridAxis; 3] {
        &self.axes
    }

    /// Local node counts, halo included.
    pub fn extent(&self) -> Extent {
        self.labels.extent()
    }

    /// Global index of the first local node along each axis.
    pub fn global_offset(&self) -> [usize; 3] {
        self.axes
            .each_ref()
            .map(|axis| axis.global(0).unwrap_or(0))
    }

    /// Map a global coordinate to a local cell, if present on this grid.
    pub fn to_local(&self, global: [usize; 3]) -> Option<Cell> {
        Some(Cell::new(
            self.axes[0].to_local(global[0])?,
            self.axes[1].to_local(global[1])?,
            self.axes[2].to_local(global[2])?,
        ))
    }

    /// Part of the parent grid covered by this one, in the parent's local
    /// indices. `None` on level 0.
    pub fn coarse_limits(&self) -> Option<&CoarseLimits> {
        self.coarse_limits.as_ref()
    }

    /// Halo exchange layers. Only a partitioned level-0 grid has them.
    pub fn halo(&self) -> Option<&HaloLayers> {
        self.halo.as_ref()
    }

    // ── Classification ─────────────────────────────────────────────

    /// Lattice type of every cell.
    pub fn labels(&self) -> &Field<LatticeType> {
        &self.labels
    }

    pub(crate) fn labels_mut(&mut self) -> &mut Field<LatticeType> {
        &mut self.labels
    }

    /// Lattice type of one cell.
    pub fn label(&self, cell: Cell) -> Option<LatticeType> {
        self.labels.get(cell, 0).copied()
    }

    /// Number of cells carrying `label`.
    pub fn count_label(&self, label: LatticeType) -> usize {
        self.labels.as_slice().iter().filter(|&&l| l == label).count()
    }

    // ── State ──────────────────────────────────────────────────────

    /// Macroscopic and population arrays.
    pub fn fields(&self) -> &GridFields {
        &self.fields
    }

    /// Mutable macroscopic and population arrays.
    pub fn fields_mut(&mut self) -> &mut GridFields {
        &mut self.fields
    }

    /// Relaxation frequencies.
    pub fn relaxation(&self) -> &Relaxation {
        &self.relaxation
    }

    /// Single-relaxation-time frequency.
    pub fn omega(&self) -> f64 {
        self.relaxation.omega
    }

    /// Inlet velocity per y node, when a profile is configured.
    pub fn inlet_velocity(&self) -> Option<&InletVelocity> {
        self.inlet_velocity.as_ref()
    }

    pub(crate) fn set_inlet_velocity(&mut self, inlet: InletVelocity) {
        self.inlet_velocity = Some(inlet);
    }
}
