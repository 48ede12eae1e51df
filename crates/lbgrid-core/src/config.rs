//! Immutable solver configuration consumed by grid construction.
//!
//! [`SolverConfig`] replaces process-wide constants: domain bounds,
//! refinement regions, boundary toggles and flow parameters are passed
//! explicitly so that building a hierarchy is a pure function of its
//! inputs. [`validate()`](SolverConfig::validate) checks every structural
//! invariant that does not depend on the lattice model.

use crate::axis::{Axis, Dimensionality};
use crate::error::ConfigError;
use crate::id::GridKey;
use crate::region::RegionTree;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::path::PathBuf;

/// Relative tolerance used when comparing per-axis cell spacings.
pub const SPACING_TOLERANCE: f64 = 1e-12;

/// Width, in index layers, of the transfer band at the edge of a refined grid.
pub const TRANSFER_LAYER_DEPTH: usize = 2;

// ── DomainConfig ───────────────────────────────────────────────────

/// Physical extent and level-0 resolution of the simulation domain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainConfig {
    /// 2-D or 3-D lattice.
    pub dims: Dimensionality,
    /// Physical `[lo, hi]` bounds per axis, ordered `[x, y, z]`.
    pub bounds: [[f64; 2]; 3],
    /// Level-0 cell counts per axis (`N`, `M`, `K`). `K` is 1 in 2-D.
    pub cells: [usize; 3],
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            dims: Dimensionality::Two,
            bounds: [[0.0, 1.0], [0.0, 1.0], [0.0, 1.0]],
            cells: [32, 32, 1],
        }
    }
}

impl DomainConfig {
    /// A 2-D domain `[0, lx] x [0, ly]` with `n x m` cells.
    pub fn new_2d(lx: f64, ly: f64, n: usize, m: usize) -> Self {
        Self {
            dims: Dimensionality::Two,
            bounds: [[0.0, lx], [0.0, ly], [0.0, 1.0]],
            cells: [n, m, 1],
        }
    }

    /// A 3-D domain `[0, lx] x [0, ly] x [0, lz]` with `n x m x k` cells.
    pub fn new_3d(lx: f64, ly: f64, lz: f64, n: usize, m: usize, k: usize) -> Self {
        Self {
            dims: Dimensionality::Three,
            bounds: [[0.0, lx], [0.0, ly], [0.0, lz]],
            cells: [n, m, k],
        }
    }

    /// Physical length of the domain along `axis`.
    pub fn extent(&self, axis: Axis) -> f64 {
        let [lo, hi] = self.bounds[axis.index()];
        hi - lo
    }

    /// Level-0 cell count along `axis`.
    pub fn cell_count(&self, axis: Axis) -> usize {
        self.cells[axis.index()]
    }

    /// Level-0 cell counts with the z axis forced to one layer in 2-D.
    pub fn resolved_cells(&self) -> [usize; 3] {
        match self.dims {
            Dimensionality::Two => [self.cells[0], self.cells[1], 1],
            Dimensionality::Three => self.cells,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for &axis in self.dims.axes() {
            let extent = self.extent(axis);
            let cells = self.cell_count(axis);
            if cells == 0 || !extent.is_finite() || extent <= 0.0 {
                return Err(ConfigError::DegenerateDomain {
                    axis,
                    extent,
                    cells,
                });
            }
        }
        Ok(())
    }
}

// ── BoundaryConfig ─────────────────────────────────────────────────

/// A rectangular solid object expressed in the global index space of the
/// grid that hosts it. Bounds are inclusive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolidBlock {
    /// Grid on which the block is placed.
    pub host: GridKey,
    /// Lowest covered global index per axis.
    pub min: [usize; 3],
    /// Highest covered global index per axis.
    pub max: [usize; 3],
}

impl SolidBlock {
    /// Check that the block fits on a host grid of `extent` global nodes.
    ///
    /// `min` may not exceed `max` on any resolved axis.
    /// On level 0 the block only has to lie inside the grid. On refined
    /// levels it must also stay clear of the outer
    /// [`TRANSFER_LAYER_DEPTH`] index layers.
    pub fn check_placement(&self, extent: [usize; 3], dims: Dimensionality) -> Result<(), ConfigError> {
        let root = self.host.level.is_root();
        for &axis in dims.axes() {
            let a = axis.index();
            let (lo, hi, n) = (self.min[a], self.max[a], extent[a]);
            if lo > hi {
                return Err(ConfigError::InvertedSolidBlock {
                    host: self.host,
                    axis,
                    min: lo,
                    max: hi,
                });
            }
            if root {
                if hi > n.saturating_sub(1) {
                    return Err(ConfigError::SolidOutsideGrid { host: self.host });
                }
            } else if hi + TRANSFER_LAYER_DEPTH >= n || lo < TRANSFER_LAYER_DEPTH {
                return Err(ConfigError::SolidOnTransferLayer { host: self.host });
            }
        }
        Ok(())
    }

    /// Height of the block in lattice units (`max_y - min_y`).
    pub fn height(&self) -> usize {
        self.max[1].saturating_sub(self.min[1])
    }
}

/// Which domain faces carry inlet, outlet and wall labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConfig {
    /// Label the low face of `flow_axis` as inlet.
    pub inlet: bool,
    /// Label the high face of `flow_axis` as outlet.
    pub outlet: bool,
    /// Axis along which inlet and outlet are placed.
    pub flow_axis: Axis,
    /// Axes whose low and high domain faces are no-slip walls.
    pub walls: SmallVec<[Axis; 3]>,
    /// Optional solid block.
    pub solid: Option<SolidBlock>,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            inlet: false,
            outlet: false,
            flow_axis: Axis::X,
            walls: SmallVec::new(),
            solid: None,
        }
    }
}

impl BoundaryConfig {
    /// Whether boundary-labelled cells must have their velocity reset to
    /// zero after initialisation.
    pub fn resets_boundary_velocity(&self) -> bool {
        self.solid.is_some() || !self.walls.is_empty()
    }

    /// Reject velocities for which the inlet formula is singular.
    pub fn check_inlet(&self, flow: &FlowConfig) -> Result<(), ConfigError> {
        if !self.inlet {
            return Ok(());
        }
        for value in [flow.u_max, flow.u_ref] {
            if value == 1.0 {
                return Err(ConfigError::SingularInletVelocity { value });
            }
        }
        Ok(())
    }
}

// ── FlowConfig ─────────────────────────────────────────────────────

/// Where sampled inlet profile records come from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ProfileSource {
    /// A whitespace-separated `y ux uy uz` file.
    File(PathBuf),
    /// In-memory `[y, ux, uy, uz]` records sorted by `y`.
    Samples(Vec<[f64; 4]>),
}

/// How the initial velocity field is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum VelocityInit {
    /// Zero everywhere.
    NoFlow,
    /// The same `[ux, uy, uz]` in every cell. `uz` is ignored in 2-D.
    ///
    /// Also covers per-axis analytic values: each component is a fixed
    /// constant for its axis.
    Uniform([f64; 3]),
    /// Values interpolated from a sampled profile along y.
    Profile(ProfileSource),
}

/// Characteristic length used to derive viscosity from the Reynolds number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ReferenceLength {
    /// Domain height in level-0 cells.
    DomainHeight,
    /// Height of the configured solid block in lattice units.
    SolidBlockHeight,
    /// Diameter of an immersed circle/sphere of physical `radius`.
    ImmersedCircle {
        /// Physical radius.
        radius: f64,
    },
    /// Physical y-length of an immersed rectangle/cuboid.
    ImmersedRectangle {
        /// Physical length.
        length: f64,
    },
}

/// Macroscopic flow parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Reference density assigned to every cell.
    pub rho_ref: f64,
    /// Reference velocity in lattice units.
    pub u_ref: f64,
    /// Maximum inlet velocity in lattice units.
    pub u_max: f64,
    /// Target Reynolds number.
    pub reynolds: f64,
    /// Initial velocity field.
    pub velocity: VelocityInit,
    /// Length scale for the Reynolds number.
    pub reference_length: ReferenceLength,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            rho_ref: 1.0,
            u_ref: 0.05,
            u_max: 0.05,
            reynolds: 100.0,
            velocity: VelocityInit::NoFlow,
            reference_length: ReferenceLength::DomainHeight,
        }
    }
}

impl FlowConfig {
    fn validate(&self, boundaries: &BoundaryConfig) -> Result<(), ConfigError> {
        if !self.rho_ref.is_finite() || self.rho_ref <= 0.0 {
            return Err(ConfigError::InvalidFlowParameter {
                name: "rho_ref",
                value: self.rho_ref,
            });
        }
        if !self.reynolds.is_finite() || self.reynolds <= 0.0 {
            return Err(ConfigError::InvalidFlowParameter {
                name: "reynolds",
                value: self.reynolds,
            });
        }
        match self.reference_length {
            ReferenceLength::DomainHeight => {}
            ReferenceLength::SolidBlockHeight => {
                if boundaries.solid.is_none() {
                    return Err(ConfigError::InvalidReferenceLength {
                        reason: "solid block height requested but no solid block configured"
                            .to_string(),
                    });
                }
            }
            ReferenceLength::ImmersedCircle { radius: value }
            | ReferenceLength::ImmersedRectangle { length: value } => {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ConfigError::InvalidReferenceLength {
                        reason: format!("immersed object size must be positive, got {value}"),
                    });
                }
            }
        }
        Ok(())
    }
}

// ── RelaxationConfig ───────────────────────────────────────────────

/// Relaxation model settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RelaxationConfig {
    /// Per-direction level-0 relaxation rates for multi-relaxation-time
    /// collision. `None` selects single relaxation time.
    pub mrt: Option<Vec<f64>>,
}

impl RelaxationConfig {
    /// Check the MRT vector against the lattice direction count.
    pub fn check_directions(&self, directions: usize) -> Result<(), ConfigError> {
        match &self.mrt {
            Some(rates) if rates.len() != directions => Err(ConfigError::MrtLengthMismatch {
                expected: directions,
                got: rates.len(),
            }),
            _ => Ok(()),
        }
    }
}

// ── SolverConfig ───────────────────────────────────────────────────

/// Complete input for building a grid hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Domain geometry and level-0 resolution.
    pub domain: DomainConfig,
    /// Refinement regions.
    #[serde(default)]
    pub regions: RegionTree,
    /// Inlet/outlet/wall/solid placement.
    #[serde(default)]
    pub boundaries: BoundaryConfig,
    /// Flow parameters.
    #[serde(default)]
    pub flow: FlowConfig,
    /// Relaxation model.
    #[serde(default)]
    pub relaxation: RelaxationConfig,
}

impl SolverConfig {
    /// Validate all structural invariants that do not depend on the
    /// lattice model or the domain decomposition.
    ///
    /// Cell isotropy is checked separately by the spacing builder, which
    /// owns the spacing computation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = self.domain.dims;
        let root_cells = self.domain.resolved_cells();

        // 1. Domain axes must be non-degenerate.
        self.domain.validate()?;
        // 2. Every refinement region must fit and be large enough.
        self.regions.validate(root_cells, dims)?;
        // 3. Flow parameters must be physical.
        self.flow.validate(&self.boundaries)?;
        // 4. Inlet formula must not be singular.
        self.boundaries.check_inlet(&self.flow)?;
        // 5. The solid block must sit on a declared grid, clear of its edges.
        if let Some(solid) = &self.boundaries.solid {
            let extent = self
                .regions
                .global_extent(solid.host, root_cells, dims)
                .ok_or(ConfigError::UnknownSolidHost { host: solid.host })?;
            solid.check_placement(extent, dims)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RegionSpec;
    use smallvec::smallvec;

    fn block(host: GridKey, min: [usize; 3], max: [usize; 3]) -> SolidBlock {
        SolidBlock { host, min, max }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SolverConfig::default().validate().is_ok());
    }

    #[test]
    fn config_survives_json_round_trip() {
        let mut cfg = SolverConfig::default();
        cfg.domain = DomainConfig::new_2d(2.0, 1.0, 64, 32);
        cfg.regions = RegionTree::new(vec![RegionSpec::new([16, 8, 0], [31, 23, 0])
            .with_child(RegionSpec::new([8, 8, 0], [23, 23, 0]))]);
        cfg.boundaries.inlet = true;
        cfg.boundaries.outlet = true;
        cfg.boundaries.walls = smallvec![Axis::Y];
        cfg.boundaries.solid = Some(block(GridKey::new(1, 0), [4, 4, 0], [6, 9, 0]));
        cfg.flow.velocity = VelocityInit::Uniform([0.05, 0.0, 0.0]);
        cfg.flow.reference_length = ReferenceLength::SolidBlockHeight;
        cfg.relaxation.mrt = Some(vec![1.0, 1.4, 1.4, 1.0, 1.2, 1.0, 1.2, 1.0, 1.0]);

        let json = serde_json::to_string(&cfg).unwrap();
        let back: SolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
        assert!(back.validate().is_ok());
    }

    #[test]
    fn omitted_sections_take_defaults() {
        let domain = serde_json::to_value(DomainConfig::new_2d(1.0, 1.0, 8, 8)).unwrap();
        let cfg: SolverConfig =
            serde_json::from_value(serde_json::json!({ "domain": domain })).unwrap();
        assert!(cfg.regions.is_empty());
        assert_eq!(cfg.boundaries, BoundaryConfig::default());
        assert_eq!(cfg.relaxation.mrt, None);
    }

    #[test]
    fn zero_cells_rejected() {
        let mut cfg = SolverConfig::default();
        cfg.domain.cells[1] = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::DegenerateDomain { axis: Axis::Y, .. })
        ));
    }

    #[test]
    fn singular_inlet_rejected_only_when_inlet_enabled() {
        let mut cfg = SolverConfig::default();
        cfg.flow.u_max = 1.0;
        assert!(cfg.validate().is_ok());
        cfg.boundaries.inlet = true;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::SingularInletVelocity { value: 1.0 })
        );
    }

    #[test]
    fn solid_on_root_must_be_inside() {
        let b = block(GridKey::ROOT, [2, 2, 0], [31, 5, 0]);
        assert!(b.check_placement([32, 32, 1], Dimensionality::Two).is_ok());
        let b = block(GridKey::ROOT, [2, 2, 0], [32, 5, 0]);
        assert_eq!(
            b.check_placement([32, 32, 1], Dimensionality::Two),
            Err(ConfigError::SolidOutsideGrid {
                host: GridKey::ROOT
            })
        );
    }

    #[test]
    fn solid_on_refined_grid_must_avoid_transfer_layer() {
        let host = GridKey::new(1, 0);
        let extent = [12, 12, 1];
        assert!(block(host, [2, 2, 0], [9, 9, 0])
            .check_placement(extent, Dimensionality::Two)
            .is_ok());
        for (min, max) in [([1, 4, 0], [5, 5, 0]), ([4, 4, 0], [10, 5, 0]), ([4, 0, 0], [5, 5, 0])] {
            assert_eq!(
                block(host, min, max).check_placement(extent, Dimensionality::Two),
                Err(ConfigError::SolidOnTransferLayer { host })
            );
        }
    }

    #[test]
    fn inverted_solid_block_rejected() {
        let b = block(GridKey::ROOT, [9, 9, 0], [4, 4, 0]);
        assert_eq!(
            b.check_placement([16, 16, 1], Dimensionality::Two),
            Err(ConfigError::InvertedSolidBlock {
                host: GridKey::ROOT,
                axis: Axis::X,
                min: 9,
                max: 4,
            })
        );
        // Only resolved axes count: a 2-D block ignores z.
        let b = block(GridKey::ROOT, [2, 2, 5], [4, 4, 0]);
        assert!(b.check_placement([16, 16, 1], Dimensionality::Two).is_ok());
        let b = block(GridKey::new(1, 0), [4, 6, 0], [5, 3, 0]);
        assert!(matches!(
            b.check_placement([12, 12, 1], Dimensionality::Two),
            Err(ConfigError::InvertedSolidBlock { axis: Axis::Y, .. })
        ));
    }

    #[test]
    fn solid_host_must_exist() {
        let mut cfg = SolverConfig::default();
        cfg.boundaries.solid = Some(block(GridKey::new(1, 0), [3, 3, 0], [4, 4, 0]));
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::UnknownSolidHost {
                host: GridKey::new(1, 0)
            })
        );
        cfg.regions = RegionTree::new(vec![RegionSpec::new([4, 4, 0], [9, 9, 0])]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn solid_block_height_requires_block() {
        let mut cfg = SolverConfig::default();
        cfg.flow.reference_length = ReferenceLength::SolidBlockHeight;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidReferenceLength { .. })
        ));
    }

    #[test]
    fn mrt_length_checked() {
        let relax = RelaxationConfig {
            mrt: Some(vec![1.0; 9]),
        };
        assert!(relax.check_directions(9).is_ok());
        assert_eq!(
            relax.check_directions(19),
            Err(ConfigError::MrtLengthMismatch {
                expected: 19,
                got: 9
            })
        );
    }

    #[test]
    fn boundary_velocity_reset_follows_walls_and_solids() {
        let mut b = BoundaryConfig::default();
        assert!(!b.resets_boundary_velocity());
        b.walls = smallvec![Axis::Y];
        assert!(b.resets_boundary_velocity());
    }
}
