//! Configuration and geometry errors.
//!
//! Every check that would otherwise abort the run during grid construction
//! is reported as a [`ConfigError`] variant so the caller decides whether to
//! abort or recover.

use crate::axis::Axis;
use crate::id::GridKey;
use thiserror::Error;

/// Errors detected while validating a configuration or building grids.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Per-axis spacings differ, so cells are not squares/cubes.
    #[error("lattice cells must be squares/cubes: dx = {dx}, dy = {dy}, dz = {dz:?}")]
    NonIsotropicCells {
        /// Spacing along x.
        dx: f64,
        /// Spacing along y.
        dy: f64,
        /// Spacing along z (3-D only).
        dz: Option<f64>,
    },

    /// A domain axis has a non-positive extent or zero cells.
    #[error("domain axis {axis} is degenerate: extent {extent}, cells {cells}")]
    DegenerateDomain {
        /// The offending axis.
        axis: Axis,
        /// Physical extent `hi - lo`.
        extent: f64,
        /// Configured cell count.
        cells: usize,
    },

    /// A refinement region is too narrow to support factor-2 refinement.
    #[error("refined region {key} spans {span} cells along {axis}; minimum is {min}")]
    RegionTooSmall {
        /// Grid the region would create.
        key: GridKey,
        /// Axis along which the span is too small.
        axis: Axis,
        /// Span in parent cells.
        span: usize,
        /// Smallest admissible span: 3, or 4 when the region is refined further.
        min: usize,
    },

    /// A refinement region lies outside its parent's global index range.
    #[error("refined region {key} [{start}, {end}] along {axis} exceeds parent extent {extent}")]
    RegionOutOfBounds {
        /// Grid the region would create.
        key: GridKey,
        /// Offending axis.
        axis: Axis,
        /// Region start index.
        start: usize,
        /// Region end index (inclusive).
        end: usize,
        /// Number of cells on the parent along `axis`.
        extent: usize,
    },

    /// The inlet boundary formula is singular at unit velocity.
    #[error("inlet boundary condition is singular for velocity {value}; choose another value")]
    SingularInletVelocity {
        /// The offending reference or maximum velocity.
        value: f64,
    },

    /// The solid block extends beyond the grid that hosts it.
    #[error("solid block is placed outside grid {host}")]
    SolidOutsideGrid {
        /// Hosting grid.
        host: GridKey,
    },

    /// The solid block has a lower bound above its upper bound.
    #[error("solid block on grid {host} is inverted along {axis}: min {min} > max {max}")]
    InvertedSolidBlock {
        /// Hosting grid.
        host: GridKey,
        /// Offending axis.
        axis: Axis,
        /// Lower bound.
        min: usize,
        /// Upper bound.
        max: usize,
    },

    /// The solid block touches the outer two index layers of a refined grid.
    #[error("solid block overlaps the transfer layer of grid {host}")]
    SolidOnTransferLayer {
        /// Hosting grid.
        host: GridKey,
    },

    /// The solid block names a grid that the region tree does not declare.
    #[error("solid block host {host} is not declared by the refinement tree")]
    UnknownSolidHost {
        /// Requested host.
        host: GridKey,
    },

    /// The MRT relaxation vector does not have one entry per lattice direction.
    #[error("MRT relaxation vector has {got} entries, lattice has {expected} directions")]
    MrtLengthMismatch {
        /// Lattice direction count.
        expected: usize,
        /// Supplied vector length.
        got: usize,
    },

    /// The reference length model cannot be evaluated for this configuration.
    #[error("invalid reference length: {reason}")]
    InvalidReferenceLength {
        /// What went wrong.
        reason: String,
    },

    /// A non-physical flow parameter (density, Reynolds number).
    #[error("invalid flow parameter {name} = {value}")]
    InvalidFlowParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The decomposition descriptor is inconsistent with the domain.
    #[error("invalid partition: {reason}")]
    InvalidPartition {
        /// What went wrong.
        reason: String,
    },
}
