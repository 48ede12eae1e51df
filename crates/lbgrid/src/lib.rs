//! lbgrid: grid hierarchy construction for embedded-refinement lattice
//! Boltzmann solvers.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all lbgrid sub-crates. For most users, adding `lbgrid` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use lbgrid::prelude::*;
//!
//! // A 64 x 32 channel with inlet, outlet and walls, refined once over
//! // its middle.
//! let mut config = SolverConfig::default();
//! config.domain = DomainConfig::new_2d(2.0, 1.0, 64, 32);
//! config.boundaries.inlet = true;
//! config.boundaries.outlet = true;
//! config.boundaries.walls.push(Axis::Y);
//! config.flow.velocity = VelocityInit::Uniform([0.05, 0.0, 0.0]);
//! config.regions = RegionTree::new(vec![RegionSpec::new([16, 8, 0], [31, 23, 0])]);
//!
//! let hierarchy = Hierarchy::build(&config).unwrap();
//! assert_eq!(hierarchy.levels(), 2);
//!
//! let child = hierarchy.get(GridKey::new(1, 0)).unwrap();
//! assert_eq!(child.dx(), hierarchy.root().dx() / 2.0);
//! assert_eq!(child.label(Cell::new(0, 4, 0)), Some(LatticeType::TransferToCoarser));
//! assert_eq!(child.fields().f, child.fields().feq);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `lbgrid-core` | Configuration, region tree, grid keys, lattice labels, errors |
//! | [`space`] | `lbgrid-space` | Spacing, axes, cell fields, partitions, halo layers |
//! | [`grid`] | `lbgrid-grid` | Grid construction, labelling, initial fields, relaxation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Configuration and core vocabulary (`lbgrid-core`).
///
/// Contains [`types::SolverConfig`] and its parts, the refinement
/// [`types::RegionTree`], [`types::GridKey`], [`types::LatticeType`] and
/// [`types::ConfigError`].
pub use lbgrid_core as types;

/// Geometry below the grid level (`lbgrid-space`).
///
/// Provides [`space::GridAxis`] index/position sequences, the
/// [`space::Field`] storage used by every grid, and the
/// [`space::PartitionDescriptor`] a rank builds its level-0 slab from.
pub use lbgrid_space as space;

/// Grid hierarchy construction (`lbgrid-grid`).
///
/// [`grid::Hierarchy::build`] is the entry point; custom lattice models
/// plug in through [`grid::Equilibrium`].
pub use lbgrid_grid as grid;

/// Common imports for typical lbgrid usage.
///
/// ```rust
/// use lbgrid::prelude::*;
/// ```
pub mod prelude {
    // Configuration
    pub use lbgrid_core::{
        Axis, BoundaryConfig, Dimensionality, DomainConfig, FlowConfig, ProfileSource,
        ReferenceLength, RegionSpec, RegionTree, RelaxationConfig, SolidBlock, SolverConfig,
        VelocityInit,
    };

    // Identity and labels
    pub use lbgrid_core::{GridKey, LatticeType, Level};

    // Errors
    pub use lbgrid_core::ConfigError;
    pub use lbgrid_grid::{InitError, ProfileError};

    // Space
    pub use lbgrid_space::{Cell, Decomposition, Extent, Field, PartitionDescriptor};

    // Grids
    pub use lbgrid_grid::{Equilibrium, Grid, GridFields, Hierarchy, InletProfile};
}
