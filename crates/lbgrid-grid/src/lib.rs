//! Grid hierarchy construction for multi-resolution lattice Boltzmann
//! solvers.
//!
//! [`Hierarchy::build`] turns a validated
//! [`SolverConfig`](lbgrid_core::SolverConfig) into one [`Grid`] per level
//! and region: spacing and node positions, lattice-type labels, parent
//! coverage, initial macroscopic fields, equilibrium populations and
//! relaxation frequencies. Stepping the solver is out of scope.
//!
//! # Build order
//!
//! 1. Geometry, region tree, boundaries, MRT vector and inlet profile are
//!    validated before anything is allocated.
//! 2. Level 0 is built and labelled: solid, inlet, outlet, walls.
//! 3. Each region is built from its parent, relabelling the parent's
//!    covered cells as refined interior or transfer-to-finer.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod equilibrium;
pub mod error;
mod fields;
pub mod grid;
pub mod hierarchy;
pub mod label;
pub mod profile;
pub mod relax;
mod root;
pub mod subgrid;

pub use equilibrium::{default_model, Equilibrium, D2Q9, D3Q19};
pub use error::{InitError, ProfileError};
pub use grid::{Grid, GridFields};
pub use hierarchy::Hierarchy;
pub use label::ParentLabels;
pub use profile::{InletProfile, InletVelocity};
pub use relax::{reference_length, refine_omega, Relaxation, CS2};
pub use subgrid::CoarseLimits;
