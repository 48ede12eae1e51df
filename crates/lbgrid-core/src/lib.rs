//! Core types for lbgrid grid hierarchies.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by every other lbgrid crate: grid identifiers, axes,
//! lattice type labels, the immutable [`SolverConfig`], the refinement
//! [`RegionTree`], and [`ConfigError`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod axis;
pub mod config;
pub mod error;
pub mod id;
pub mod label;
pub mod region;

pub use axis::{Axis, Dimensionality};
pub use config::{
    BoundaryConfig, DomainConfig, FlowConfig, ProfileSource, ReferenceLength, RelaxationConfig,
    SolidBlock, SolverConfig, VelocityInit, SPACING_TOLERANCE, TRANSFER_LAYER_DEPTH,
};
pub use error::ConfigError;
pub use id::{GridKey, Level, RegionId};
pub use label::LatticeType;
pub use region::{RegionNode, RegionSpec, RegionTree, MIN_REGION_SPAN};
