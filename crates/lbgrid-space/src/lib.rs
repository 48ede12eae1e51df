//! Grid geometry for lbgrid hierarchies.
//!
//! This crate turns a [`SolverConfig`](lbgrid_core::SolverConfig) into the
//! geometric pieces every grid is made of: the level-0 spacing
//! ([`root_spacing`]), per-axis index and position sequences
//! ([`GridAxis`]), and the dense [`Field`] storage shared by all per-cell
//! arrays.
//!
//! # Decomposition
//!
//! A [`PartitionDescriptor`] assigns each rank a block of the level-0 grid.
//! Partitioned axes carry one periodic halo node at each end, and the
//! physical extents of the exchange layers are exported as [`HaloLayers`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod axis;
pub mod extent;
pub mod halo;
pub mod partition;
pub mod spacing;

pub use axis::{linspace, GridAxis};
pub use extent::{Cell, Extent, Field};
pub use halo::{AxisLayers, HaloLayers};
pub use partition::{Decomposition, PartitionDescriptor, RankBounds};
pub use spacing::{check_geometry, root_spacing, spacing_at};
