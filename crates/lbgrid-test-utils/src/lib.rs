//! Test utilities for lbgrid development.
//!
//! Provides a [`TestConfigBuilder`] for assembling
//! [`SolverConfig`] values in a line or two, and ready-made scenarios in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use lbgrid_core::{
    Axis, DomainConfig, GridKey, RegionSpec, RegionTree, SolidBlock, SolverConfig, VelocityInit,
};
use smallvec::SmallVec;

/// Builder for solver configurations used in tests and benches.
///
/// Starts from a 2-D unit-spacing domain with no boundaries and no flow.
pub struct TestConfigBuilder {
    config: SolverConfig,
}

impl TestConfigBuilder {
    /// A 2-D domain of `n x m` cells of unit size.
    pub fn new_2d(n: usize, m: usize) -> Self {
        let mut config = SolverConfig::default();
        config.domain = DomainConfig::new_2d(n as f64, m as f64, n, m);
        Self { config }
    }

    /// A 3-D domain of `n x m x k` cells of unit size.
    pub fn new_3d(n: usize, m: usize, k: usize) -> Self {
        let mut config = SolverConfig::default();
        config.domain = DomainConfig::new_3d(n as f64, m as f64, k as f64, n, m, k);
        Self { config }
    }

    /// Add a level-0 refinement region.
    pub fn region(mut self, region: RegionSpec) -> Self {
        self.config.regions.regions.push(region);
        self
    }

    /// Replace the region tree.
    pub fn regions(mut self, regions: RegionTree) -> Self {
        self.config.regions = regions;
        self
    }

    /// Enable inlet and outlet on the x faces.
    pub fn inlet_outlet(mut self) -> Self {
        self.config.boundaries.inlet = true;
        self.config.boundaries.outlet = true;
        self.config.boundaries.flow_axis = Axis::X;
        self
    }

    /// Put no-slip walls on both faces of each axis.
    pub fn walls(mut self, axes: &[Axis]) -> Self {
        self.config.boundaries.walls = SmallVec::from_slice(axes);
        self
    }

    /// Place a solid block on `host`.
    pub fn solid(mut self, host: GridKey, min: [usize; 3], max: [usize; 3]) -> Self {
        self.config.boundaries.solid = Some(SolidBlock { host, min, max });
        self
    }

    /// Set the initial velocity.
    pub fn velocity(mut self, velocity: VelocityInit) -> Self {
        self.config.flow.velocity = velocity;
        self
    }

    /// Set reference velocity and Reynolds number.
    pub fn flow(mut self, u_ref: f64, reynolds: f64) -> Self {
        self.config.flow.u_ref = u_ref;
        self.config.flow.u_max = u_ref;
        self.config.flow.reynolds = reynolds;
        self
    }

    /// Use multi-relaxation-time rates.
    pub fn mrt(mut self, rates: Vec<f64>) -> Self {
        self.config.relaxation.mrt = Some(rates);
        self
    }

    pub fn build(self) -> SolverConfig {
        self.config
    }
}
