//! Benchmark profiles for lbgrid hierarchy construction.
//!
//! Provides pre-built [`SolverConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 256x128 channel (32K level-0 cells) with two
//!   nested refinement levels
//! - [`stress_profile`]: 64x48x48 box (~150K level-0 cells) refined once in 3-D
//! - [`tiled_regions`]: a row of sibling regions, for wide region trees

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use lbgrid_core::{Axis, RegionSpec, RegionTree, SolverConfig, VelocityInit};
use lbgrid_test_utils::TestConfigBuilder;

/// Build the reference benchmark profile: a 256x128 channel with inlet,
/// outlet and walls, refined over its middle and again inside that.
pub fn reference_profile() -> SolverConfig {
    TestConfigBuilder::new_2d(256, 128)
        .inlet_outlet()
        .walls(&[Axis::Y])
        .region(
            RegionSpec::new([64, 32, 0], [159, 95, 0])
                .with_child(RegionSpec::new([32, 32, 0], [159, 95, 0])),
        )
        .velocity(VelocityInit::Uniform([0.05, 0.0, 0.0]))
        .flow(0.05, 200.0)
        .build()
}

/// Build the stress profile: a 64x48x48 box refined once around its centre.
pub fn stress_profile() -> SolverConfig {
    TestConfigBuilder::new_3d(64, 48, 48)
        .inlet_outlet()
        .walls(&[Axis::Y, Axis::Z])
        .region(RegionSpec::new([16, 12, 12], [39, 35, 35]))
        .velocity(VelocityInit::Uniform([0.04, 0.0, 0.0]))
        .flow(0.04, 100.0)
        .build()
}

/// Build a 2-D channel of `nx` x 64 cells with `count` sibling regions of
/// 8 x 16 parent cells spread along x.
pub fn tiled_regions(nx: usize, count: usize) -> SolverConfig {
    let pitch = (nx / count.max(1)).max(8);
    let regions = (0..count)
        .map(|r| {
            let x0 = r * pitch;
            RegionSpec::new([x0, 24, 0], [x0 + 7, 39, 0])
        })
        .collect();
    let mut config = TestConfigBuilder::new_2d(nx, 64)
        .walls(&[Axis::Y])
        .velocity(VelocityInit::Uniform([0.02, 0.0, 0.0]))
        .build();
    config.regions = RegionTree::new(regions);
    config
}
