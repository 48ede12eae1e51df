//! Ready-made configurations covering the common construction paths.
//!
//! - [`channel_2d`]: unrefined channel with inlet, outlet and walls.
//! - [`refined_2d`]: two nested refinement levels in a 2-D channel.
//! - [`refined_3d`]: one refinement level in a 3-D box.
//! - [`solid_on_refined`]: a solid block hosted by a level-1 grid.

use crate::TestConfigBuilder;
use lbgrid_core::{Axis, GridKey, RegionSpec, SolverConfig, VelocityInit};

/// Samples of a linear ramp `ux = 2y` on `y` in `[0, 2]`.
pub fn ramp_samples() -> Vec<[f64; 4]> {
    vec![
        [0.0, 0.0, 0.0, 0.0],
        [1.0, 2.0, 0.0, 0.0],
        [2.0, 4.0, 0.0, 0.0],
    ]
}

/// 48 x 24 channel with inlet, outlet and walls along y.
pub fn channel_2d() -> SolverConfig {
    TestConfigBuilder::new_2d(48, 24)
        .inlet_outlet()
        .walls(&[Axis::Y])
        .velocity(VelocityInit::Uniform([0.04, 0.0, 0.0]))
        .flow(0.04, 100.0)
        .build()
}

/// 64 x 32 channel refined over `[16, 31] x [8, 23]`, with a second level
/// over the middle of the first.
pub fn refined_2d() -> SolverConfig {
    TestConfigBuilder::new_2d(64, 32)
        .inlet_outlet()
        .walls(&[Axis::Y])
        .region(
            RegionSpec::new([16, 8, 0], [31, 23, 0])
                .with_child(RegionSpec::new([8, 8, 0], [23, 23, 0])),
        )
        .velocity(VelocityInit::Uniform([0.05, 0.0, 0.0]))
        .flow(0.05, 50.0)
        .build()
}

/// 24 x 16 x 16 box refined over `[6, 13] x [4, 11] x [4, 11]`.
pub fn refined_3d() -> SolverConfig {
    TestConfigBuilder::new_3d(24, 16, 16)
        .region(RegionSpec::new([6, 4, 4], [13, 11, 11]))
        .velocity(VelocityInit::Uniform([0.02, 0.0, 0.01]))
        .build()
}

/// 40 x 20 channel with a level-1 region `[10, 19] x [5, 14]` hosting a
/// solid block clear of its transfer layers.
pub fn solid_on_refined() -> SolverConfig {
    TestConfigBuilder::new_2d(40, 20)
        .walls(&[Axis::Y])
        .region(RegionSpec::new([10, 5, 0], [19, 14, 0]))
        .solid(GridKey::new(1, 0), [6, 6, 0], [9, 11, 0])
        .velocity(VelocityInit::Uniform([0.03, 0.0, 0.0]))
        .build()
}
