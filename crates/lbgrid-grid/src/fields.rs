//! Initial macroscopic fields and populations.

use crate::equilibrium::Equilibrium;
use crate::grid::Grid;
use crate::profile::InletProfile;
use lbgrid_core::{Axis, LatticeType, SolverConfig, VelocityInit};

/// Fill velocity, density and populations of a labelled grid.
///
/// Forces and time averages stay at zero. Populations start at
/// equilibrium, so `f == feq` on return. When a profile is given it is
/// sampled at the grid's y positions and kept as the grid's inlet
/// velocity.
pub(crate) fn initialise(
    grid: &mut Grid,
    config: &SolverConfig,
    model: &dyn Equilibrium,
    profile: Option<&InletProfile>,
) {
    if let Some(profile) = profile {
        let inlet = profile.sample_all(grid.axis(Axis::Y).positions());
        grid.set_inlet_velocity(inlet);
    }
    init_velocity(grid, config);
    grid.fields_mut().rho.fill(config.flow.rho_ref);
    init_populations(grid, model);
}

fn init_velocity(grid: &mut Grid, config: &SolverConfig) {
    let d = grid.dims().count();
    let extent = grid.extent();
    let reset = config.boundaries.resets_boundary_velocity();

    for cell in extent.cells() {
        let value = match &config.flow.velocity {
            VelocityInit::NoFlow => [0.0; 3],
            VelocityInit::Uniform(u) => *u,
            VelocityInit::Profile(_) => grid
                .inlet_velocity()
                .and_then(|inlet| inlet.get(cell.j))
                .unwrap_or([0.0; 3]),
        };
        let solid = reset && grid.label(cell) == Some(LatticeType::Boundary);
        let u = &mut grid.fields_mut().u[cell];
        if solid {
            u.fill(0.0);
        } else {
            u.copy_from_slice(&value[..d]);
        }
    }
}

fn init_populations(grid: &mut Grid, model: &dyn Equilibrium) {
    let extent = grid.extent();
    let fields = grid.fields_mut();
    for cell in extent.cells() {
        let rho = fields.rho[cell][0];
        for v in 0..model.directions() {
            fields.f[cell][v] = model.equilibrium(v, rho, &fields.u[cell]);
        }
    }
    fields.feq = fields.f.clone();
}
