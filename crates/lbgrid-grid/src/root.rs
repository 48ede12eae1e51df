//! Level-0 grid construction.

use crate::grid::Grid;
use crate::label;
use crate::relax::Relaxation;
use lbgrid_core::{Axis, ConfigError, DomainConfig, GridKey, SolverConfig};
use lbgrid_space::{Decomposition, GridAxis, HaloLayers};
use tracing::info;

/// Index and position sequences of the level-0 grid on this rank.
///
/// Without a decomposition every axis covers the whole domain. With one,
/// each resolved axis covers the rank's owned range plus a periodic halo
/// node at each end. The z axis of a 2-D lattice is a single node at the
/// centre of the z bounds.
pub(crate) fn root_axes(
    domain: &DomainConfig,
    dx: f64,
    decomposition: Option<&Decomposition>,
) -> Result<[GridAxis; 3], ConfigError> {
    let local = match decomposition {
        Some(d) => {
            d.descriptor.validate(domain, d.rank)?;
            d.local()
        }
        None => None,
    };
    let cells = domain.resolved_cells();

    let build_axis = |axis: Axis| -> GridAxis {
        let a = axis.index();
        let bounds = domain.bounds[a];
        if !domain.dims.resolves(axis) {
            return GridAxis::degenerate((bounds[0] + bounds[1]) / 2.0);
        }
        match local {
            Some(rank) => {
                GridAxis::partitioned(rank.owned(axis), rank.span(axis), cells[a], bounds, dx)
            }
            None => GridAxis::whole(cells[a], bounds, dx),
        }
    };
    Ok([build_axis(Axis::X), build_axis(Axis::Y), build_axis(Axis::Z)])
}

/// Build and label the level-0 grid. Fields are left zeroed.
pub(crate) fn build_root(
    config: &SolverConfig,
    dx: f64,
    decomposition: Option<&Decomposition>,
    directions: usize,
) -> Result<Grid, ConfigError> {
    let axes = root_axes(&config.domain, dx, decomposition)?;
    let halo = decomposition.map(|_| HaloLayers::from_axes(&axes, dx));
    let relaxation = Relaxation::root(config, dx)?;

    let mut grid = Grid::new(
        GridKey::ROOT,
        None,
        config.domain.dims,
        dx,
        axes,
        relaxation,
        directions,
    );
    if let Some(halo) = halo {
        grid = grid.with_halo(halo);
    }
    label::label_boundaries(&mut grid, config)?;

    let extent = grid.extent();
    info!(
        dx,
        nx = extent.nx,
        ny = extent.ny,
        nz = extent.nz,
        omega = grid.omega(),
        partitioned = decomposition.is_some(),
        "built level-0 grid"
    );
    Ok(grid)
}
