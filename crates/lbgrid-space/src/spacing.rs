//! Level-0 cell spacing and geometry checks.

use lbgrid_core::{Axis, ConfigError, Dimensionality, DomainConfig, Level, SolverConfig, SPACING_TOLERANCE};

/// Cell spacing on level 0, after checking that cells are squares (2-D)
/// or cubes (3-D).
///
/// Spacing along each axis is `extent / cell_count`. The collision stencil
/// assumes isotropic cells, so any per-axis difference beyond
/// [`SPACING_TOLERANCE`] (relative) is rejected.
///
/// # Examples
///
/// ```
/// use lbgrid_core::DomainConfig;
/// use lbgrid_space::root_spacing;
///
/// let domain = DomainConfig::new_2d(2.0, 1.0, 40, 20);
/// assert!((root_spacing(&domain).unwrap() - 0.05).abs() < 1e-15);
///
/// let stretched = DomainConfig::new_2d(2.0, 1.0, 40, 40);
/// assert!(root_spacing(&stretched).is_err());
/// ```
pub fn root_spacing(domain: &DomainConfig) -> Result<f64, ConfigError> {
    let spacing = |axis: Axis| domain.extent(axis) / domain.cell_count(axis) as f64;
    let dx = spacing(Axis::X);
    let dy = spacing(Axis::Y);
    let dz = match domain.dims {
        Dimensionality::Two => None,
        Dimensionality::Three => Some(spacing(Axis::Z)),
    };

    let isotropic = same_spacing(dx, dy) && dz.map_or(true, |dz| same_spacing(dx, dz));
    if !isotropic {
        return Err(ConfigError::NonIsotropicCells { dx, dy, dz });
    }
    Ok(dx)
}

/// Spacing on `level` given the level-0 spacing. Each level halves it.
pub fn spacing_at(root_dx: f64, level: Level) -> f64 {
    root_dx / f64::powi(2.0, level.0 as i32)
}

/// Run every geometry check that must pass before any grid is built:
/// the solver-config structural checks, cell isotropy, and the refinement
/// size floor. Returns the level-0 spacing.
pub fn check_geometry(config: &SolverConfig) -> Result<f64, ConfigError> {
    config.validate()?;
    root_spacing(&config.domain)
}

fn same_spacing(a: f64, b: f64) -> bool {
    (a - b).abs() <= SPACING_TOLERANCE * a.abs().max(b.abs())
}
