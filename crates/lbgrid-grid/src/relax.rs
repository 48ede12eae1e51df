//! Relaxation frequencies on level 0 and their refinement transform.

use lbgrid_core::{ConfigError, ReferenceLength, SolverConfig};
use smallvec::SmallVec;

/// Squared lattice sound speed.
pub const CS2: f64 = 1.0 / 3.0;

/// Relaxation frequency of one grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Relaxation {
    /// Single-relaxation-time frequency.
    pub omega: f64,
    /// Per-direction frequencies for multi-relaxation-time collision.
    pub mrt: Option<SmallVec<[f64; 19]>>,
}

impl Relaxation {
    /// Level-0 relaxation from the Reynolds number.
    ///
    /// `nu = L * u_ref / Re` with `L` the reference length in level-0
    /// lattice units, then `omega = 1 / (nu / cs^2 + 1/2)`. The MRT rates
    /// are taken from the configuration verbatim.
    pub fn root(config: &SolverConfig, dx: f64) -> Result<Self, ConfigError> {
        let length = reference_length(config, dx)?;
        let nu = length * config.flow.u_ref / config.flow.reynolds;
        Ok(Self {
            omega: 1.0 / (nu / CS2 + 0.5),
            mrt: config
                .relaxation
                .mrt
                .as_ref()
                .map(|rates| rates.iter().copied().collect()),
        })
    }

    /// Relaxation on a grid refined by a factor of two.
    ///
    /// Keeping the lattice viscosity consistent across levels gives
    /// `omega_c = 1 / (2 (1/omega_p - 1/2) + 1/2)`, applied to every MRT
    /// rate as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use lbgrid_grid::Relaxation;
    ///
    /// let parent = Relaxation { omega: 1.0, mrt: None };
    /// assert!((parent.refine().omega - 2.0 / 3.0).abs() < 1e-15);
    /// ```
    pub fn refine(&self) -> Self {
        Self {
            omega: refine_omega(self.omega),
            mrt: self
                .mrt
                .as_ref()
                .map(|rates| rates.iter().map(|&w| refine_omega(w)).collect()),
        }
    }
}

/// Relaxation frequency one level finer than `parent`.
pub fn refine_omega(parent: f64) -> f64 {
    1.0 / ((1.0 / parent - 0.5) * 2.0 + 0.5)
}

/// Reference length for the Reynolds number, in level-0 lattice units.
pub fn reference_length(config: &SolverConfig, dx: f64) -> Result<f64, ConfigError> {
    match config.flow.reference_length {
        ReferenceLength::DomainHeight => Ok(config.domain.cells[1] as f64),
        ReferenceLength::SolidBlockHeight => config
            .boundaries
            .solid
            .as_ref()
            .map(|block| block.height() as f64)
            .ok_or_else(|| ConfigError::InvalidReferenceLength {
                reason: "solid block height requested but no solid block configured".into(),
            }),
        ReferenceLength::ImmersedCircle { radius } => Ok(2.0 * radius / dx),
        ReferenceLength::ImmersedRectangle { length } => Ok(length / dx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lbgrid_core::{GridKey, SolidBlock};
    use proptest::prelude::*;

    #[test]
    fn root_omega_from_domain_height() {
        let mut config = SolverConfig::default();
        config.domain.cells = [64, 20, 1];
        config.flow.u_ref = 0.05;
        config.flow.reynolds = 10.0;
        // nu = 20 * 0.05 / 10 = 0.1, omega = 1 / (0.3 + 0.5)
        let r = Relaxation::root(&config, 0.05).unwrap();
        assert!((r.omega - 1.25).abs() < 1e-12);
        assert!(r.mrt.is_none());
    }

    #[test]
    fn reference_length_models() {
        let mut config = SolverConfig::default();
        config.flow.reference_length = ReferenceLength::ImmersedCircle { radius: 0.1 };
        assert!((reference_length(&config, 0.01).unwrap() - 20.0).abs() < 1e-9);

        config.flow.reference_length = ReferenceLength::ImmersedRectangle { length: 0.3 };
        assert!((reference_length(&config, 0.01).unwrap() - 30.0).abs() < 1e-9);

        config.flow.reference_length = ReferenceLength::SolidBlockHeight;
        assert!(reference_length(&config, 0.01).is_err());
        config.boundaries.solid = Some(SolidBlock {
            host: GridKey::ROOT,
            min: [4, 6, 0],
            max: [8, 14, 0],
        });
        assert_eq!(reference_length(&config, 0.01).unwrap(), 8.0);
    }

    #[test]
    fn mrt_rates_refine_component_wise() {
        let parent = Relaxation {
            omega: 1.0,
            mrt: Some(SmallVec::from_slice(&[1.0, 1.5])),
        };
        let child = parent.refine();
        let mrt = child.mrt.unwrap();
        assert!((mrt[0] - 2.0 / 3.0).abs() < 1e-15);
        assert!((mrt[1] - refine_omega(1.5)).abs() < 1e-15);
    }

    proptest! {
        #[test]
        fn refinement_preserves_physical_viscosity(omega in 0.05f64..1.95) {
            // Lattice viscosity doubles per level when dt halves alongside dx.
            let nu = |w: f64| CS2 * (1.0 / w - 0.5);
            let fine = refine_omega(omega);
            prop_assert!((nu(fine) - 2.0 * nu(omega)).abs() < 1e-9);
            prop_assert!(fine > 0.0 && fine <= omega);
        }
    }
}
