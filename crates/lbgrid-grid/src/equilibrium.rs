//! Equilibrium distribution models.
//!
//! Grid initialisation sets every population to its equilibrium value, so
//! the model is a collaborator of the builder rather than part of it. The
//! [`Equilibrium`] trait is the seam; [`D2Q9`] and [`D3Q19`] provide the
//! standard second-order BGK equilibria.

use crate::relax::CS2;
use lbgrid_core::Dimensionality;

/// Equilibrium distribution of a discrete-velocity lattice.
pub trait Equilibrium {
    /// Number of discrete velocity directions.
    fn directions(&self) -> usize;

    /// Equilibrium population in `direction` for density `rho` and
    /// velocity `u` (one component per resolved axis).
    ///
    /// `direction` must be below [`directions()`](Equilibrium::directions).
    fn equilibrium(&self, direction: usize, rho: f64, u: &[f64]) -> f64;
}

/// D2Q9 discrete velocities.
const E9: [[i32; 2]; 9] = [
    [0, 0],
    [1, 0],
    [0, 1],
    [-1, 0],
    [0, -1],
    [1, 1],
    [-1, 1],
    [-1, -1],
    [1, -1],
];

/// D2Q9 weights.
const W9: [f64; 9] = [
    4.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
];

/// D3Q19 discrete velocities: rest, six faces, twelve edges.
const E19: [[i32; 3]; 19] = [
    [0, 0, 0],
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
    [1, 1, 0],
    [-1, -1, 0],
    [1, -1, 0],
    [-1, 1, 0],
    [1, 0, 1],
    [-1, 0, -1],
    [1, 0, -1],
    [-1, 0, 1],
    [0, 1, 1],
    [0, -1, -1],
    [0, 1, -1],
    [0, -1, 1],
];

/// D3Q19 weights.
const W19: [f64; 19] = {
    let mut w = [1.0 / 36.0; 19];
    w[0] = 1.0 / 3.0;
    let mut i = 1;
    while i <= 6 {
        w[i] = 1.0 / 18.0;
        i += 1;
    }
    w
};

/// `w * rho * (1 + e.u / cs^2 + (e.u)^2 / (2 cs^4) - u.u / (2 cs^2))`.
fn second_order(e: &[i32], w: f64, rho: f64, u: &[f64]) -> f64 {
    let eu: f64 = e.iter().zip(u).map(|(&c, &v)| c as f64 * v).sum();
    let uu: f64 = u.iter().map(|v| v * v).sum();
    w * rho * (1.0 + eu / CS2 + eu * eu / (2.0 * CS2 * CS2) - uu / (2.0 * CS2))
}

/// Two-dimensional nine-velocity lattice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct D2Q9;

impl Equilibrium for D2Q9 {
    fn directions(&self) -> usize {
        E9.len()
    }

    fn equilibrium(&self, direction: usize, rho: f64, u: &[f64]) -> f64 {
        second_order(&E9[direction], W9[direction], rho, u)
    }
}

/// Three-dimensional nineteen-velocity lattice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct D3Q19;

impl Equilibrium for D3Q19 {
    fn directions(&self) -> usize {
        E19.len()
    }

    fn equilibrium(&self, direction: usize, rho: f64, u: &[f64]) -> f64 {
        second_order(&E19[direction], W19[direction], rho, u)
    }
}

/// The built-in model for a lattice dimensionality.
pub fn default_model(dims: Dimensionality) -> &'static dyn Equilibrium {
    match dims {
        Dimensionality::Two => &D2Q9,
        Dimensionality::Three => &D3Q19,
    }
}
