//! Axion–photon coupling as a function of mass.
//!
//! For a QCD axion with model-dependent anomaly coefficient `C`:
//!
//! `g_aγ(m) = |α / (2π) · C · m / K|`
//!
//! with `m` in eV and `g_aγ` in GeV⁻¹.

use std::f64::consts::PI;

/// Fine-structure constant.
pub const FINE_STRUCTURE: f64 = 1.0 / 137.035_999_084;

/// Mass scale `K` in eV.
pub const MASS_SCALE_EV: f64 = 5.70e6;

/// `α / (2π)`.
pub const PREFACTOR: f64 = FINE_STRUCTURE / (2.0 * PI);

/// Coupling magnitude for mass `mass_ev` and coefficient `c`.
pub fn g_agamma(mass_ev: f64, c: f64) -> f64 {
    (PREFACTOR * c * (mass_ev / MASS_SCALE_EV)).abs()
}
