// ─────────────────────────────────────────────────────────────────────
// KM3 PDF Toolkit — Muon Energy Loss
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Average energy loss of muons in sea water.
//!
//! The loss rate is parametrized as `-dE/dx = a + bE` with `a` the
//! ionisation term [GeV/m] and `b` the pair-production/bremsstrahlung
//! term [1/m], both constant within an energy regime. Parameters follow
//! Klimushin, Bugaev and Sokalski, "Precise parametrizations of muon
//! energy losses in water" (Proceedings of ICRC 2001).

use km3pdf_types::constants::{sin_theta_c, DENSITY_SEA_WATER, MASS_MUON};

/// Equivalent muon track length per unit shower energy [m/GeV]
/// (ANTARES-SOFT-2002-015, J. Brunner).
pub const GEANC: f64 = 4.7319;

/// Muon energy loss in a fixed medium.
pub trait EnergyLoss {
    /// Energy loss due to ionisation [GeV/m].
    fn a(&self) -> f64;

    /// Energy loss due to pair production and bremsstrahlung [1/m].
    fn b(&self) -> f64;

    /// Energy of the muon [GeV] after traveling `dx` [m].
    fn energy_after(&self, e: f64, dx: f64) -> f64;

    /// Distance traveled [m] while the energy drops from `e0` to `e1` [GeV].
    fn range(&self, e0: f64, e1: f64) -> f64;
}

/// Closed-form energy loss with constant `a` and `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeaneParams {
    a: f64,
    b: f64,
}

impl GeaneParams {
    pub fn new(a: f64, b: f64) -> Self {
        GeaneParams { a, b }
    }

    /// Standard rock, with the customary correction factors applied to
    /// the sea-water ionisation and radiative terms.
    pub fn rock() -> Self {
        const DENSITY_ROCK: f64 = 2.65;
        GeaneParams::new(2.67e-1 * 0.9 * DENSITY_ROCK, 3.40e-4 * 1.2 * DENSITY_ROCK)
    }
}

impl EnergyLoss for GeaneParams {
    fn a(&self) -> f64 {
        self.a
    }

    fn b(&self) -> f64 {
        self.b
    }

    fn energy_after(&self, e: f64, dx: f64) -> f64 {
        let y = (self.a / self.b + e) * (-self.b * dx).exp() - self.a / self.b;
        y.max(0.0)
    }

    fn range(&self, e0: f64, e1: f64) -> f64 {
        -((self.a + self.b * e1) / (self.a + self.b * e0)).ln() / self.b
    }
}

/// Energy-dependent muon energy loss in sea water.
///
/// Piecewise [`GeaneParams`] over energy regimes; lookups walk the
/// regimes from the starting energy downwards, spending the traveled
/// distance regime by regime.
#[derive(Debug, Clone)]
pub struct GeaneWater {
    // (lower regime boundary [GeV], parameters), ascending.
    regimes: Vec<(f64, GeaneParams)>,
}

impl Default for GeaneWater {
    fn default() -> Self {
        GeaneWater {
            regimes: vec![
                (
                    0.0,
                    GeaneParams::new(2.30e-1 * DENSITY_SEA_WATER, 15.50e-4 * DENSITY_SEA_WATER),
                ),
                (
                    30.0,
                    GeaneParams::new(2.67e-1 * DENSITY_SEA_WATER, 3.40e-4 * DENSITY_SEA_WATER),
                ),
                (
                    35.3e3,
                    GeaneParams::new(-6.50e-1 * DENSITY_SEA_WATER, 3.66e-4 * DENSITY_SEA_WATER),
                ),
            ],
        }
    }
}

impl GeaneWater {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the regime governing energies just below `e`.
    fn regime_above(&self, e: f64) -> usize {
        self.regimes.partition_point(|(boundary, _)| *boundary < e)
    }
}

impl EnergyLoss for GeaneWater {
    /// Ionisation term of the low-energy regime (< 30 GeV) [GeV/m].
    fn a(&self) -> f64 {
        2.30e-1 * DENSITY_SEA_WATER
    }

    /// Radiative term of the medium-energy regime [1/m].
    fn b(&self) -> f64 {
        3.40e-4 * DENSITY_SEA_WATER
    }

    fn energy_after(&self, e: f64, dx: f64) -> f64 {
        let mut e1 = e;
        let mut x1 = dx;

        if e1 > MASS_MUON / sin_theta_c() {
            let mut i = self.regime_above(e1);
            loop {
                i -= 1;
                let (boundary, segment) = self.regimes[i];

                let x2 = segment.range(e1, boundary);
                if x2 > x1 {
                    return segment.energy_after(e1, x1);
                }

                e1 = boundary;
                x1 -= x2;

                if i == 0 {
                    break;
                }
            }
        }

        e1
    }

    fn range(&self, e0: f64, e1: f64) -> f64 {
        let mut e = e0;
        let mut dx = 0.0;

        if e > MASS_MUON / sin_theta_c() {
            let mut i = self.regime_above(e);
            loop {
                i -= 1;
                let (boundary, segment) = self.regimes[i];

                if e1 > boundary {
                    return dx + segment.range(e, e1);
                }

                dx += segment.range(e, boundary);
                e = boundary;

                if i == 0 {
                    break;
                }
            }
        }

        dx
    }
}

/// Equivalent EM-shower energy due to delta-rays per unit muon track
/// length [GeV/m]. Zero below the kinematic threshold.
pub fn delta_rays_from_muon(e: f64) -> f64 {
    const A: f64 = 3.186e-01;
    const B: f64 = 3.384e-01;
    const C: f64 = -2.759e-02;
    const D: f64 = 1.630e-03;
    const E_MIN: f64 = 0.13078; // [GeV]

    if e > E_MIN {
        let x = e.log10();
        let y = A + x * (B + x * (C + x * D)); // [MeV g^-1 cm^2]
        y * DENSITY_SEA_WATER * 1.0e-1 // [GeV/m]
    } else {
        0.0
    }
}
