// ─────────────────────────────────────────────────────────────────────
// KM3 PDF Toolkit — Medium Constants
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Physics constants of the propagation medium (deep sea water).
//!
//! Values match the KM3NeT simulation toolkit bit-for-bit; the PDF
//! tables are generated against them, so they are not configurable.

/// Speed of light in vacuum [m/ns].
pub const C: f64 = 0.299792458;

/// Inverse speed of light in vacuum [ns/m].
pub const C_INVERSE: f64 = 1.0 / C;

/// Average index of refraction of sea water corresponding to the
/// group velocity of Cherenkov light.
pub const INDEX_OF_REFRACTION_WATER: f64 = 1.3800851282;

/// Index of refraction of sea water corresponding to the phase velocity.
pub const INDEX_OF_REFRACTION_PHASE: f64 = 1.35;

/// Average R-dependence of the arrival time of Cherenkov light
/// (a.k.a. kappa): converts the perpendicular distance of approach
/// into a light-arrival delay along the track axis.
pub const KAPPA_WATER: f64 = 0.96;

/// Density of sea water [g/cm^3].
pub const DENSITY_SEA_WATER: f64 = 1.038;

/// Muon rest mass [GeV].
pub const MASS_MUON: f64 = 0.1056583745;

/// Speed of light in vacuum [m/ns].
#[inline]
pub fn speed_of_light() -> f64 {
    C
}

/// Inverse speed of light in vacuum [ns/m].
#[inline]
pub fn inverse_speed_of_light() -> f64 {
    C_INVERSE
}

/// Group-velocity index of refraction of sea water.
#[inline]
pub fn index_of_refraction() -> f64 {
    INDEX_OF_REFRACTION_WATER
}

/// Phase-velocity index of refraction of sea water.
#[inline]
pub fn index_of_refraction_phase() -> f64 {
    INDEX_OF_REFRACTION_PHASE
}

/// Average tangent of the Cherenkov angle (group velocity).
#[inline]
pub fn tan_theta_c() -> f64 {
    ((INDEX_OF_REFRACTION_WATER - 1.0) * (INDEX_OF_REFRACTION_WATER + 1.0)).sqrt()
}

/// Average cosine of the Cherenkov angle (group velocity).
#[inline]
pub fn cos_theta_c() -> f64 {
    1.0 / INDEX_OF_REFRACTION_WATER
}

/// Average sine of the Cherenkov angle (group velocity).
#[inline]
pub fn sin_theta_c() -> f64 {
    tan_theta_c() * cos_theta_c()
}

/// Average R-dependence of the arrival time of Cherenkov light.
#[inline]
pub fn kappa_c() -> f64 {
    KAPPA_WATER
}
