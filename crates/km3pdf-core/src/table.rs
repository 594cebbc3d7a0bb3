// ─────────────────────────────────────────────────────────────────────
// KM3 PDF Toolkit — Probability-Table Contract
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Contract for the probability tables the evaluators delegate to.
//!
//! Real deployments back these traits with the native interpolation
//! tables (multi-dimensional splines loaded from `J%p.dat` files);
//! reproducing those is out of scope here. [`GaussianTable`] is an
//! analytic stand-in with the right shape of response, used by tests,
//! benches and the Python bindings when no native tables are present.
//!
//! Tables are read-only after construction and required to be
//! `Send + Sync`, so one instance may back any number of evaluators
//! across threads.

use statrs::function::erf::erf;

use km3pdf_types::config::PdfConfig;
use km3pdf_types::constants::{INDEX_OF_REFRACTION_WATER, MASS_MUON};
use km3pdf_types::error::PdfResult;
use km3pdf_types::result::PdfValue;

use crate::geane::delta_rays_from_muon;

/// Muon light lookup, indexed by the energy at closest approach `e`
/// [GeV], closest-approach distance `r` [m], PMT angles `theta`/`phi`
/// [rad] and time residual `dt` [ns].
///
/// Lookup errors propagate to the caller unchanged; the evaluator layer
/// performs no translation or suppression.
pub trait MuonTable: Send + Sync {
    fn calculate(&self, e: f64, r: f64, theta: f64, phi: f64, dt: f64) -> PdfResult<PdfValue>;
}

/// Shower light lookup, indexed by the shower energy `e` [GeV], vertex
/// distance `d` [m], emission cosine `cd`, PMT angles and time residual.
pub trait ShowerTable: Send + Sync {
    fn calculate(&self, e: f64, d: f64, cd: f64, theta: f64, phi: f64, dt: f64)
        -> PdfResult<PdfValue>;
}

/// Expected number of photo-electrons from a muon track, integrated
/// over arrival time. Zero below the Cherenkov threshold
/// `MASS_MUON * n`.
pub trait MuonNpe: Send + Sync {
    fn calculate(&self, e: f64, r: f64, theta: f64, phi: f64) -> PdfResult<f64>;
}

/// Expected number of photo-electrons from a shower, integrated over
/// arrival time; scales linearly with the shower energy.
pub trait ShowerNpe: Send + Sync {
    fn calculate(&self, e: f64, d: f64, cd: f64, theta: f64, phi: f64) -> PdfResult<f64>;
}

/// Intrinsic width of the arrival-time distribution [ns].
const SIGMA_INTRINSIC: f64 = 2.0;

/// Effective light attenuation length [m].
const LAMBDA_ATTENUATION: f64 = 50.0;

/// Photo-electrons from a minimum-ionising muon at the reference
/// distance, and per GeV of radiative and delta-ray losses.
const NPE_MIP: f64 = 1.0;
const NPE_PER_GEV_BREMS: f64 = 1.0e-3;
const NPE_PER_GEV_DELTA: f64 = 1.0;

/// Photo-electrons per GeV of shower energy at the reference distance.
const NPE_PER_GEV_SHOWER: f64 = 0.1;

/// Analytic reference table: Gaussian time residual on top of a
/// distance- and angle-attenuated amplitude.
///
/// The muon amplitude keeps the native tables' composition, a
/// minimum-ionising component plus components scaling with the energy
/// and with the delta-ray yield. The `number_of_points`/`epsilon`
/// integration settings of [`PdfConfig`] only concern the native
/// loader's smearing and are ignored here; `tts` is folded into the
/// Gaussian width in quadrature.
#[derive(Debug, Clone)]
pub struct GaussianTable {
    sigma: f64,
}

impl GaussianTable {
    pub fn from_config(config: &PdfConfig) -> PdfResult<Self> {
        config.validate()?;
        Ok(GaussianTable {
            sigma: (SIGMA_INTRINSIC * SIGMA_INTRINSIC + config.tts * config.tts).sqrt(),
        })
    }

    /// Width of the arrival-time distribution [ns].
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    fn gauss(&self, dt: f64) -> f64 {
        let u = dt / self.sigma;
        (-0.5 * u * u).exp() / (self.sigma * (2.0 * std::f64::consts::PI).sqrt())
    }

    fn cumulative(&self, dt: f64) -> f64 {
        0.5 * (1.0 + erf(dt / (self.sigma * std::f64::consts::SQRT_2)))
    }

    /// Time structure around a total content `npe`, with the same
    /// safety floors the native lookup applies.
    fn response(&self, npe: f64, dt: f64) -> PdfValue {
        let f = npe * self.gauss(dt);
        let fp = -dt / (self.sigma * self.sigma) * f;
        let v = npe * self.cumulative(dt);

        let mut result = PdfValue { f, fp, v, V: npe };
        if result.f <= 0.0 {
            result.f = 0.0;
            result.fp = 0.0;
        }
        if result.v <= 0.0 {
            result.v = 0.0;
        }
        result
    }

    fn angular_acceptance(theta: f64, phi: f64) -> f64 {
        (1.0 + 0.5 * theta.cos()) * (1.0 + 0.1 * phi.cos())
    }

    /// Total muon light content: a minimum-ionising component plus
    /// components scaling with the energy and the delta-ray yield.
    fn muon_npe(e: f64, r: f64, theta: f64, phi: f64) -> f64 {
        let geometry =
            (-r / LAMBDA_ATTENUATION).exp() / (r + 1.0) * Self::angular_acceptance(theta, phi);
        geometry * (NPE_MIP + NPE_PER_GEV_BREMS * e + NPE_PER_GEV_DELTA * delta_rays_from_muon(e))
    }

    /// Total shower light content, linear in the shower energy.
    fn shower_npe(e: f64, d: f64, cd: f64, theta: f64, phi: f64) -> f64 {
        let geometry = (-d / LAMBDA_ATTENUATION).exp() / (d * d + 1.0)
            * (1.0 + 0.3 * cd)
            * Self::angular_acceptance(theta, phi);
        geometry * NPE_PER_GEV_SHOWER * e
    }
}

impl MuonTable for GaussianTable {
    fn calculate(&self, e: f64, r: f64, theta: f64, phi: f64, dt: f64) -> PdfResult<PdfValue> {
        Ok(self.response(Self::muon_npe(e, r, theta, phi), dt))
    }
}

impl ShowerTable for GaussianTable {
    fn calculate(
        &self,
        e: f64,
        d: f64,
        cd: f64,
        theta: f64,
        phi: f64,
        dt: f64,
    ) -> PdfResult<PdfValue> {
        Ok(self.response(Self::shower_npe(e, d, cd, theta, phi), dt))
    }
}

impl MuonNpe for GaussianTable {
    fn calculate(&self, e: f64, r: f64, theta: f64, phi: f64) -> PdfResult<f64> {
        if e >= MASS_MUON * INDEX_OF_REFRACTION_WATER {
            Ok(Self::muon_npe(e, r, theta, phi))
        } else {
            Ok(0.0)
        }
    }
}

impl ShowerNpe for GaussianTable {
    fn calculate(&self, e: f64, d: f64, cd: f64, theta: f64, phi: f64) -> PdfResult<f64> {
        Ok(Self::shower_npe(e, d, cd, theta, phi))
    }
}
