// ─────────────────────────────────────────────────────────────────────
// KM3 PDF Toolkit — PDF Evaluators
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Event-by-event PDF evaluation for track and shower hypotheses.
//!
//! Hits are supplied relative to the simulated vertex: distance `d`
//! [m], closest-approach cosine `cd` (angle between the particle
//! direction and the PMT position), PMT angles `theta`/`phi` [rad] and
//! observed hit time `t_obs` [ns]. The evaluators derive the
//! detector-frame lookup arguments and delegate to the injected
//! probability table; the table result is returned unchanged.
//!
//! Evaluators are cheap, per-hypothesis objects. The energy-loss model
//! and tables they reference are shared, read-only collaborators.

use std::sync::Arc;

use ndarray::ArrayView1;

use km3pdf_types::config::PdfConfig;
use km3pdf_types::constants::{C_INVERSE, INDEX_OF_REFRACTION_WATER, KAPPA_WATER};
use km3pdf_types::error::{PdfError, PdfResult};
use km3pdf_types::result::{PdfValue, PdfValueArray};

use crate::geane::{EnergyLoss, GeaneWater};
use crate::table::{GaussianTable, MuonTable, ShowerTable};

/// Handling of hits where `(d + dz)(d - dz) < 0`, i.e. `|cd| > 1`, for
/// which the closest-approach distance is undefined.
///
/// The policy only governs finite negative radicands. A non-finite
/// radicand (NaN or infinite input) always fails with
/// [`PdfError::Domain`]: clamping it would still leak NaN into the
/// longitudinal offset and the time residual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryPolicy {
    /// Fail with [`PdfError::Domain`].
    #[default]
    Reject,
    /// Clamp the radicand to zero; the hit degenerates onto the track.
    Clamp,
}

/// Common contract of the PDF evaluators.
///
/// `energy` [GeV] and `t0` [ns] describe the hypothesis at the
/// simulated vertex and may be updated in place to reuse one evaluator
/// across hypotheses. Setters coerce any lossless numeric type; no
/// range validation is performed, non-physical values are passed on to
/// the table, which applies its own floors.
pub trait PdfEvaluator {
    fn energy(&self) -> f64;
    fn set_energy(&mut self, energy: impl Into<f64>);
    fn t0(&self) -> f64;
    fn set_t0(&mut self, t0: impl Into<f64>);

    /// Evaluate the PDF for a single hit.
    fn evaluate(&self, d: f64, cd: f64, theta: f64, phi: f64, t_obs: f64) -> PdfResult<PdfValue>;
}

/// Track hypothesis state shared by the evaluators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexHypothesis {
    pub energy: f64,
    pub t0: f64,
}

impl VertexHypothesis {
    pub fn new(energy: impl Into<f64>, t0: impl Into<f64>) -> Self {
        VertexHypothesis {
            energy: energy.into(),
            t0: t0.into(),
        }
    }
}

/// Muon PDF evaluator.
///
/// `energy` is the muon energy at the simulated vertex (the neutrino
/// interaction vertex, or the can interception for atmospheric muons);
/// `t0` the time of that vertex [ns].
pub struct MuonPdf<L: EnergyLoss, T: MuonTable> {
    hypothesis: VertexHypothesis,
    loss: Arc<L>,
    table: Arc<T>,
    policy: GeometryPolicy,
}

impl MuonPdf<GeaneWater, GaussianTable> {
    /// Reference-table evaluator with the sea-water energy loss.
    pub fn from_config(
        config: &PdfConfig,
        energy: impl Into<f64>,
        t0: impl Into<f64>,
    ) -> PdfResult<Self> {
        Ok(MuonPdf::new(
            Arc::new(GeaneWater::new()),
            Arc::new(GaussianTable::from_config(config)?),
            energy,
            t0,
        ))
    }
}

impl<L: EnergyLoss, T: MuonTable> MuonPdf<L, T> {
    pub fn new(loss: Arc<L>, table: Arc<T>, energy: impl Into<f64>, t0: impl Into<f64>) -> Self {
        MuonPdf {
            hypothesis: VertexHypothesis::new(energy, t0),
            loss,
            table,
            policy: GeometryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: GeometryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> GeometryPolicy {
        self.policy
    }

    /// Element-wise evaluation over per-hit arrays.
    ///
    /// All views must have equal length; the transform carries no
    /// cross-element dependency.
    pub fn evaluate_hits(
        &self,
        d: ArrayView1<f64>,
        cd: ArrayView1<f64>,
        theta: ArrayView1<f64>,
        phi: ArrayView1<f64>,
        t_obs: ArrayView1<f64>,
    ) -> PdfResult<PdfValueArray> {
        evaluate_hits(self, d, cd, theta, phi, t_obs)
    }
}

impl<L: EnergyLoss, T: MuonTable> PdfEvaluator for MuonPdf<L, T> {
    fn energy(&self) -> f64 {
        self.hypothesis.energy
    }

    fn set_energy(&mut self, energy: impl Into<f64>) {
        self.hypothesis.energy = energy.into();
    }

    fn t0(&self) -> f64 {
        self.hypothesis.t0
    }

    fn set_t0(&mut self, t0: impl Into<f64>) {
        self.hypothesis.t0 = t0.into();
    }

    fn evaluate(&self, d: f64, cd: f64, theta: f64, phi: f64, t_obs: f64) -> PdfResult<PdfValue> {
        // Longitudinal offset from the vertex to the point of closest
        // approach, and the perpendicular distance at that point.
        let dz = d * cd;
        let radicand = (d + dz) * (d - dz);
        let r = if radicand >= 0.0 {
            radicand.sqrt()
        } else if radicand.is_finite() {
            match self.policy {
                GeometryPolicy::Reject => return Err(PdfError::Domain { d, cd }),
                GeometryPolicy::Clamp => 0.0,
            }
        } else {
            // NaN or infinite inputs poison dz and dt as well; no
            // policy can clamp those away.
            return Err(PdfError::Domain { d, cd });
        };

        // Muon energy after traveling dz through the medium.
        let e = self.loss.energy_after(self.hypothesis.energy, dz);

        // Track propagation plus the Cherenkov-cone delay for light
        // crossing the perpendicular distance.
        let t_exp = self.hypothesis.t0 + (dz + r * KAPPA_WATER) * C_INVERSE;
        let dt = t_obs - t_exp;

        self.table.calculate(e, r, theta, phi, dt)
    }
}

/// Shower PDF evaluator.
///
/// Showers are treated as point sources: light travels directly from
/// the vertex to the PMT at the group velocity of the medium. `cd` does
/// not enter the timing; it is forwarded to the table, which resolves
/// the emission-angle dependence.
pub struct ShowerPdf<T: ShowerTable> {
    hypothesis: VertexHypothesis,
    table: Arc<T>,
}

impl ShowerPdf<GaussianTable> {
    /// Reference-table evaluator.
    pub fn from_config(
        config: &PdfConfig,
        energy: impl Into<f64>,
        t0: impl Into<f64>,
    ) -> PdfResult<Self> {
        Ok(ShowerPdf::new(
            Arc::new(GaussianTable::from_config(config)?),
            energy,
            t0,
        ))
    }
}

impl<T: ShowerTable> ShowerPdf<T> {
    pub fn new(table: Arc<T>, energy: impl Into<f64>, t0: impl Into<f64>) -> Self {
        ShowerPdf {
            hypothesis: VertexHypothesis::new(energy, t0),
            table,
        }
    }

    /// Element-wise evaluation over per-hit arrays.
    pub fn evaluate_hits(
        &self,
        d: ArrayView1<f64>,
        cd: ArrayView1<f64>,
        theta: ArrayView1<f64>,
        phi: ArrayView1<f64>,
        t_obs: ArrayView1<f64>,
    ) -> PdfResult<PdfValueArray> {
        evaluate_hits(self, d, cd, theta, phi, t_obs)
    }
}

impl<T: ShowerTable> PdfEvaluator for ShowerPdf<T> {
    fn energy(&self) -> f64 {
        self.hypothesis.energy
    }

    fn set_energy(&mut self, energy: impl Into<f64>) {
        self.hypothesis.energy = energy.into();
    }

    fn t0(&self) -> f64 {
        self.hypothesis.t0
    }

    fn set_t0(&mut self, t0: impl Into<f64>) {
        self.hypothesis.t0 = t0.into();
    }

    fn evaluate(&self, d: f64, cd: f64, theta: f64, phi: f64, t_obs: f64) -> PdfResult<PdfValue> {
        let t_exp = self.hypothesis.t0 + d * C_INVERSE * INDEX_OF_REFRACTION_WATER;
        let dt = t_obs - t_exp;

        self.table
            .calculate(self.hypothesis.energy, d, cd, theta, phi, dt)
    }
}

fn evaluate_hits<E: PdfEvaluator>(
    evaluator: &E,
    d: ArrayView1<f64>,
    cd: ArrayView1<f64>,
    theta: ArrayView1<f64>,
    phi: ArrayView1<f64>,
    t_obs: ArrayView1<f64>,
) -> PdfResult<PdfValueArray> {
    let n = d.len();
    assert!(
        cd.len() == n && theta.len() == n && phi.len() == n && t_obs.len() == n,
        "hit arrays must have equal length"
    );

    let mut values = Vec::with_capacity(n);
    for i in 0..n {
        values.push(evaluator.evaluate(d[i], cd[i], theta[i], phi[i], t_obs[i])?);
    }
    Ok(values.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::sync::Mutex;

    /// Table spy recording the arguments of the last lookup.
    #[derive(Default)]
    struct Spy {
        muon: Mutex<Option<(f64, f64, f64, f64, f64)>>,
        shower: Mutex<Option<(f64, f64, f64, f64, f64, f64)>>,
    }

    impl MuonTable for Spy {
        fn calculate(&self, e: f64, r: f64, theta: f64, phi: f64, dt: f64) -> PdfResult<PdfValue> {
            *self.muon.lock().unwrap() = Some((e, r, theta, phi, dt));
            Ok(PdfValue::ZERO)
        }
    }

    impl ShowerTable for Spy {
        fn calculate(
            &self,
            e: f64,
            d: f64,
            cd: f64,
            theta: f64,
            phi: f64,
            dt: f64,
        ) -> PdfResult<PdfValue> {
            *self.shower.lock().unwrap() = Some((e, d, cd, theta, phi, dt));
            Ok(PdfValue::ZERO)
        }
    }

    fn muon_with_spy(energy: f64, t0: f64) -> (MuonPdf<GeaneWater, Spy>, Arc<Spy>) {
        let spy = Arc::new(Spy::default());
        let pdf = MuonPdf::new(Arc::new(GeaneWater::new()), Arc::clone(&spy), energy, t0);
        (pdf, spy)
    }

    fn shower_with_spy(energy: f64, t0: f64) -> (ShowerPdf<Spy>, Arc<Spy>) {
        let spy = Arc::new(Spy::default());
        let pdf = ShowerPdf::new(Arc::clone(&spy), energy, t0);
        (pdf, spy)
    }

    #[test]
    fn test_muon_transform_reference_scenario() {
        // Reference toolkit scenario: energy=1000 GeV, t0=56 ns,
        // D=50 m, cd=0.7, theta=1.57, phi=3.14, t_obs=292 ns.
        let (pdf, spy) = muon_with_spy(1.0e3, 56.0);
        pdf.evaluate(50.0, 0.7, 1.57, 3.14, 292.0).unwrap();

        let (e, r, theta, phi, dt) = spy.muon.lock().unwrap().unwrap();
        assert!((e - 978.0833282205873).abs() < 1e-9);
        assert!((r - 35.70714214271425).abs() < 1e-12);
        assert_eq!(theta, 1.57);
        assert_eq!(phi, 3.14);
        assert!((dt - 4.9106092955624945).abs() < 1e-10);
    }

    #[test]
    fn test_shower_transform_reference_scenario() {
        // Reference toolkit scenario: energy=50 GeV, t0=198 ns,
        // D=5 m, cd=0.6, theta=0.5, phi=0.4, t_obs=226 ns.
        let (pdf, spy) = shower_with_spy(50.0, 198.0);
        pdf.evaluate(5.0, 0.6, 0.5, 0.4, 226.0).unwrap();

        let (e, d, cd, theta, phi, dt) = spy.shower.lock().unwrap().unwrap();
        assert_eq!(e, 50.0);
        assert_eq!(d, 5.0);
        assert_eq!(cd, 0.6);
        assert_eq!(theta, 0.5);
        assert_eq!(phi, 0.4);
        assert!((dt - 4.982657645777067).abs() < 1e-10);
    }

    #[test]
    fn test_muon_perpendicular_hit_matches_cone_timing() {
        // cd = 0: closest approach coincides with the hit point, so
        // dz = 0, R = D and t_exp = t0 + D * kappa / c.
        let (pdf, spy) = muon_with_spy(1.0e3, 100.0);
        pdf.evaluate(20.0, 0.0, 1.0, 2.0, 250.0).unwrap();

        let (e, r, _, _, dt) = spy.muon.lock().unwrap().unwrap();
        assert!((e - 1.0e3).abs() < 1e-9);
        assert_eq!(r, 20.0);
        let t_exp = 100.0 + 20.0 * KAPPA_WATER * C_INVERSE;
        assert!((dt - (250.0 - t_exp)).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_geometry_rejected_by_default() {
        let (pdf, _) = muon_with_spy(1.0e3, 0.0);
        match pdf.evaluate(10.0, 1.5, 1.0, 2.0, 50.0) {
            Err(PdfError::Domain { d, cd }) => {
                assert_eq!(d, 10.0);
                assert_eq!(cd, 1.5);
            }
            other => panic!("expected Domain error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_geometry_clamped_on_request() {
        let (pdf, spy) = muon_with_spy(1.0e3, 0.0);
        let pdf = pdf.with_policy(GeometryPolicy::Clamp);
        pdf.evaluate(10.0, 1.5, 1.0, 2.0, 50.0).unwrap();

        let (_, r, _, _, dt) = spy.muon.lock().unwrap().unwrap();
        assert_eq!(r, 0.0);
        assert!(dt.is_finite());
    }

    #[test]
    fn test_nan_input_never_reaches_table() {
        let (pdf, spy) = muon_with_spy(1.0e3, 0.0);
        assert!(pdf.evaluate(f64::NAN, 0.5, 1.0, 2.0, 50.0).is_err());
        assert!(spy.muon.lock().unwrap().is_none());
    }

    #[test]
    fn test_nan_input_rejected_even_under_clamp() {
        // Clamping covers finite negative radicands only; a NaN
        // distance or cosine still poisons dz and dt and must fail.
        let (pdf, spy) = muon_with_spy(1.0e3, 0.0);
        let pdf = pdf.with_policy(GeometryPolicy::Clamp);

        for (d, cd) in [(10.0, f64::NAN), (f64::NAN, 0.5), (f64::NAN, f64::NAN)] {
            match pdf.evaluate(d, cd, 1.0, 2.0, 50.0) {
                Err(PdfError::Domain { .. }) => {}
                other => panic!("expected Domain error for d={d}, cd={cd}, got {other:?}"),
            }
        }
        assert!(spy.muon.lock().unwrap().is_none());
    }

    #[test]
    fn test_setters_coerce_to_float() {
        let (mut pdf, _) = muon_with_spy(0.0, 0.0);
        pdf.set_energy(1000_i32);
        pdf.set_t0(56_u16);
        assert_eq!(pdf.energy(), 1000.0);
        assert_eq!(pdf.t0(), 56.0);
    }

    #[test]
    fn test_shower_time_shift_invariance() {
        let (mut pdf, spy) = shower_with_spy(50.0, 198.0);
        pdf.evaluate(5.0, 0.6, 0.5, 0.4, 226.0).unwrap();
        let (.., dt_before) = spy.shower.lock().unwrap().unwrap();

        pdf.set_t0(198.0 + 7.5);
        pdf.evaluate(5.0, 0.6, 0.5, 0.4, 226.0).unwrap();
        let (.., dt_after) = spy.shower.lock().unwrap().unwrap();

        assert!((dt_before - dt_after - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_idempotent() {
        let config = PdfConfig::new("pdfs/J%p.dat");
        let pdf = MuonPdf::from_config(&config, 1.0e3, 56.0).unwrap();
        let first = pdf.evaluate(50.0, 0.7, 1.57, 3.14, 292.0).unwrap();
        let second = pdf.evaluate(50.0, 0.7, 1.57, 3.14, 292.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_vectorized_matches_scalar() {
        let config = PdfConfig::new("pdfs/J%p.dat").with_tts(2.0);
        let pdf = ShowerPdf::from_config(&config, 50.0, 198.0).unwrap();

        let d = array![5.0, 10.0, 20.0];
        let cd = array![0.6, -0.2, 0.0];
        let theta = array![0.5, 1.0, 1.5];
        let phi = array![0.4, 2.0, 3.0];
        let t_obs = array![226.0, 250.0, 300.0];

        let arrays = pdf
            .evaluate_hits(d.view(), cd.view(), theta.view(), phi.view(), t_obs.view())
            .unwrap();

        assert_eq!(arrays.len(), 3);
        for i in 0..3 {
            let scalar = pdf
                .evaluate(d[i], cd[i], theta[i], phi[i], t_obs[i])
                .unwrap();
            assert_eq!(arrays.f[i], scalar.f);
            assert_eq!(arrays.fp[i], scalar.fp);
            assert_eq!(arrays.v[i], scalar.v);
            assert_eq!(arrays.V[i], scalar.V);
        }
    }

    #[test]
    fn test_vectorized_reports_first_invalid_hit() {
        let (pdf, _) = muon_with_spy(1.0e3, 0.0);
        let d = array![10.0, 10.0];
        let cd = array![0.5, 1.5];
        let angle = array![1.0, 1.0];
        let t_obs = array![50.0, 50.0];

        let result = pdf.evaluate_hits(d.view(), cd.view(), angle.view(), angle.view(), t_obs.view());
        assert!(matches!(result, Err(PdfError::Domain { cd, .. }) if cd == 1.5));
    }
}
