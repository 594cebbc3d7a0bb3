// ─────────────────────────────────────────────────────────────────────
// KM3 PDF Toolkit — Property-Based Tests (proptest) for the evaluators
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Properties of the vertex-to-detector kinematic transform.

use std::sync::{Arc, Mutex};

use proptest::prelude::*;

use km3pdf_core::evaluator::{MuonPdf, PdfEvaluator, ShowerPdf};
use km3pdf_core::geane::{EnergyLoss, GeaneWater};
use km3pdf_core::table::{MuonTable, ShowerTable};
use km3pdf_types::config::PdfConfig;
use km3pdf_types::constants::{C_INVERSE, KAPPA_WATER};
use km3pdf_types::error::PdfResult;
use km3pdf_types::result::PdfValue;

/// Records the closest-approach distance and time residual of each lookup.
#[derive(Default)]
struct Recorder {
    muon: Mutex<Option<(f64, f64)>>,
    shower_dt: Mutex<Option<f64>>,
}

impl MuonTable for Recorder {
    fn calculate(&self, _e: f64, r: f64, _theta: f64, _phi: f64, dt: f64) -> PdfResult<PdfValue> {
        *self.muon.lock().unwrap() = Some((r, dt));
        Ok(PdfValue::ZERO)
    }
}

impl ShowerTable for Recorder {
    fn calculate(
        &self,
        _e: f64,
        _d: f64,
        _cd: f64,
        _theta: f64,
        _phi: f64,
        dt: f64,
    ) -> PdfResult<PdfValue> {
        *self.shower_dt.lock().unwrap() = Some(dt);
        Ok(PdfValue::ZERO)
    }
}

proptest! {
    /// Physical geometry (|cd| <= 1, D >= 0) always yields a real,
    /// non-negative closest-approach distance bounded by D.
    #[test]
    fn muon_geometry_always_valid(
        d in 0.0f64..500.0,
        cd in -1.0f64..=1.0,
        t_obs in -100.0f64..1000.0,
    ) {
        let recorder = Arc::new(Recorder::default());
        let pdf = MuonPdf::new(
            Arc::new(GeaneWater::new()),
            Arc::clone(&recorder),
            1.0e3,
            0.0,
        );

        prop_assert!(pdf.evaluate(d, cd, 1.0, 2.0, t_obs).is_ok());

        let (r, dt) = recorder.muon.lock().unwrap().unwrap();
        prop_assert!(r.is_finite(), "R not finite: {}", r);
        prop_assert!(r >= 0.0, "R negative: {}", r);
        prop_assert!(r <= d + 1e-9, "R exceeds D: {} > {}", r, d);
        prop_assert!(dt.is_finite());
    }

    /// Shifting t0 by delta shifts the time residual by exactly -delta.
    #[test]
    fn shower_time_shift_invariance(
        d in 0.1f64..200.0,
        cd in -1.0f64..=1.0,
        t0 in 0.0f64..500.0,
        delta in -50.0f64..50.0,
    ) {
        let recorder = Arc::new(Recorder::default());
        let mut pdf = ShowerPdf::new(Arc::clone(&recorder), 50.0, t0);

        pdf.evaluate(d, cd, 0.5, 0.4, 300.0).unwrap();
        let dt_before = recorder.shower_dt.lock().unwrap().unwrap();

        pdf.set_t0(t0 + delta);
        pdf.evaluate(d, cd, 0.5, 0.4, 300.0).unwrap();
        let dt_after = recorder.shower_dt.lock().unwrap().unwrap();

        prop_assert!((dt_before - dt_after - delta).abs() < 1e-9,
            "dt shift {} != delta {}", dt_before - dt_after, delta);
    }

    /// A perpendicular muon hit (cd = 0) times like a point on the
    /// Cherenkov cone: t_exp = t0 + D * kappa / c.
    #[test]
    fn muon_reduces_to_cone_timing_at_cd_zero(
        d in 0.0f64..500.0,
        t0 in 0.0f64..500.0,
        t_obs in 0.0f64..1000.0,
    ) {
        let recorder = Arc::new(Recorder::default());
        let pdf = MuonPdf::new(
            Arc::new(GeaneWater::new()),
            Arc::clone(&recorder),
            1.0e3,
            t0,
        );

        pdf.evaluate(d, 0.0, 1.0, 2.0, t_obs).unwrap();
        let (r, dt) = recorder.muon.lock().unwrap().unwrap();

        prop_assert!((r - d).abs() < 1e-9);
        let expected = t_obs - (t0 + d * KAPPA_WATER * C_INVERSE);
        prop_assert!((dt - expected).abs() < 1e-9);
    }

    /// Repeated evaluation with no hypothesis mutation is bit-identical.
    #[test]
    fn evaluation_is_idempotent(
        d in 0.1f64..200.0,
        cd in -1.0f64..=1.0,
        t_obs in -100.0f64..1000.0,
    ) {
        let config = PdfConfig::new("pdfs/J%p.dat").with_tts(2.0);
        let muon = MuonPdf::from_config(&config, 1.0e3, 56.0).unwrap();
        let shower = ShowerPdf::from_config(&config, 50.0, 198.0).unwrap();

        let m1 = muon.evaluate(d, cd, 1.0, 2.0, t_obs).unwrap();
        let m2 = muon.evaluate(d, cd, 1.0, 2.0, t_obs).unwrap();
        prop_assert_eq!(m1, m2);

        let s1 = shower.evaluate(d, cd, 1.0, 2.0, t_obs).unwrap();
        let s2 = shower.evaluate(d, cd, 1.0, 2.0, t_obs).unwrap();
        prop_assert_eq!(s1, s2);
    }

    /// Energy at closest approach never exceeds the vertex energy for
    /// forward geometries, and stays non-negative.
    #[test]
    fn muon_energy_loss_bounded(
        e in 1.0f64..1.0e5,
        dx in 0.0f64..2000.0,
    ) {
        let water = GeaneWater::new();
        let after = water.energy_after(e, dx);
        prop_assert!(after >= 0.0);
        prop_assert!(after <= e + 1e-9, "energy gained: {} -> {}", e, after);
    }
}
