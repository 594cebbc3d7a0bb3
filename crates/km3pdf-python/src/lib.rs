// ─────────────────────────────────────────────────────────────────────
// KM3 PDF Toolkit — Python Bindings
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! PyO3 bindings exposing the PDF evaluators, the muon energy loss and
//! the medium constants to Python, backed by the reference table.

use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use km3pdf_core::evaluator::{MuonPdf, PdfEvaluator, ShowerPdf};
use km3pdf_core::geane::{EnergyLoss, GeaneWater, GEANC};
use km3pdf_core::table::{GaussianTable, MuonNpe, ShowerNpe};
use km3pdf_types::config::PdfConfig;
use km3pdf_types::error::PdfError;
use km3pdf_types::{constants, result};

fn to_py_err(error: PdfError) -> PyErr {
    match error {
        PdfError::Domain { .. } | PdfError::TimeSmearing(_) => {
            PyValueError::new_err(error.to_string())
        }
        PdfError::Construction { .. } | PdfError::Io(_) => PyIOError::new_err(error.to_string()),
        PdfError::Json(_) => PyValueError::new_err(error.to_string()),
    }
}

// ─── Result value ───

/// Result of a single PDF lookup.
#[pyclass(name = "PdfValue")]
#[derive(Clone, Copy)]
struct PyPdfValue {
    #[pyo3(get)]
    f: f64,
    #[pyo3(get)]
    fp: f64,
    #[pyo3(get)]
    v: f64,
    #[pyo3(get, name = "V")]
    big_v: f64,
}

impl From<result::PdfValue> for PyPdfValue {
    fn from(value: result::PdfValue) -> Self {
        PyPdfValue {
            f: value.f,
            fp: value.fp,
            v: value.v,
            big_v: value.V,
        }
    }
}

#[pymethods]
impl PyPdfValue {
    fn __repr__(&self) -> String {
        format!(
            "PdfValue(f={}, fp={}, v={}, V={})",
            self.f, self.fp, self.v, self.big_v
        )
    }
}

type ArrayQuad<'py> = (
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray1<f64>>,
);

fn into_arrays(py: Python<'_>, arrays: result::PdfValueArray) -> ArrayQuad<'_> {
    (
        arrays.f.into_pyarray(py),
        arrays.fp.into_pyarray(py),
        arrays.v.into_pyarray(py),
        arrays.V.into_pyarray(py),
    )
}

// ─── Evaluators ───

/// Muon PDF evaluator over the reference table.
#[pyclass(name = "MuonPdf")]
struct PyMuonPdf {
    inner: MuonPdf<GeaneWater, GaussianTable>,
}

#[pymethods]
impl PyMuonPdf {
    /// `file_descriptor` is the PDF path pattern (e.g. "pdfs/J%p.dat"),
    /// `energy` the muon energy at the simulated vertex [GeV], `t0` the
    /// vertex time [ns] and `tts` the transit time spread [ns].
    #[new]
    #[pyo3(signature = (file_descriptor, energy = 0.0, t0 = 0.0, tts = 0.0))]
    fn new(file_descriptor: &str, energy: f64, t0: f64, tts: f64) -> PyResult<Self> {
        let config = PdfConfig::new(file_descriptor).with_tts(tts);
        let inner = MuonPdf::from_config(&config, energy, t0).map_err(to_py_err)?;
        Ok(PyMuonPdf { inner })
    }

    #[getter]
    fn energy(&self) -> f64 {
        self.inner.energy()
    }

    #[setter]
    fn set_energy(&mut self, energy: f64) {
        self.inner.set_energy(energy);
    }

    #[getter]
    fn t0(&self) -> f64 {
        self.inner.t0()
    }

    #[setter]
    fn set_t0(&mut self, t0: f64) {
        self.inner.set_t0(t0);
    }

    /// Evaluate the PDF for a single hit.
    fn evaluate(&self, d: f64, cd: f64, theta: f64, phi: f64, t_obs: f64) -> PyResult<PyPdfValue> {
        self.inner
            .evaluate(d, cd, theta, phi, t_obs)
            .map(PyPdfValue::from)
            .map_err(to_py_err)
    }

    /// Element-wise evaluation over numpy arrays; returns the
    /// (f, fp, v, V) arrays.
    #[allow(clippy::too_many_arguments)]
    fn evaluate_hits<'py>(
        &self,
        py: Python<'py>,
        d: PyReadonlyArray1<'py, f64>,
        cd: PyReadonlyArray1<'py, f64>,
        theta: PyReadonlyArray1<'py, f64>,
        phi: PyReadonlyArray1<'py, f64>,
        t_obs: PyReadonlyArray1<'py, f64>,
    ) -> PyResult<ArrayQuad<'py>> {
        let arrays = self
            .inner
            .evaluate_hits(
                d.as_array(),
                cd.as_array(),
                theta.as_array(),
                phi.as_array(),
                t_obs.as_array(),
            )
            .map_err(to_py_err)?;
        Ok(into_arrays(py, arrays))
    }
}

/// Shower PDF evaluator over the reference table.
#[pyclass(name = "ShowerPdf")]
struct PyShowerPdf {
    inner: ShowerPdf<GaussianTable>,
}

#[pymethods]
impl PyShowerPdf {
    #[new]
    #[pyo3(signature = (file_descriptor, energy = 0.0, t0 = 0.0, tts = 0.0))]
    fn new(file_descriptor: &str, energy: f64, t0: f64, tts: f64) -> PyResult<Self> {
        let config = PdfConfig::new(file_descriptor).with_tts(tts);
        let inner = ShowerPdf::from_config(&config, energy, t0).map_err(to_py_err)?;
        Ok(PyShowerPdf { inner })
    }

    #[getter]
    fn energy(&self) -> f64 {
        self.inner.energy()
    }

    #[setter]
    fn set_energy(&mut self, energy: f64) {
        self.inner.set_energy(energy);
    }

    #[getter]
    fn t0(&self) -> f64 {
        self.inner.t0()
    }

    #[setter]
    fn set_t0(&mut self, t0: f64) {
        self.inner.set_t0(t0);
    }

    /// Evaluate the PDF for a single hit.
    fn evaluate(&self, d: f64, cd: f64, theta: f64, phi: f64, t_obs: f64) -> PyResult<PyPdfValue> {
        self.inner
            .evaluate(d, cd, theta, phi, t_obs)
            .map(PyPdfValue::from)
            .map_err(to_py_err)
    }

    /// Element-wise evaluation over numpy arrays; returns the
    /// (f, fp, v, V) arrays.
    #[allow(clippy::too_many_arguments)]
    fn evaluate_hits<'py>(
        &self,
        py: Python<'py>,
        d: PyReadonlyArray1<'py, f64>,
        cd: PyReadonlyArray1<'py, f64>,
        theta: PyReadonlyArray1<'py, f64>,
        phi: PyReadonlyArray1<'py, f64>,
        t_obs: PyReadonlyArray1<'py, f64>,
    ) -> PyResult<ArrayQuad<'py>> {
        let arrays = self
            .inner
            .evaluate_hits(
                d.as_array(),
                cd.as_array(),
                theta.as_array(),
                phi.as_array(),
                t_obs.as_array(),
            )
            .map_err(to_py_err)?;
        Ok(into_arrays(py, arrays))
    }
}

// ─── Light yields ───

/// Expected number of photo-electrons from a muon track.
#[pyclass(name = "MuonNpe")]
struct PyMuonNpe {
    table: GaussianTable,
}

#[pymethods]
impl PyMuonNpe {
    #[new]
    #[pyo3(signature = (file_descriptor, tts = 0.0))]
    fn new(file_descriptor: &str, tts: f64) -> PyResult<Self> {
        let config = PdfConfig::new(file_descriptor).with_tts(tts);
        let table = GaussianTable::from_config(&config).map_err(to_py_err)?;
        Ok(PyMuonNpe { table })
    }

    /// Number of photo-electrons for a muon of energy `e` [GeV] at
    /// closest-approach distance `r` [m].
    fn calculate(&self, e: f64, r: f64, theta: f64, phi: f64) -> PyResult<f64> {
        MuonNpe::calculate(&self.table, e, r, theta, phi).map_err(to_py_err)
    }
}

/// Expected number of photo-electrons from a shower.
#[pyclass(name = "ShowerNpe")]
struct PyShowerNpe {
    table: GaussianTable,
}

#[pymethods]
impl PyShowerNpe {
    #[new]
    #[pyo3(signature = (file_descriptor,))]
    fn new(file_descriptor: &str) -> PyResult<Self> {
        let config = PdfConfig::new(file_descriptor);
        let table = GaussianTable::from_config(&config).map_err(to_py_err)?;
        Ok(PyShowerNpe { table })
    }

    /// Number of photo-electrons for a shower of energy `e` [GeV] at
    /// distance `d` [m] and cosine `cd` to the shower axis.
    fn calculate(&self, e: f64, d: f64, cd: f64, theta: f64, phi: f64) -> PyResult<f64> {
        ShowerNpe::calculate(&self.table, e, d, cd, theta, phi).map_err(to_py_err)
    }
}

// ─── Energy loss ───

/// Muon energy loss in sea water.
#[pyclass(name = "GeaneWater")]
struct PyGeaneWater {
    inner: GeaneWater,
}

#[pymethods]
impl PyGeaneWater {
    #[new]
    fn new() -> Self {
        PyGeaneWater {
            inner: GeaneWater::new(),
        }
    }

    fn get_a(&self) -> f64 {
        self.inner.a()
    }

    fn get_b(&self) -> f64 {
        self.inner.b()
    }

    /// Energy of the muon [GeV] after traveling `dx` [m].
    #[pyo3(name = "get_E")]
    fn get_energy(&self, e: f64, dx: f64) -> f64 {
        self.inner.energy_after(e, dx)
    }

    /// Distance traveled [m] while the energy drops from `e0` to `e1`.
    #[pyo3(name = "get_X")]
    fn get_range(&self, e0: f64, e1: f64) -> f64 {
        self.inner.range(e0, e1)
    }
}

/// Equivalent muon track length per unit shower energy [m/GeV].
#[pyfunction]
fn geanc() -> f64 {
    GEANC
}

// ─── Constants ───

#[pyfunction]
fn get_speed_of_light() -> f64 {
    constants::speed_of_light()
}

#[pyfunction]
fn get_inverse_speed_of_light() -> f64 {
    constants::inverse_speed_of_light()
}

#[pyfunction]
fn get_index_of_refraction() -> f64 {
    constants::index_of_refraction()
}

#[pyfunction]
fn get_index_of_refraction_phase() -> f64 {
    constants::index_of_refraction_phase()
}

#[pyfunction]
fn get_tan_theta_c() -> f64 {
    constants::tan_theta_c()
}

#[pyfunction]
fn get_cos_theta_c() -> f64 {
    constants::cos_theta_c()
}

#[pyfunction]
fn get_sin_theta_c() -> f64 {
    constants::sin_theta_c()
}

#[pyfunction]
fn get_kappa_c() -> f64 {
    constants::kappa_c()
}

#[pymodule]
fn km3pdf(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPdfValue>()?;
    m.add_class::<PyMuonPdf>()?;
    m.add_class::<PyShowerPdf>()?;
    m.add_class::<PyMuonNpe>()?;
    m.add_class::<PyShowerNpe>()?;
    m.add_class::<PyGeaneWater>()?;

    m.add_function(wrap_pyfunction!(geanc, m)?)?;
    m.add_function(wrap_pyfunction!(get_speed_of_light, m)?)?;
    m.add_function(wrap_pyfunction!(get_inverse_speed_of_light, m)?)?;
    m.add_function(wrap_pyfunction!(get_index_of_refraction, m)?)?;
    m.add_function(wrap_pyfunction!(get_index_of_refraction_phase, m)?)?;
    m.add_function(wrap_pyfunction!(get_tan_theta_c, m)?)?;
    m.add_function(wrap_pyfunction!(get_cos_theta_c, m)?)?;
    m.add_function(wrap_pyfunction!(get_sin_theta_c, m)?)?;
    m.add_function(wrap_pyfunction!(get_kappa_c, m)?)?;
    Ok(())
}
