// ─────────────────────────────────────────────────────────────────────
// KM3 PDF Toolkit — Result Values
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Value objects returned by probability-table lookups.
//!
//! A lookup yields the probability density together with its time
//! derivative and two cumulative quantities. The evaluator layer passes
//! these through unchanged; only the table implementations interpret
//! their internals.

use ndarray::Array1;

/// Result of a single PDF lookup.
///
/// Field names follow the reference toolkit's `JResultPDF`:
/// `f` is the probability density [npe/ns], `fp` its time derivative
/// [npe/ns^2], `v` the cumulative content up to the evaluation time
/// [npe] and `V` the total content [npe].
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(non_snake_case)]
pub struct PdfValue {
    pub f: f64,
    pub fp: f64,
    pub v: f64,
    pub V: f64,
}

impl PdfValue {
    pub const ZERO: PdfValue = PdfValue {
        f: 0.0,
        fp: 0.0,
        v: 0.0,
        V: 0.0,
    };
}

/// Struct-of-arrays result for the vectorized evaluation path.
///
/// One entry per hit, in input order.
#[derive(Debug, Clone)]
#[allow(non_snake_case)]
pub struct PdfValueArray {
    pub f: Array1<f64>,
    pub fp: Array1<f64>,
    pub v: Array1<f64>,
    pub V: Array1<f64>,
}

impl PdfValueArray {
    pub fn len(&self) -> usize {
        self.f.len()
    }

    pub fn is_empty(&self) -> bool {
        self.f.is_empty()
    }
}

impl FromIterator<PdfValue> for PdfValueArray {
    fn from_iter<I: IntoIterator<Item = PdfValue>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut f = Vec::with_capacity(lower);
        let mut fp = Vec::with_capacity(lower);
        let mut v = Vec::with_capacity(lower);
        let mut big_v = Vec::with_capacity(lower);

        for value in iter {
            f.push(value.f);
            fp.push(value.fp);
            v.push(value.v);
            big_v.push(value.V);
        }

        PdfValueArray {
            f: Array1::from_vec(f),
            fp: Array1::from_vec(fp),
            v: Array1::from_vec(v),
            V: Array1::from_vec(big_v),
        }
    }
}
