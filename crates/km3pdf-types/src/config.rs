// ─────────────────────────────────────────────────────────────────────
// KM3 PDF Toolkit — Configuration
// License: MIT
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::error::{PdfError, PdfResult};

/// Probability-table construction parameters.
///
/// `file_descriptor` is a path pattern with a per-table placeholder
/// (e.g. `"pdfs/J%p.dat"`); it is consumed by the external table loader
/// and carried opaquely here. `tts` is the transit time spread of the
/// PMTs [ns], applied by the loader as additional smearing of the
/// tables; `number_of_points` and `epsilon` steer the Gauss-Hermite
/// integration of that smearing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfConfig {
    pub file_descriptor: String,
    #[serde(default)]
    pub tts: f64,
    #[serde(default = "default_number_of_points")]
    pub number_of_points: usize,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_number_of_points() -> usize {
    25
}

fn default_epsilon() -> f64 {
    1.0e-10
}

impl PdfConfig {
    /// Configuration for the given file descriptor with no time smearing.
    pub fn new(file_descriptor: impl Into<String>) -> Self {
        PdfConfig {
            file_descriptor: file_descriptor.into(),
            tts: 0.0,
            number_of_points: default_number_of_points(),
            epsilon: default_epsilon(),
        }
    }

    /// Same configuration with the given transit time spread [ns].
    pub fn with_tts(mut self, tts: f64) -> Self {
        self.tts = tts;
        self
    }

    /// Load from a JSON file.
    pub fn from_file(path: &str) -> PdfResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter combinations the table loader cannot honor.
    pub fn validate(&self) -> PdfResult<()> {
        if self.tts < 0.0 {
            return Err(PdfError::TimeSmearing(self.tts));
        }
        if self.file_descriptor.is_empty() {
            return Err(PdfError::Construction {
                message: "empty PDF file descriptor".into(),
            });
        }
        Ok(())
    }
}
