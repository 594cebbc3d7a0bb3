use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("PDF construction failed: {message}")]
    Construction { message: String },

    #[error("invalid track geometry: D={d}, cd={cd} gives a negative closest-approach radicand")]
    Domain { d: f64, cd: f64 },

    #[error("illegal value of TTS [ns]: {0}")]
    TimeSmearing(f64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PdfResult<T> = Result<T, PdfError>;
