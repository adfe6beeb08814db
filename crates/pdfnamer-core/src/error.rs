use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum NamerError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("could not read input file: {0}")]
    Input(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("{tool} not found. Install poppler-utils and tesseract-ocr (with the '{language}' language pack) to enable OCR")]
    OcrToolNotFound { tool: String, language: String },

    #[error("OCR of page {page} failed: {reason}")]
    OcrFailed { page: usize, reason: String },

    #[error("OCR of page {page} exceeded {seconds}s and was aborted")]
    OcrTimeout { page: usize, seconds: u64 },

    #[error("failed to load profile from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("invalid profile: {0}")]
    ProfileInvalid(String),

    #[error("invalid override '{0}': expected ORIGINAL=NAME")]
    Override(String),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
