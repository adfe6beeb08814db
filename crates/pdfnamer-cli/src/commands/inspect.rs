use pdfnamer_core::error::NamerError;
use pdfnamer_core::extraction::ocr::TesseractOcr;
use pdfnamer_core::extraction::pdftotext::PdftotextExtractor;
use pdfnamer_core::heuristics::entities::PatternRecognizer;
use pdfnamer_core::pipeline::Pipeline;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    config_file: Option<PathBuf>,
    preset: Option<String>,
    ocr: bool,
    output_format: &str,
) -> Result<(), NamerError> {
    let config = super::load_config(config_file.as_deref(), preset.as_deref())?;

    if !PdftotextExtractor::is_available() {
        return Err(NamerError::PdftotextNotFound);
    }

    let pdf_bytes = std::fs::read(&input_file)?;
    let extractor = PdftotextExtractor::new();
    let tesseract = TesseractOcr::from_config(&config);
    let recognizer = PatternRecognizer::from_config(&config)?;

    let mut pipeline = Pipeline::new(&config, &extractor)?.with_recognizer(&recognizer);
    if ocr && TesseractOcr::is_available() {
        pipeline = pipeline.with_ocr(&tesseract);
    }

    let inspection = pipeline.inspect(&pdf_bytes)?;

    match output_format {
        "json" => output::json::print(&inspection)?,
        _ => output::table::print_inspection(&super::display_name(&input_file), &inspection),
    }

    Ok(())
}
