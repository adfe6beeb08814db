use pdfnamer_core::archive;
use pdfnamer_core::config::FilenameStyle;
use pdfnamer_core::error::NamerError;
use pdfnamer_core::extraction::ocr::TesseractOcr;
use pdfnamer_core::extraction::pdftotext::PdftotextExtractor;
use pdfnamer_core::heuristics::entities::PatternRecognizer;
use pdfnamer_core::model::InputDocument;
use pdfnamer_core::pipeline::{parse_override, Pipeline};
use pdfnamer_core::report::BatchReport;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::output;

pub struct RenameArgs {
    pub files: Vec<PathBuf>,
    pub archive: PathBuf,
    pub out_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub style: Option<FilenameStyle>,
    pub ocr: bool,
    pub entities: bool,
    pub overrides: Vec<String>,
    pub output_format: String,
    pub report: Option<PathBuf>,
}

pub fn run(args: RenameArgs) -> Result<(), NamerError> {
    let mut config = super::load_config(args.config.as_deref(), args.preset.as_deref())?;
    if let Some(style) = args.style {
        config.filename_style = style;
    }

    let overrides = args
        .overrides
        .iter()
        .map(|s| parse_override(s))
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    if !PdftotextExtractor::is_available() {
        return Err(NamerError::PdftotextNotFound);
    }

    let documents = read_inputs(&args.files);
    for original in overrides.keys() {
        if !documents.iter().any(|d| &d.original_name == original) {
            warn!(document = %original, "override does not match any input file");
        }
    }

    let extractor = PdftotextExtractor::new();
    let ocr = TesseractOcr::from_config(&config);
    let recognizer = PatternRecognizer::from_config(&config)?;

    let mut pipeline = Pipeline::new(&config, &extractor)?;
    if args.ocr {
        if TesseractOcr::is_available() {
            pipeline = pipeline.with_ocr(&ocr);
        } else {
            warn!("pdftoppm or tesseract not found, scanned pages will stay empty");
        }
    }
    if args.entities {
        pipeline = pipeline.with_recognizer(&recognizer);
    }

    let records = pipeline.process_batch(documents, &overrides);

    archive::write_archive(&records, config.archive_folder.as_deref(), &args.archive)?;
    info!(path = %args.archive.display(), entries = records.len(), "archive written");

    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)?;
        for record in records.iter().filter(|r| !r.bytes.is_empty()) {
            std::fs::write(dir.join(&record.derived_name), &record.bytes)?;
        }
    }

    let report = BatchReport::from_records(&records);
    if let Some(path) = &args.report {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }

    match args.output_format.as_str() {
        "json" => output::json::print(&report)?,
        _ => output::table::print_report(&report, &args.archive),
    }

    Ok(())
}

/// Read every input file. A file that cannot be read is logged and kept as
/// an unreadable document so the rest of the batch still goes through.
fn read_inputs(files: &[PathBuf]) -> Vec<InputDocument> {
    files
        .iter()
        .map(|path| {
            let name = super::display_name(path);
            match std::fs::read(path) {
                Ok(bytes) => InputDocument::new(name, bytes),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "could not read input file");
                    InputDocument::unreadable(name, e.to_string())
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_inputs_kept_in_order() {
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let files = vec![
            PathBuf::from("/nonexistent/scan_001.pdf"),
            manifest,
            std::env::temp_dir(),
        ];

        let documents = read_inputs(&files);

        assert_eq!(documents.len(), 3);
        assert_eq!(documents[0].original_name, "scan_001.pdf");
        assert!(documents[0].read_error.is_some());
        assert!(documents[1].read_error.is_none());
        assert!(!documents[1].bytes.is_empty());
        // a directory is not a readable file
        assert!(documents[2].read_error.is_some());
    }
}
