pub mod archive;
pub mod config;
pub mod error;
pub mod extraction;
pub mod heuristics;
pub mod model;
pub mod naming;
pub mod pipeline;
pub mod report;

use config::NamerConfig;
use error::NamerError;
use extraction::PdfExtractor;
use model::InputDocument;
use pipeline::Pipeline;
use report::BatchReport;
use std::collections::BTreeMap;

/// Result of renaming a batch: the zip archive bytes plus the report.
#[derive(Debug)]
pub struct RenameOutput {
    pub archive: Vec<u8>,
    pub report: BatchReport,
}

/// Main API entry point: rename a batch of PDFs and pack them into one zip.
///
/// Uses the embedded-text extractor only (no OCR, no entity recognizer).
/// Build a [`Pipeline`] directly for more control.
pub fn rename_pdfs(
    documents: Vec<InputDocument>,
    extractor: &dyn PdfExtractor,
    config: &NamerConfig,
) -> Result<RenameOutput, NamerError> {
    let pipeline = Pipeline::new(config, extractor)?;
    let records = pipeline.process_batch(documents, &BTreeMap::new());
    let archive = archive::build_archive(&records, config.archive_folder.as_deref())?;

    Ok(RenameOutput {
        archive,
        report: BatchReport::from_records(&records),
    })
}
