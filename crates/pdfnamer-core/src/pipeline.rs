//! Batch processing: acquire text for every document, build the shared
//! blacklist, name each document and make the names unique.

use crate::config::NamerConfig;
use crate::error::NamerError;
use crate::extraction::{OcrEngine, PageContent, PdfExtractor, TextSource};
use crate::heuristics::blacklist::Blacklist;
use crate::heuristics::entities::EntityRecognizer;
use crate::heuristics::patterns::NamePatterns;
use crate::heuristics::{self, ExtractionContext, HeuristicTrial};
use crate::model::{
    Candidate, FallbackReason, HeuristicKind, InputDocument, NameKind, NameOutcome, ResultRecord,
};
use crate::naming;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

pub struct Pipeline<'a> {
    config: &'a NamerConfig,
    extractor: &'a dyn PdfExtractor,
    ocr: Option<&'a dyn OcrEngine>,
    recognizer: Option<&'a dyn EntityRecognizer>,
    patterns: NamePatterns,
}

/// Everything the chain saw on one document, for tuning profiles.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub page_count: usize,
    pub ocr_pages: Vec<usize>,
    pub header_phrases: usize,
    pub trials: Vec<HeuristicTrial>,
    pub outcome: NameOutcome,
    pub derived_name: String,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a NamerConfig, extractor: &'a dyn PdfExtractor) -> Result<Self, NamerError> {
        Ok(Pipeline {
            config,
            extractor,
            ocr: None,
            recognizer: None,
            patterns: NamePatterns::from_config(config)?,
        })
    }

    pub fn with_ocr(mut self, ocr: &'a dyn OcrEngine) -> Self {
        self.ocr = Some(ocr);
        self
    }

    pub fn with_recognizer(mut self, recognizer: &'a dyn EntityRecognizer) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Extract every page, OCR'ing the blank ones when an engine is set.
    ///
    /// A failed OCR run is logged and leaves its page empty.
    pub fn acquire(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, NamerError> {
        let mut pages = self.extractor.extract_pages(pdf_bytes)?;

        let Some(ocr) = self.ocr else {
            return Ok(pages);
        };
        for page in pages.iter_mut().filter(|p| p.is_blank()) {
            match ocr.recognize_page(pdf_bytes, page.page_number) {
                Ok(recognized) => {
                    debug!(page = page.page_number, backend = ocr.backend_name(), "page recognized by OCR");
                    *page = PageContent {
                        page_number: page.page_number,
                        source: TextSource::Ocr,
                        ..recognized
                    };
                }
                Err(e) => warn!(page = page.page_number, error = %e, "OCR failed, page left empty"),
            }
        }
        Ok(pages)
    }

    /// Static keywords plus, when enabled, the header band of every document.
    pub fn build_blacklist<'p>(&self, documents: impl IntoIterator<Item = &'p [PageContent]>) -> Blacklist {
        let mut blacklist = Blacklist::from_terms(&self.config.blacklist_terms);
        if self.config.collect_header_blacklist {
            let added: usize = documents
                .into_iter()
                .map(|pages| blacklist.collect_header(pages, self.config.header_fraction))
                .sum();
            debug!(phrases = added, "collected header phrases");
        }
        blacklist
    }

    fn context<'b>(&'b self, blacklist: &'b Blacklist) -> ExtractionContext<'b> {
        ExtractionContext {
            config: self.config,
            patterns: &self.patterns,
            blacklist,
            recognizer: self.recognizer,
        }
    }

    /// Run the chain on one document. Always yields a usable name.
    pub fn extract_name(&self, pages: &[PageContent], blacklist: &Blacklist) -> NameOutcome {
        match heuristics::run_chain(pages, &self.context(blacklist)) {
            Some(candidate) => NameOutcome::Found(candidate),
            None => self.fallback(FallbackReason::NoCandidate),
        }
    }

    fn fallback(&self, reason: FallbackReason) -> NameOutcome {
        NameOutcome::Fallback {
            placeholder: naming::placeholder(&self.config.placeholder_marker),
            reason,
        }
    }

    fn manual(&self, name: &str) -> NameOutcome {
        let kind = if self.patterns.is_company_name(name) {
            NameKind::Organization
        } else {
            NameKind::Person
        };
        NameOutcome::Found(Candidate {
            text: name.trim().to_string(),
            source: HeuristicKind::Manual,
            kind,
        })
    }

    /// Name every document of a batch.
    ///
    /// `overrides` maps original filenames to names typed in by a human; they
    /// replace whatever the chain would find. Unreadable documents, including
    /// files that could not be read at all, get a placeholder and do not
    /// abort the batch. Records come back in input
    /// order with unique derived names.
    pub fn process_batch(
        &self,
        documents: Vec<InputDocument>,
        overrides: &BTreeMap<String, String>,
    ) -> Vec<ResultRecord> {
        let acquired: Vec<Result<Vec<PageContent>, NamerError>> = documents
            .iter()
            .map(|doc| {
                match &doc.read_error {
                    Some(reason) => Err(NamerError::Input(reason.clone())),
                    None => self.acquire(&doc.bytes),
                }
                .inspect_err(|e| {
                    warn!(document = %doc.original_name, error = %e, "could not read document");
                })
            })
            .collect();

        let blacklist = self.build_blacklist(
            acquired
                .iter()
                .filter_map(|r| r.as_ref().ok())
                .map(Vec::as_slice),
        );

        let outcomes: Vec<NameOutcome> = documents
            .iter()
            .zip(&acquired)
            .map(|(doc, pages)| match (overrides.get(&doc.original_name), pages) {
                (Some(name), _) => self.manual(name),
                (None, Ok(pages)) => self.extract_name(pages, &blacklist),
                (None, Err(e)) => self.fallback(FallbackReason::Unreadable(e.to_string())),
            })
            .collect();

        let mut names: Vec<String> = outcomes
            .iter()
            .map(|o| naming::build_filename(o.name(), self.config))
            .collect();
        naming::dedupe_filenames(&mut names);

        documents
            .into_iter()
            .zip(outcomes)
            .zip(names)
            .map(|((doc, outcome), derived_name)| {
                info!(
                    document = %doc.original_name,
                    derived = %derived_name,
                    fallback = outcome.is_fallback(),
                    "named document"
                );
                ResultRecord {
                    original_name: doc.original_name,
                    derived_name,
                    bytes: doc.bytes,
                    outcome,
                }
            })
            .collect()
    }

    /// Run every heuristic on one document without short-circuiting.
    pub fn inspect(&self, pdf_bytes: &[u8]) -> Result<Inspection, NamerError> {
        let pages = self.acquire(pdf_bytes)?;
        let blacklist = self.build_blacklist([pages.as_slice()]);
        let trials = heuristics::run_all(&pages, &self.context(&blacklist));
        let outcome = self.extract_name(&pages, &blacklist);
        let derived_name = naming::build_filename(outcome.name(), self.config);

        Ok(Inspection {
            page_count: pages.len(),
            ocr_pages: pages
                .iter()
                .filter(|p| p.source == TextSource::Ocr)
                .map(|p| p.page_number)
                .collect(),
            header_phrases: blacklist.phrase_count(),
            trials,
            outcome,
            derived_name,
        })
    }
}

/// Parse a manual correction of the form `ORIGINAL=NAME`.
///
/// Only the file name part of ORIGINAL is kept, so `scans/a.pdf=...` matches
/// the document `a.pdf`.
pub fn parse_override(value: &str) -> Result<(String, String), NamerError> {
    let (original, name) = value
        .split_once('=')
        .ok_or_else(|| NamerError::Override(value.to_string()))?;
    let original = Path::new(original.trim())
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = name.trim();
    if original.is_empty() || name.is_empty() {
        return Err(NamerError::Override(value.to_string()));
    }
    Ok((original, name.to_string()))
}
