pub mod address;
pub mod anchor;
pub mod blacklist;
pub mod entities;
pub mod patterns;
pub mod region;
pub mod top_lines;

use crate::config::NamerConfig;
use crate::extraction::PageContent;
use crate::model::{Candidate, HeuristicKind, NameKind};
use blacklist::Blacklist;
use entities::EntityRecognizer;
use patterns::{normalize_ws, NamePatterns};
use serde::Serialize;
use tracing::{debug, trace};

/// Everything a heuristic may consult besides the document itself.
pub struct ExtractionContext<'a> {
    pub config: &'a NamerConfig,
    pub patterns: &'a NamePatterns,
    pub blacklist: &'a Blacklist,
    pub recognizer: Option<&'a dyn EntityRecognizer>,
}

impl ExtractionContext<'_> {
    /// Clean raw text and reject it if it is empty or blacklisted.
    ///
    /// Commas are dropped and a leading salutation ("Herr", "Frau") is
    /// stripped so it never ends up in a filename.
    pub fn screen(&self, raw: &str) -> Option<String> {
        let mut text = normalize_ws(&raw.replace(',', ""));

        if let Some((first, rest)) = text.split_once(' ') {
            let is_salutation = self
                .config
                .salutations
                .iter()
                .any(|s| s.eq_ignore_ascii_case(first));
            if is_salutation {
                text = rest.to_string();
            }
        }

        if text.is_empty() {
            return None;
        }
        if self.blacklist.is_blocked(&text) || self.blacklist.is_blocked(raw) {
            trace!(candidate = %text, "rejected: blacklisted");
            return None;
        }
        Some(text)
    }

    /// Screen raw text and validate it as a person or company name.
    pub fn accept(&self, raw: &str, source: HeuristicKind) -> Option<Candidate> {
        let text = self.screen(raw)?;

        if text.chars().any(|c| c.is_ascii_digit()) {
            trace!(candidate = %text, "rejected: contains digits");
            return None;
        }

        let kind = if self.patterns.is_company_name(&text) {
            NameKind::Organization
        } else if self.patterns.is_name_block(&text) && !text.ends_with('.') {
            NameKind::Person
        } else {
            trace!(candidate = %text, "rejected: not name-shaped");
            return None;
        };

        Some(Candidate { text, source, kind })
    }
}

/// Run a single heuristic.
pub fn run_heuristic(
    kind: HeuristicKind,
    pages: &[PageContent],
    ctx: &ExtractionContext<'_>,
) -> Option<Candidate> {
    match kind {
        HeuristicKind::Entities => entities::find(pages, ctx),
        HeuristicKind::Region => region::find(pages, ctx),
        HeuristicKind::Address => address::find(pages, ctx),
        HeuristicKind::Anchor => anchor::find(pages, ctx),
        HeuristicKind::TopLines => top_lines::find(pages, ctx),
        HeuristicKind::Manual => None,
    }
}

/// Try the configured heuristics in order; the first candidate wins.
pub fn run_chain(pages: &[PageContent], ctx: &ExtractionContext<'_>) -> Option<Candidate> {
    ctx.config.heuristics.iter().find_map(|&kind| {
        let found = run_heuristic(kind, pages, ctx);
        match &found {
            Some(c) => debug!(heuristic = %kind, candidate = %c.text, "heuristic matched"),
            None => debug!(heuristic = %kind, "heuristic found nothing"),
        }
        found
    })
}

/// Outcome of one heuristic when every heuristic is run (for inspection).
#[derive(Debug, Clone, Serialize)]
pub struct HeuristicTrial {
    pub heuristic: HeuristicKind,
    pub candidate: Option<Candidate>,
}

/// Run every configured heuristic without short-circuiting.
pub fn run_all(pages: &[PageContent], ctx: &ExtractionContext<'_>) -> Vec<HeuristicTrial> {
    ctx.config
        .heuristics
        .iter()
        .map(|&heuristic| HeuristicTrial {
            heuristic,
            candidate: run_heuristic(heuristic, pages, ctx),
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::extraction::{BBox, PageContent, TextBlock, TextSource};

    pub const A4_WIDTH: f32 = 595.0;
    pub const A4_HEIGHT: f32 = 842.0;

    /// A plain-text page without layout.
    pub fn text_page(lines: &[&str]) -> PageContent {
        PageContent {
            page_number: 1,
            lines: lines.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    /// An A4 page with one block per `(text, x, y)`; lines mirror the blocks.
    pub fn layout_page(blocks: &[(&str, f32, f32)]) -> PageContent {
        PageContent {
            page_number: 1,
            width: A4_WIDTH,
            height: A4_HEIGHT,
            lines: blocks.iter().map(|(t, _, _)| t.to_string()).collect(),
            blocks: blocks
                .iter()
                .map(|(t, x, y)| TextBlock {
                    text: t.to_string(),
                    bbox: BBox {
                        x_min: *x,
                        y_min: *y,
                        x_max: *x + 8.0 * t.chars().count() as f32,
                        y_max: *y + 12.0,
                    },
                })
                .collect(),
            source: TextSource::Embedded,
        }
    }
}
