pub mod ocr;
pub mod pdftotext;

use crate::error::NamerError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BBox {
    pub fn center(&self) -> (f32, f32) {
        (
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }
}

/// A positioned run of text on a page (one layout line).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub bbox: BBox,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSource {
    #[default]
    Embedded,
    Ocr,
}

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageContent {
    pub page_number: usize,
    /// Page size in the unit of its blocks (PDF points, or image pixels for
    /// OCR'd pages); zero when unknown.
    pub width: f32,
    pub height: f32,
    pub lines: Vec<String>,
    /// Layout blocks, one per text line; may be empty.
    pub blocks: Vec<TextBlock>,
    pub source: TextSource,
}

impl PageContent {
    /// True if the page carries no embedded text at all (a scanned image).
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    pub fn has_layout(&self) -> bool {
        !self.blocks.is_empty() && self.width > 0.0 && self.height > 0.0
    }

    /// Blocks sorted top-to-bottom, then left-to-right.
    pub fn blocks_in_reading_order(&self) -> Vec<&TextBlock> {
        let mut blocks: Vec<&TextBlock> = self.blocks.iter().collect();
        blocks.sort_by(|a, b| {
            a.bbox
                .y_min
                .total_cmp(&b.bbox.y_min)
                .then(a.bbox.x_min.total_cmp(&b.bbox.x_min))
        });
        blocks
    }

    /// Text segments in reading order: layout blocks when available,
    /// otherwise the plain non-empty lines.
    pub fn segments(&self) -> Vec<String> {
        if self.has_layout() {
            self.blocks_in_reading_order()
                .into_iter()
                .map(|b| b.text.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        } else {
            self.lines
                .iter()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect()
        }
    }
}

/// All page lines joined by newlines.
pub fn full_text(pages: &[PageContent]) -> String {
    pages
        .iter()
        .map(|p| p.lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, NamerError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Trait for optical character recognition of a single rendered page.
pub trait OcrEngine: Send + Sync {
    /// Recognize page `page_number` (1-based) of the given PDF.
    ///
    /// Engines should return line boxes along with the text so the header
    /// band of scanned pages can be blacklisted like embedded ones.
    fn recognize_page(&self, pdf_bytes: &[u8], page_number: usize) -> Result<PageContent, NamerError>;

    fn backend_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str, x: f32, y: f32) -> TextBlock {
        TextBlock {
            text: text.into(),
            bbox: BBox {
                x_min: x,
                y_min: y,
                x_max: x + 50.0,
                y_max: y + 10.0,
            },
        }
    }

    #[test]
    fn test_reading_order() {
        let page = PageContent {
            page_number: 1,
            width: 595.0,
            height: 842.0,
            lines: vec![],
            blocks: vec![
                block("third", 10.0, 300.0),
                block("second", 200.0, 100.0),
                block("first", 10.0, 100.0),
            ],
            source: TextSource::Embedded,
        };
        let texts: Vec<&str> = page
            .blocks_in_reading_order()
            .iter()
            .map(|b| b.text.as_str())
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_segments_fall_back_to_lines() {
        let page = PageContent {
            page_number: 1,
            lines: vec!["  Maria Huber ".into(), "".into(), "Musterstraße 5".into()],
            ..Default::default()
        };
        assert_eq!(page.segments(), vec!["Maria Huber", "Musterstraße 5"]);
        assert!(!page.is_blank());
    }

    #[test]
    fn test_blank_page() {
        let page = PageContent {
            page_number: 2,
            lines: vec!["   ".into(), "".into()],
            ..Default::default()
        };
        assert!(page.is_blank());
    }
}
