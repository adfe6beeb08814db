use crate::error::NamerError;
use crate::extraction::{BBox, PageContent, PdfExtractor, TextBlock, TextSource};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Plain lines come from `pdftotext -layout`, page sizes and line boxes from
/// `pdftotext -bbox-layout`.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, NamerError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| NamerError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| NamerError::Extraction(e.to_string()))?;
        let tmp_path = tmpfile.path().to_path_buf();

        let text = run_pdftotext(&tmp_path, "-layout")?;
        let layouts = parse_bbox_xml(&run_pdftotext(&tmp_path, "-bbox-layout")?)?;

        // pdftotext terminates every page with a form feed, so the last
        // split piece is the empty remainder after the final page.
        let mut page_texts: Vec<&str> = text.split('\x0c').collect();
        if page_texts.len() > 1 && page_texts.last().is_some_and(|t| t.trim().is_empty()) {
            page_texts.pop();
        }

        let page_count = page_texts.len().max(layouts.len());
        let pages: Vec<PageContent> = (0..page_count)
            .map(|i| {
                let lines = page_texts
                    .get(i)
                    .map(|t| t.lines().map(|l| l.to_string()).collect())
                    .unwrap_or_default();
                let layout = layouts.get(i).cloned().unwrap_or_default();
                PageContent {
                    page_number: i + 1,
                    width: layout.width,
                    height: layout.height,
                    lines,
                    blocks: layout.blocks,
                    source: TextSource::Embedded,
                }
            })
            .collect();

        debug!(pages = pages.len(), "pdftotext extracted document");
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

fn run_pdftotext(pdf_path: &Path, mode: &str) -> Result<String, NamerError> {
    let output = Command::new("pdftotext")
        .arg("-enc")
        .arg("UTF-8")
        .arg(mode)
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NamerError::PdftotextNotFound
            } else {
                NamerError::Extraction(format!("pdftotext {} failed: {}", mode, e))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(NamerError::PdftotextFailed { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[derive(Debug, Clone, Default)]
struct PageLayout {
    width: f32,
    height: f32,
    blocks: Vec<TextBlock>,
}

/// Parse the XHTML emitted by `pdftotext -bbox-layout` into one layout per
/// `<page>`, with one block per `<line>`.
fn parse_bbox_xml(xml: &str) -> Result<Vec<PageLayout>, NamerError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<PageLayout> = Vec::new();
    let mut current_bbox: Option<BBox> = None;
    let mut current_words: Vec<String> = Vec::new();
    let mut in_word = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"page" => pages.push(page_layout(&e)),
                b"line" => {
                    current_bbox = parse_bbox(&e);
                    current_words.clear();
                }
                b"word" => in_word = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"page" {
                    pages.push(page_layout(&e));
                }
            }
            Ok(Event::Text(t)) => {
                if in_word {
                    let word = t
                        .unescape()
                        .map(|w| w.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&t).into_owned());
                    let word = word.trim();
                    if !word.is_empty() {
                        current_words.push(word.to_string());
                    }
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"word" => in_word = false,
                b"line" => {
                    if let (Some(page), Some(bbox)) = (pages.last_mut(), current_bbox.take()) {
                        let text = current_words.join(" ");
                        if !text.is_empty() {
                            page.blocks.push(TextBlock { text, bbox });
                        }
                    }
                    current_words.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(NamerError::Extraction(format!(
                    "malformed bbox layout at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }

    Ok(pages)
}

fn page_layout(tag: &BytesStart<'_>) -> PageLayout {
    PageLayout {
        width: attr_f32(tag, "width").unwrap_or(0.0),
        height: attr_f32(tag, "height").unwrap_or(0.0),
        blocks: Vec::new(),
    }
}

fn parse_bbox(tag: &BytesStart<'_>) -> Option<BBox> {
    Some(BBox {
        x_min: attr_f32(tag, "xMin")?,
        y_min: attr_f32(tag, "yMin")?,
        x_max: attr_f32(tag, "xMax")?,
        y_max: attr_f32(tag, "yMax")?,
    })
}

fn attr_f32(tag: &BytesStart<'_>, name: &str) -> Option<f32> {
    let attr = tag.try_get_attribute(name).ok()??;
    let value = attr.unescape_value().ok()?;
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
<title></title>
<meta name="Producer" content="Microsoft Word"/>
</head>
<body>
<doc>
  <page width="595.276000" height="841.890000">
    <flow>
      <block xMin="56.0" yMin="40.0" xMax="220.0" yMax="52.0">
        <line xMin="56.0" yMin="40.0" xMax="220.0" yMax="52.0">
          <word xMin="56.0" yMin="40.0" xMax="100.0" yMax="52.0">Mondsee</word>
          <word xMin="104.0" yMin="40.0" xMax="150.0" yMax="52.0">Finanz</word>
          <word xMin="154.0" yMin="40.0" xMax="220.0" yMax="52.0">GmbH</word>
        </line>
      </block>
      <block xMin="56.0" yMin="160.0" xMax="200.0" yMax="172.0">
        <line xMin="56.0" yMin="160.0" xMax="200.0" yMax="172.0">
          <word xMin="56.0" yMin="160.0" xMax="90.0" yMax="172.0">Max</word>
          <word xMin="94.0" yMin="160.0" xMax="200.0" yMax="172.0">Mustermann</word>
        </line>
        <line xMin="56.0" yMin="174.0" xMax="200.0" yMax="186.0">
          <word xMin="56.0" yMin="174.0" xMax="150.0" yMax="186.0">Hauptstra&#223;e</word>
          <word xMin="154.0" yMin="174.0" xMax="170.0" yMax="186.0">12</word>
        </line>
      </block>
    </flow>
  </page>
  <page width="595.276000" height="841.890000">
  </page>
</doc>
</body>
</html>
"#;

    #[test]
    fn test_parse_bbox_xml_lines() {
        let pages = parse_bbox_xml(SAMPLE).unwrap();
        assert_eq!(pages.len(), 2);
        assert!((pages[0].height - 841.89).abs() < 0.01);
        assert_eq!(pages[0].blocks.len(), 3);
        assert_eq!(pages[0].blocks[0].text, "Mondsee Finanz GmbH");
        assert_eq!(pages[0].blocks[1].text, "Max Mustermann");
        assert_eq!(pages[0].blocks[1].bbox.y_min, 160.0);
        assert!(pages[1].blocks.is_empty());
    }

    #[test]
    fn test_parse_bbox_xml_entities() {
        let pages = parse_bbox_xml(SAMPLE).unwrap();
        assert_eq!(pages[0].blocks[2].text, "Hauptstraße 12");
    }

    #[test]
    fn test_parse_bbox_xml_ampersand() {
        let xml = r#"<doc><page width="100" height="200"><line xMin="1" yMin="2" xMax="3" yMax="4"><word>M&amp;S</word><word>KG</word></line></page></doc>"#;
        let pages = parse_bbox_xml(xml).unwrap();
        assert_eq!(pages[0].blocks[0].text, "M&S KG");
        assert_eq!(pages[0].width, 100.0);
    }

    #[test]
    fn test_line_without_bbox_is_skipped() {
        let xml = r#"<doc><page width="100" height="200"><line><word>Lost</word></line></page></doc>"#;
        let pages = parse_bbox_xml(xml).unwrap();
        assert!(pages[0].blocks.is_empty());
    }
}
