use crate::model::HeuristicKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A naming profile: every tunable of the extraction chain and of the
/// filename template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamerConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,

    /// Tesseract language model used for scanned pages.
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,
    #[serde(default = "default_ocr_dpi")]
    pub ocr_dpi: u32,
    /// Upper bound for rendering plus recognizing one page.
    #[serde(default = "default_ocr_timeout_secs")]
    pub ocr_timeout_secs: u64,

    /// Vertical fraction of each page treated as sender letterhead.
    #[serde(default = "default_header_fraction")]
    pub header_fraction: f32,
    /// Relative rectangle searched by the region heuristic.
    #[serde(default = "default_name_region")]
    pub name_region: Option<RelativeRect>,

    #[serde(default = "default_blacklist_terms")]
    pub blacklist_terms: Vec<String>,
    /// Add every header-band line of the batch to the blacklist.
    #[serde(default = "default_true")]
    pub collect_header_blacklist: bool,

    #[serde(default = "default_street_keywords")]
    pub street_keywords: Vec<String>,
    #[serde(default = "default_legal_suffixes")]
    pub legal_suffixes: Vec<String>,
    #[serde(default = "default_salutations")]
    pub salutations: Vec<String>,
    #[serde(default = "default_anchors")]
    pub anchors: Vec<AnchorDef>,

    /// How many segments above an address line may hold the name.
    #[serde(default = "default_address_lookback")]
    pub address_lookback: usize,
    /// How many leading lines the top-of-document fallback scans.
    #[serde(default = "default_top_lines")]
    pub top_lines: usize,

    /// Chain order; the first heuristic that yields a candidate wins.
    #[serde(default = "default_heuristics")]
    pub heuristics: Vec<HeuristicKind>,

    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,
    #[serde(default)]
    pub filename_style: FilenameStyle,
    #[serde(default = "default_placeholder_marker")]
    pub placeholder_marker: String,
    /// Folder inside the archive; entries are flat when unset.
    #[serde(default)]
    pub archive_folder: Option<String>,
}

impl Default for NamerConfig {
    fn default() -> Self {
        NamerConfig {
            name: "Vertragsauskunft".into(),
            description: None,
            version: "1".into(),
            ocr_language: default_ocr_language(),
            ocr_dpi: default_ocr_dpi(),
            ocr_timeout_secs: default_ocr_timeout_secs(),
            header_fraction: default_header_fraction(),
            name_region: default_name_region(),
            blacklist_terms: default_blacklist_terms(),
            collect_header_blacklist: true,
            street_keywords: default_street_keywords(),
            legal_suffixes: default_legal_suffixes(),
            salutations: default_salutations(),
            anchors: default_anchors(),
            address_lookback: default_address_lookback(),
            top_lines: default_top_lines(),
            heuristics: default_heuristics(),
            filename_prefix: default_filename_prefix(),
            filename_style: FilenameStyle::default(),
            placeholder_marker: default_placeholder_marker(),
            archive_folder: None,
        }
    }
}

/// Rectangle in page-relative coordinates (0.0 = left/top, 1.0 = right/bottom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl RelativeRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    /// The name stands on the same line, left of the label.
    Before,
    /// The name follows the label (after an optional colon).
    After,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorDef {
    pub label: String,
    pub side: AnchorSide,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilenameStyle {
    /// `Vertragsauskunft Max Mustermann.pdf`
    #[default]
    Spaced,
    /// `VertragsauskunftMaxMustermann.pdf`
    Compact,
}

impl fmt::Display for FilenameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilenameStyle::Spaced => write!(f, "spaced"),
            FilenameStyle::Compact => write!(f, "compact"),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_ocr_language() -> String {
    "deu".into()
}

fn default_ocr_dpi() -> u32 {
    300
}

fn default_ocr_timeout_secs() -> u64 {
    60
}

fn default_header_fraction() -> f32 {
    0.12
}

fn default_name_region() -> Option<RelativeRect> {
    Some(RelativeRect {
        x0: 0.0,
        y0: 0.1,
        x1: 0.6,
        y1: 0.4,
    })
}

fn default_blacklist_terms() -> Vec<String> {
    [
        "versicherung",
        "versicherungsmakler",
        "vertragsauskunft",
        "polizze",
        "beginn",
        "ablauf",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_street_keywords() -> Vec<String> {
    [
        "straße", "strasse", "str.", "weg", "gasse", "platz", "allee", "gürtel", "steig",
        "zeile", "siedlung",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_legal_suffixes() -> Vec<String> {
    [
        "GmbH",
        "GesmbH",
        "Ges.m.b.H.",
        "AG",
        "KG",
        "OG",
        "OHG",
        "SE",
        "e.U.",
        "GmbH & Co KG",
        "GmbH & Co. KG",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_salutations() -> Vec<String> {
    ["Herr", "Frau", "Firma"].iter().map(|s| s.to_string()).collect()
}

fn default_anchors() -> Vec<AnchorDef> {
    vec![
        AnchorDef {
            label: "Geb.datum".into(),
            side: AnchorSide::Before,
        },
        AnchorDef {
            label: "KdNr".into(),
            side: AnchorSide::Before,
        },
    ]
}

fn default_address_lookback() -> usize {
    3
}

fn default_top_lines() -> usize {
    10
}

fn default_heuristics() -> Vec<HeuristicKind> {
    HeuristicKind::CHAIN.to_vec()
}

fn default_filename_prefix() -> String {
    "Vertragsauskunft".into()
}

fn default_placeholder_marker() -> String {
    "Unbekannt".into()
}
