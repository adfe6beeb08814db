use crate::config::{FilenameStyle, NamerConfig};
use chrono::{DateTime, Local};
use std::collections::{HashMap, HashSet};

const EXTENSION: &str = "pdf";

/// Strip everything except letters, digits, whitespace and hyphens, then
/// collapse whitespace runs to single spaces. Idempotent.
pub fn sanitize(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Apply the filename style to an already sanitized fragment.
pub fn style_fragment(sanitized: &str, style: FilenameStyle) -> String {
    match style {
        FilenameStyle::Spaced => sanitized.to_string(),
        FilenameStyle::Compact => sanitized.split_whitespace().collect(),
    }
}

/// Build `<prefix> <name>.pdf` according to the profile's style.
///
/// A name that sanitizes to nothing is replaced by the placeholder marker so
/// the result always names the document somehow.
pub fn build_filename(name: &str, config: &NamerConfig) -> String {
    let mut fragment = sanitize(name);
    if fragment.is_empty() {
        fragment = sanitize(&config.placeholder_marker);
    }
    let stem = sanitize(&format!("{} {}", config.filename_prefix, fragment));
    format!(
        "{}.{}",
        style_fragment(&stem, config.filename_style),
        EXTENSION
    )
}

/// Placeholder used when no heuristic finds a name: `<marker>-<YYYYMMDD-HHMMSS>`.
pub fn placeholder(marker: &str) -> String {
    placeholder_at(marker, Local::now())
}

pub fn placeholder_at(marker: &str, at: DateTime<Local>) -> String {
    format!("{}-{}", marker, at.format("%Y%m%d-%H%M%S"))
}

/// Number repeated filenames in place: the second `A.pdf` becomes `A (2).pdf`.
///
/// Comparison is case-insensitive, since archive consumers on Windows and
/// macOS treat names that differ only in case as the same file.
pub fn dedupe_filenames(names: &mut [String]) {
    let mut taken: HashSet<String> = names.iter().map(|n| n.to_lowercase()).collect();

    let mut seen: HashMap<String, usize> = HashMap::new();
    for name in names.iter_mut() {
        let key = name.to_lowercase();
        let count = seen.entry(key).or_insert(0);
        *count += 1;
        if *count == 1 {
            continue;
        }

        let (stem, ext) = match name.rsplit_once('.') {
            Some((stem, ext)) => (stem.to_string(), format!(".{ext}")),
            None => (name.clone(), String::new()),
        };
        let mut n = *count;
        let renamed = loop {
            let candidate = format!("{stem} ({n}){ext}");
            if !taken.contains(&candidate.to_lowercase()) {
                break candidate;
            }
            n += 1;
        };
        taken.insert(renamed.to_lowercase());
        *name = renamed;
    }
}
