//! Anchor heuristic: a fixed label ("Geb.datum", "KdNr") shares a line with
//! the customer's name.

use super::patterns::split_by_whitespace_gaps;
use super::ExtractionContext;
use crate::config::{AnchorDef, AnchorSide};
use crate::extraction::PageContent;
use crate::model::{Candidate, HeuristicKind};
use regex::Regex;

pub fn find(pages: &[PageContent], ctx: &ExtractionContext<'_>) -> Option<Candidate> {
    let lines: Vec<&str> = pages
        .iter()
        .flat_map(|p| p.lines.iter().map(String::as_str))
        .filter(|l| !l.trim().is_empty())
        .collect();

    ctx.config.anchors.iter().find_map(|anchor| {
        let label = label_pattern(anchor)?;
        lines.iter().enumerate().find_map(|(i, line)| {
            let m = label.find(line)?;
            let raw = match anchor.side {
                AnchorSide::Before => before_label(&line[..m.start()])
                    .or_else(|| i.checked_sub(1).map(|prev| lines[prev].trim()))?,
                AnchorSide::After => after_label(&line[m.end()..])?,
            };
            ctx.accept(raw, HeuristicKind::Anchor)
        })
    })
}

fn label_pattern(anchor: &AnchorDef) -> Option<Regex> {
    let label = anchor.label.trim();
    if label.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(label))).ok()
}

/// The cell immediately left of the label, if any.
fn before_label(text: &str) -> Option<&str> {
    split_by_whitespace_gaps(text.trim_end_matches([' ', ':']))
        .last()
        .copied()
}

/// The value right of the label, up to the next column gap.
fn after_label(text: &str) -> Option<&str> {
    let trimmed = text.trim_start_matches(|c: char| c == ':' || c.is_whitespace());
    split_by_whitespace_gaps(trimmed).first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamerConfig;
    use crate::heuristics::blacklist::Blacklist;
    use crate::heuristics::patterns::NamePatterns;
    use crate::heuristics::test_support::text_page;

    fn find_in(config: &NamerConfig, lines: &[&str]) -> Option<Candidate> {
        let patterns = NamePatterns::from_config(config).unwrap();
        let blacklist = Blacklist::from_terms(&config.blacklist_terms);
        let ctx = ExtractionContext {
            config,
            patterns: &patterns,
            blacklist: &blacklist,
            recognizer: None,
        };
        find(&[text_page(lines)], &ctx)
    }

    #[test]
    fn test_name_left_of_label() {
        let c = find_in(
            &NamerConfig::default(),
            &["Polizze 123", "Max Mustermann         Geb.datum: 01.01.1980"],
        )
        .unwrap();
        assert_eq!(c.text, "Max Mustermann");
        assert_eq!(c.source, HeuristicKind::Anchor);
    }

    #[test]
    fn test_label_case_insensitive_with_previous_line() {
        let c = find_in(&NamerConfig::default(), &["Erika Musterfrau", "KDNR: 4711"]).unwrap();
        assert_eq!(c.text, "Erika Musterfrau");
    }

    #[test]
    fn test_name_right_of_label() {
        let config = NamerConfig {
            anchors: vec![AnchorDef {
                label: "Versicherungsnehmer".into(),
                side: AnchorSide::After,
            }],
            ..NamerConfig::default()
        };
        let c = find_in(&config, &["Versicherungsnehmer:  Anna Berger      Polizze 99"]).unwrap();
        assert_eq!(c.text, "Anna Berger");
    }

    #[test]
    fn test_no_anchor_no_candidate() {
        assert!(find_in(&NamerConfig::default(), &["Max Mustermann", "Linz"]).is_none());
    }

    #[test]
    fn test_cell_helpers() {
        assert_eq!(before_label("Max Mustermann     "), Some("Max Mustermann"));
        assert_eq!(before_label("A1   Max Mustermann "), Some("Max Mustermann"));
        assert_eq!(before_label("   "), None);
        assert_eq!(after_label(":  Anna Berger   Polizze 99"), Some("Anna Berger"));
        assert_eq!(after_label(":"), None);
    }
}
