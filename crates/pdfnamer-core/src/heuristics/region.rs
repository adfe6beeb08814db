//! Positional heuristic: the recipient block of a letter sits in a known
//! window of the first page, below the letterhead.

use super::ExtractionContext;
use crate::extraction::PageContent;
use crate::model::{Candidate, HeuristicKind};

pub fn find(pages: &[PageContent], ctx: &ExtractionContext<'_>) -> Option<Candidate> {
    let region = ctx.config.name_region?;
    let page = pages.first().filter(|p| p.has_layout())?;
    let header_limit = page.height * ctx.config.header_fraction;

    page.blocks_in_reading_order()
        .into_iter()
        .filter(|b| b.bbox.y_min >= header_limit)
        .filter(|b| {
            let (cx, cy) = b.bbox.center();
            region.contains(cx / page.width, cy / page.height)
        })
        .find_map(|b| ctx.accept(&b.text, HeuristicKind::Region))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NamerConfig, RelativeRect};
    use crate::heuristics::blacklist::Blacklist;
    use crate::heuristics::patterns::NamePatterns;
    use crate::heuristics::test_support::{layout_page, text_page};

    fn letter() -> PageContent {
        layout_page(&[
            ("Mondsee Finanz GmbH", 50.0, 40.0),
            ("Vertragsauskunft", 50.0, 80.0),
            ("Herr", 50.0, 140.0),
            ("Max Mustermann", 50.0, 160.0),
            ("Hauptstraße 12", 50.0, 180.0),
            ("Linz, am 01.02.2025", 400.0, 160.0),
            ("Erika Musterfrau", 50.0, 700.0),
        ])
    }

    fn find_with(config: &NamerConfig, pages: &[PageContent]) -> Option<Candidate> {
        let patterns = NamePatterns::from_config(config).unwrap();
        let blacklist = Blacklist::from_terms(&config.blacklist_terms);
        let ctx = ExtractionContext {
            config,
            patterns: &patterns,
            blacklist: &blacklist,
            recognizer: None,
        };
        find(pages, &ctx)
    }

    #[test]
    fn test_finds_recipient_in_window() {
        let c = find_with(&NamerConfig::default(), &[letter()]).unwrap();
        assert_eq!(c.text, "Max Mustermann");
        assert_eq!(c.source, HeuristicKind::Region);
    }

    #[test]
    fn test_letterhead_never_returned() {
        // a window covering the whole page still skips the header band
        let config = NamerConfig {
            name_region: Some(RelativeRect {
                x0: 0.0,
                y0: 0.0,
                x1: 1.0,
                y1: 1.0,
            }),
            ..NamerConfig::default()
        };
        let c = find_with(&config, &[letter()]).unwrap();
        assert_ne!(c.text, "Mondsee Finanz GmbH");
        assert_eq!(c.text, "Max Mustermann");
    }

    #[test]
    fn test_outside_window_ignored() {
        let page = layout_page(&[("Erika Musterfrau", 50.0, 700.0)]);
        assert!(find_with(&NamerConfig::default(), &[page]).is_none());
    }

    #[test]
    fn test_requires_layout_and_region() {
        let config = NamerConfig::default();
        assert!(find_with(&config, &[text_page(&["Max Mustermann"])]).is_none());

        let config = NamerConfig {
            name_region: None,
            ..NamerConfig::default()
        };
        assert!(find_with(&config, &[letter()]).is_none());
    }
}
