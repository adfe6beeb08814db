//! Address heuristic: the name is printed directly above the recipient's
//! street or postal-code line.

use super::patterns::split_by_whitespace_gaps;
use super::ExtractionContext;
use crate::extraction::PageContent;
use crate::model::{Candidate, HeuristicKind};

pub fn find(pages: &[PageContent], ctx: &ExtractionContext<'_>) -> Option<Candidate> {
    let lookback = ctx.config.address_lookback.max(1);

    for page in pages {
        // Only the leftmost cell of a `-layout` line belongs to the address
        // column; dates and reference numbers live further right.
        let cells: Vec<String> = page
            .segments()
            .iter()
            .filter_map(|s| split_by_whitespace_gaps(s).first().map(|c| c.to_string()))
            .collect();

        for (i, cell) in cells.iter().enumerate() {
            if !ctx.patterns.is_address_line(cell) {
                continue;
            }
            let found = (1..=lookback)
                .map_while(|offset| i.checked_sub(offset))
                .find_map(|idx| ctx.accept(&cells[idx], HeuristicKind::Address));
            if found.is_some() {
                return found;
            }
        }
    }
    None
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
    fn test_name_above_street() {
        let c = find_in(
            &NamerConfig::default(),
            &["Vertragsauskunft", "Maria Huber", "Musterstraße 5, 1010 Wien"],
        )
        .unwrap();
        assert_eq!(c.text, "Maria Huber");
        assert_eq!(c.source, HeuristicKind::Address);
    }

    #[test]
    fn test_looks_past_salutation_line() {
        let c = find_in(
            &NamerConfig::default(),
            &[
                "Frau",
                "Mag. Anna Berger           Linz, am 01.02.2025",
                "Am Mühlweg 3",
                "4020 Linz",
            ],
        )
        .unwrap();
        assert_eq!(c.text, "Mag. Anna Berger");
    }

    #[test]
    fn test_lookback_is_bounded() {
        let lines = [
            "Max Mustermann",
            "Vertragsauskunft",
            "Polizze 1234",
            "Beginn: 01.01.2024",
            "Hauptstraße 12",
        ];
        assert!(find_in(&NamerConfig::default(), &lines).is_none());

        let config = NamerConfig {
            address_lookback: 4,
            ..NamerConfig::default()
        };
        assert_eq!(find_in(&config, &lines).unwrap().text, "Max Mustermann");
    }

    #[test]
    fn test_address_on_first_line() {
        assert!(find_in(&NamerConfig::default(), &["Hauptstraße 12", "Max Mustermann"]).is_none());
    }
}
