use crate::extraction::PageContent;
use crate::heuristics::patterns::normalize_ws;
use std::collections::HashSet;

/// Keywords shorter than this must match a whole token; longer ones may
/// appear inside a token ("versicherung" in "Versicherungsmakler").
const SUBSTRING_MIN_LEN: usize = 4;

/// Boilerplate that must never become a candidate.
///
/// Built once per batch from the profile's static keywords plus the header
/// band of every page, then shared read-only by all extractions.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    keywords: Vec<String>,
    phrases: HashSet<String>,
}

impl Blacklist {
    pub fn from_terms<S: AsRef<str>>(terms: &[S]) -> Self {
        Blacklist {
            keywords: terms
                .iter()
                .map(|t| normalize_ws(t.as_ref()).to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            phrases: HashSet::new(),
        }
    }

    /// Add one exact phrase (compared case- and whitespace-insensitively).
    /// Returns false for blank or already known phrases.
    pub fn add_phrase(&mut self, phrase: &str) -> bool {
        let key = phrase_key(phrase);
        !key.is_empty() && self.phrases.insert(key)
    }

    /// Collect every layout block lying within the top `header_fraction` of
    /// its page. Pages without layout contribute nothing.
    pub fn collect_header(&mut self, pages: &[PageContent], header_fraction: f32) -> usize {
        let mut added = 0;
        for page in pages.iter().filter(|p| p.has_layout()) {
            let limit = page.height * header_fraction;
            for block in page.blocks.iter().filter(|b| b.bbox.y_max <= limit) {
                if self.add_phrase(&block.text) {
                    added += 1;
                }
            }
        }
        added
    }

    pub fn is_blocked(&self, text: &str) -> bool {
        let key = phrase_key(text);
        if self.phrases.contains(&key) {
            return true;
        }

        let tokens: Vec<&str> = key
            .split(' ')
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|t| !t.is_empty())
            .collect();

        self.keywords.iter().any(|kw| {
            if kw.contains(' ') {
                key.contains(kw.as_str())
            } else if kw.chars().count() >= SUBSTRING_MIN_LEN {
                tokens.iter().any(|t| t.contains(kw.as_str()))
            } else {
                tokens.iter().any(|t| t == kw)
            }
        })
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }
}

fn phrase_key(s: &str) -> String {
    normalize_ws(s).to_lowercase()
}
