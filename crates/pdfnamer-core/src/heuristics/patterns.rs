use crate::config::NamerConfig;
use crate::error::NamerError;
use regex::Regex;
use std::sync::LazyLock;

/// One name token: uppercase initial, then lowercase letters or periods.
/// Hyphenated parts may start uppercase again ("Müller-Lüdenscheidt").
static NAME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{Lu}[\p{Ll}.]*(?:-\p{Lu}?[\p{Ll}.]*)*$").unwrap());

/// Exactly "Firstname Lastname", each part optionally hyphenated.
static TWO_WORD_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{Lu}\p{Ll}+(?:-\p{Lu}\p{Ll}+)?\s+\p{Lu}\p{Ll}+(?:-\p{Lu}\p{Ll}+)?$").unwrap()
});

/// Austrian (4-digit) or German (5-digit) postal code followed by a city.
static POSTAL_CITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[\s,])(?:[A-Z]-)?\d{4,5}\s+\p{Lu}\p{Ll}+").unwrap());

const MIN_NAME_TOKENS: usize = 2;
const MAX_NAME_TOKENS: usize = 5;

/// Patterns compiled once per profile.
#[derive(Debug, Clone)]
pub struct NamePatterns {
    company: Option<Regex>,
    street_keywords: Vec<String>,
}

impl NamePatterns {
    pub fn from_config(config: &NamerConfig) -> Result<Self, NamerError> {
        let company = if config.legal_suffixes.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = config
                .legal_suffixes
                .iter()
                .map(|s| regex::escape(s.trim()))
                .collect();
            Some(Regex::new(&format!(
                r"^\p{{Lu}}\S*(?:\s+\S+)*\s+(?:{})$",
                alternatives.join("|")
            ))?)
        };

        Ok(NamePatterns {
            company,
            street_keywords: config
                .street_keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        })
    }

    /// 2 to 5 tokens, each shaped like a capitalized name part or title.
    pub fn is_name_block(&self, text: &str) -> bool {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        (MIN_NAME_TOKENS..=MAX_NAME_TOKENS).contains(&tokens.len())
            && tokens.iter().all(|t| NAME_TOKEN.is_match(t))
    }

    /// Capitalized text ending in a legal-entity suffix.
    pub fn is_company_name(&self, text: &str) -> bool {
        let normalized = normalize_ws(text);
        self.company
            .as_ref()
            .is_some_and(|re| re.is_match(&normalized))
    }

    /// Either a street line (a token ending in a street keyword) or a
    /// postal code plus city.
    pub fn is_address_line(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        let has_street = lower
            .split_whitespace()
            .map(|t| t.trim_end_matches([',', ';', ':']))
            .any(|t| self.street_keywords.iter().any(|k| t.ends_with(k.as_str())));
        has_street || POSTAL_CITY.is_match(text)
    }
}

/// "Firstname Lastname" and nothing else on the line.
pub fn is_two_word_name(text: &str) -> bool {
    TWO_WORD_NAME.is_match(text.trim())
}

pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a `-layout` line into column cells at runs of two or more spaces.
pub fn split_by_whitespace_gaps(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = None;
    let mut end = 0;
    let mut space_count = 0;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            space_count += 1;
            if space_count == 2 {
                if let Some(s) = start.take() {
                    segments.push(&line[s..end]);
                }
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            end = i + c.len_utf8();
            space_count = 0;
        }
    }

    if let Some(s) = start {
        segments.push(&line[s..end]);
    }

    segments
}
