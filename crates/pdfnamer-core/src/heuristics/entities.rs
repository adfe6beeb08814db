//! Named-entity recognition seam.
//!
//! The chain only needs organizations and persons, in document order. Any
//! NER backend can plug in through [`EntityRecognizer`]; the bundled
//! [`PatternRecognizer`] covers the letter layout with plain patterns.

use super::ExtractionContext;
use crate::config::NamerConfig;
use crate::error::NamerError;
use crate::extraction::{full_text, PageContent};
use crate::heuristics::patterns::{normalize_ws, NamePatterns};
use crate::model::{Candidate, HeuristicKind, NameKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub kind: NameKind,
    pub text: String,
}

pub trait EntityRecognizer: Send + Sync {
    /// Entities found in `text`, in the order they appear.
    fn recognize(&self, text: &str) -> Vec<Entity>;

    fn backend_name(&self) -> &str;
}

/// Organizations are lines ending in a legal suffix; persons are name-shaped
/// text introduced by a salutation, on the same line or the next one.
pub struct PatternRecognizer {
    patterns: NamePatterns,
    salutations: Vec<String>,
}

impl PatternRecognizer {
    pub fn from_config(config: &NamerConfig) -> Result<Self, NamerError> {
        Ok(PatternRecognizer {
            patterns: NamePatterns::from_config(config)?,
            salutations: config.salutations.iter().map(|s| s.to_lowercase()).collect(),
        })
    }

    /// The text following a leading salutation, if the line starts with one.
    /// A bare salutation yields `Some("")`.
    fn after_salutation<'a>(&self, line: &'a str) -> Option<&'a str> {
        let first = line.split_whitespace().next()?;
        if self.salutations.contains(&first.to_lowercase()) {
            Some(line[line.find(first)? + first.len()..].trim())
        } else {
            None
        }
    }
}

impl EntityRecognizer for PatternRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let lines: Vec<String> = text
            .lines()
            .map(normalize_ws)
            .filter(|l| !l.is_empty())
            .collect();

        let mut entities = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            if self.patterns.is_company_name(line) {
                // "Firma Huber & Söhne KG" names the company without the salutation
                let name = self.after_salutation(line).unwrap_or(line);
                entities.push(Entity {
                    kind: NameKind::Organization,
                    text: name.to_string(),
                });
                continue;
            }

            match self.after_salutation(line) {
                Some("") => {
                    if let Some(next) = lines.get(i + 1) {
                        if self.patterns.is_name_block(next) {
                            entities.push(Entity {
                                kind: NameKind::Person,
                                text: next.clone(),
                            });
                        }
                    }
                }
                Some(rest) if self.patterns.is_name_block(rest) => {
                    entities.push(Entity {
                        kind: NameKind::Person,
                        text: rest.to_string(),
                    });
                }
                _ => {}
            }
        }
        entities
    }

    fn backend_name(&self) -> &str {
        "patterns"
    }
}

/// Organizations win over persons; within a kind the first acceptable
/// entity in document order is taken. Entities skip the name-shape check,
/// so only blacklisted or empty text is dropped.
pub fn find(pages: &[PageContent], ctx: &ExtractionContext<'_>) -> Option<Candidate> {
    let recognizer = ctx.recognizer?;
    let entities = recognizer.recognize(&full_text(pages));

    let first_of = |kind: NameKind| {
        entities
            .iter()
            .filter(|e| e.kind == kind)
            .find_map(|e| ctx.screen(&e.text))
            .map(|text| Candidate {
                text,
                source: HeuristicKind::Entities,
                kind,
            })
    };
    first_of(NameKind::Organization).or_else(|| first_of(NameKind::Person))
}
