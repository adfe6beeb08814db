use serde::{Deserialize, Serialize};
use std::fmt;

/// One uploaded document: the name it arrived with and its raw bytes.
#[derive(Debug, Clone)]
pub struct InputDocument {
    pub original_name: String,
    pub bytes: Vec<u8>,
    /// Set when the file could not be read; such documents are named with
    /// a placeholder and left out of the archive.
    pub read_error: Option<String>,
}

impl InputDocument {
    pub fn new(original_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        InputDocument {
            original_name: original_name.into(),
            bytes,
            read_error: None,
        }
    }

    pub fn unreadable(original_name: impl Into<String>, reason: impl Into<String>) -> Self {
        InputDocument {
            original_name: original_name.into(),
            bytes: Vec::new(),
            read_error: Some(reason.into()),
        }
    }
}

/// The strategies of the extraction chain, in the order they are usually tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    Entities,
    Region,
    Address,
    Anchor,
    TopLines,
    /// Name supplied by a human through an override, not by a heuristic.
    Manual,
}

impl HeuristicKind {
    /// Heuristics that can appear in a profile's chain.
    pub const CHAIN: &'static [HeuristicKind] = &[
        HeuristicKind::Entities,
        HeuristicKind::Region,
        HeuristicKind::Address,
        HeuristicKind::Anchor,
        HeuristicKind::TopLines,
    ];
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeuristicKind::Entities => write!(f, "entities"),
            HeuristicKind::Region => write!(f, "region"),
            HeuristicKind::Address => write!(f, "address"),
            HeuristicKind::Anchor => write!(f, "anchor"),
            HeuristicKind::TopLines => write!(f, "top_lines"),
            HeuristicKind::Manual => write!(f, "manual"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameKind {
    Person,
    Organization,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Person => write!(f, "person"),
            NameKind::Organization => write!(f, "organization"),
        }
    }
}

/// A name produced by exactly one heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    pub source: HeuristicKind,
    pub kind: NameKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// Every heuristic in the chain came up empty.
    NoCandidate,
    /// The document could not be read at all.
    Unreadable(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NoCandidate => write!(f, "no candidate found"),
            FallbackReason::Unreadable(msg) => write!(f, "unreadable: {msg}"),
        }
    }
}

/// How a document's name was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NameOutcome {
    Found(Candidate),
    Fallback {
        placeholder: String,
        reason: FallbackReason,
    },
}

impl NameOutcome {
    /// The name to build the filename from. Never empty.
    pub fn name(&self) -> &str {
        match self {
            NameOutcome::Found(c) => &c.text,
            NameOutcome::Fallback { placeholder, .. } => placeholder,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, NameOutcome::Fallback { .. })
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            NameOutcome::Found(c) => Some(c),
            NameOutcome::Fallback { .. } => None,
        }
    }
}

/// One renamed document, the unit written into the archive.
#[derive(Debug, Clone)]
pub struct ResultRecord {
    pub original_name: String,
    pub derived_name: String,
    pub bytes: Vec<u8>,
    pub outcome: NameOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_name() {
        let found = NameOutcome::Found(Candidate {
            text: "Maria Huber".into(),
            source: HeuristicKind::Address,
            kind: NameKind::Person,
        });
        assert_eq!(found.name(), "Maria Huber");
        assert!(!found.is_fallback());

        let fallback = NameOutcome::Fallback {
            placeholder: "Unbekannt-20260101-120000".into(),
            reason: FallbackReason::NoCandidate,
        };
        assert_eq!(fallback.name(), "Unbekannt-20260101-120000");
        assert!(fallback.is_fallback());
        assert!(fallback.candidate().is_none());
    }

    #[test]
    fn test_outcome_json_tags() {
        let fallback = NameOutcome::Fallback {
            placeholder: "Unbekannt-20260101-120000".into(),
            reason: FallbackReason::Unreadable("bad xref".into()),
        };
        let json = serde_json::to_value(&fallback).unwrap();
        assert_eq!(json["status"], "fallback");
        assert_eq!(json["reason"]["kind"], "unreadable");
        assert_eq!(json["reason"]["detail"], "bad xref");
        assert_eq!(
            FallbackReason::Unreadable("bad xref".into()).to_string(),
            "unreadable: bad xref"
        );
        assert_eq!(HeuristicKind::TopLines.to_string(), "top_lines");
    }
}
