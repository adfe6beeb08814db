use crate::model::{FallbackReason, HeuristicKind, NameKind, NameOutcome, ResultRecord};
use serde::{Deserialize, Serialize};

pub const REPORT_SCHEMA_VERSION: &str = "1.0";

/// What happened to one input document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub original_name: String,
    pub derived_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heuristic: Option<HeuristicKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_kind: Option<NameKind>,
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FallbackReason>,
}

impl ReportEntry {
    pub fn from_record(record: &ResultRecord) -> Self {
        let (extracted_name, heuristic, name_kind, reason) = match &record.outcome {
            NameOutcome::Found(c) => (Some(c.text.clone()), Some(c.source), Some(c.kind), None),
            NameOutcome::Fallback { reason, .. } => (None, None, None, Some(reason.clone())),
        };
        ReportEntry {
            original_name: record.original_name.clone(),
            derived_name: record.derived_name.clone(),
            extracted_name,
            heuristic,
            name_kind,
            fallback: record.outcome.is_fallback(),
            reason,
        }
    }
}

/// Summary of a whole batch, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub schema_version: String,
    pub generated_at: String,
    pub documents: usize,
    pub fallback_count: usize,
    pub entries: Vec<ReportEntry>,
}

impl BatchReport {
    pub fn from_records(records: &[ResultRecord]) -> Self {
        let entries: Vec<ReportEntry> = records.iter().map(ReportEntry::from_record).collect();
        BatchReport {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at: chrono::Local::now().to_rfc3339(),
            documents: entries.len(),
            fallback_count: entries.iter().filter(|e| e.fallback).count(),
            entries,
        }
    }

    pub fn fallbacks(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.fallback)
    }
}
