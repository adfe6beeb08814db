use pdfnamer_core::model::NameOutcome;
use pdfnamer_core::pipeline::Inspection;
use pdfnamer_core::report::BatchReport;
use std::path::Path;

pub fn print_report(report: &BatchReport, archive: &Path) {
    let width = report
        .entries
        .iter()
        .map(|e| e.original_name.chars().count())
        .max()
        .unwrap_or(10);

    for entry in &report.entries {
        let how = match (&entry.heuristic, &entry.name_kind, &entry.reason) {
            (Some(h), Some(k), _) => format!("{h}, {k}"),
            (_, _, Some(reason)) => format!("FALLBACK: {reason}"),
            _ => String::new(),
        };
        println!(
            "  {:<width$}  -> {}  ({})",
            entry.original_name,
            entry.derived_name,
            how,
            width = width
        );
    }

    println!();
    println!(
        "{} document(s) written to {}",
        report.documents,
        archive.display()
    );
    if report.fallback_count > 0 {
        println!(
            "{} document(s) need a manual name (use --set ORIGINAL=NAME):",
            report.fallback_count
        );
        for entry in report.fallbacks() {
            println!("  {}", entry.original_name);
        }
    }
}

pub fn print_inspection(file_name: &str, inspection: &Inspection) {
    println!("=== {} ===\n", file_name);
    println!(
        "  Pages: {} ({} via OCR), header phrases: {}\n",
        inspection.page_count,
        inspection.ocr_pages.len(),
        inspection.header_phrases
    );

    let width = inspection
        .trials
        .iter()
        .map(|t| t.heuristic.to_string().len())
        .max()
        .unwrap_or(10);
    for trial in &inspection.trials {
        match &trial.candidate {
            Some(c) => println!(
                "  {:<width$}  {} ({})",
                trial.heuristic.to_string(),
                c.text,
                c.kind,
                width = width
            ),
            None => println!("  {:<width$}  -", trial.heuristic.to_string(), width = width),
        }
    }

    println!();
    match &inspection.outcome {
        NameOutcome::Found(c) => println!("  Chosen: {} (via {})", c.text, c.source),
        NameOutcome::Fallback { placeholder, reason } => {
            println!("  Chosen: {} (fallback: {})", placeholder, reason)
        }
    }
    println!("  Filename: {}", inspection.derived_name);
}
