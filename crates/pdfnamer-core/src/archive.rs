use crate::error::NamerError;
use crate::model::ResultRecord;
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Pack every record into one in-memory zip, in input order.
///
/// Entry paths are the derived filenames, nested under `folder` when given.
/// Callers are expected to have deduplicated the names already. Records
/// without bytes (input files that could not be read) are skipped.
pub fn build_archive(records: &[ResultRecord], folder: Option<&str>) -> Result<Vec<u8>, NamerError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for record in records {
        if record.bytes.is_empty() {
            debug!(document = %record.original_name, "nothing to archive");
            continue;
        }
        zip.start_file(entry_path(&record.derived_name, folder), options)?;
        zip.write_all(&record.bytes)?;
    }

    Ok(zip.finish()?.into_inner())
}

pub fn write_archive(
    records: &[ResultRecord],
    folder: Option<&str>,
    path: &Path,
) -> Result<(), NamerError> {
    let bytes = build_archive(records, folder)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn entry_path(name: &str, folder: Option<&str>) -> String {
    match folder.map(|f| f.trim_matches('/')).filter(|f| !f.is_empty()) {
        Some(folder) => format!("{folder}/{name}"),
        None => name.to_string(),
    }
}
