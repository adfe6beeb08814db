pub mod builtin;
pub mod schema;

use crate::error::NamerError;
use crate::model::HeuristicKind;
pub use schema::{AnchorDef, AnchorSide, FilenameStyle, NamerConfig, RelativeRect};
use std::collections::HashSet;
use std::path::Path;

/// Load a profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<NamerConfig, NamerError> {
    let content = std::fs::read_to_string(path).map_err(|e| NamerError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<NamerConfig, NamerError> {
    let profile: NamerConfig = serde_json::from_str(json).map_err(|e| NamerError::ProfileLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse a profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<NamerConfig, NamerError> {
    let profile: NamerConfig = serde_json::from_str(json).map_err(NamerError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is well-formed.
pub fn validate_profile(profile: &NamerConfig) -> Result<(), NamerError> {
    if !(profile.header_fraction > 0.0 && profile.header_fraction < 1.0) {
        return Err(NamerError::ProfileInvalid(format!(
            "header_fraction must be between 0 and 1 (exclusive), got {}",
            profile.header_fraction
        )));
    }

    if let Some(rect) = profile.name_region {
        let coords = [rect.x0, rect.y0, rect.x1, rect.y1];
        if coords.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(NamerError::ProfileInvalid(
                "name_region coordinates must lie within 0..1".into(),
            ));
        }
        if rect.x0 >= rect.x1 || rect.y0 >= rect.y1 {
            return Err(NamerError::ProfileInvalid(
                "name_region must have x0 < x1 and y0 < y1".into(),
            ));
        }
    }

    if profile.heuristics.is_empty() {
        return Err(NamerError::ProfileInvalid(
            "heuristics must not be empty".into(),
        ));
    }

    let mut seen = HashSet::new();
    for kind in &profile.heuristics {
        if *kind == HeuristicKind::Manual {
            return Err(NamerError::ProfileInvalid(
                "'manual' is reserved for overrides and cannot appear in heuristics".into(),
            ));
        }
        if !seen.insert(*kind) {
            return Err(NamerError::ProfileInvalid(format!(
                "heuristic '{}' is listed more than once",
                kind
            )));
        }
    }

    if profile.heuristics.contains(&HeuristicKind::Address) && profile.street_keywords.is_empty()
    {
        return Err(NamerError::ProfileInvalid(
            "the address heuristic needs at least one street keyword".into(),
        ));
    }

    if profile.heuristics.contains(&HeuristicKind::Anchor) && profile.anchors.is_empty() {
        return Err(NamerError::ProfileInvalid(
            "the anchor heuristic needs at least one anchor".into(),
        ));
    }

    for anchor in &profile.anchors {
        if anchor.label.trim().is_empty() {
            return Err(NamerError::ProfileInvalid(
                "anchor label must not be empty".into(),
            ));
        }
    }

    for suffix in &profile.legal_suffixes {
        if suffix.trim().is_empty() {
            return Err(NamerError::ProfileInvalid(
                "legal suffix must not be empty".into(),
            ));
        }
    }

    if crate::naming::sanitize(&profile.filename_prefix).is_empty() {
        return Err(NamerError::ProfileInvalid(
            "filename_prefix must contain at least one letter or digit".into(),
        ));
    }

    if crate::naming::sanitize(&profile.placeholder_marker).is_empty() {
        return Err(NamerError::ProfileInvalid(
            "placeholder_marker must contain at least one letter or digit".into(),
        ));
    }

    if let Some(ref folder) = profile.archive_folder {
        if folder.trim().is_empty() || folder.contains("..") || folder.starts_with('/') {
            return Err(NamerError::ProfileInvalid(format!(
                "invalid archive_folder '{}' (expected a relative folder name)",
                folder
            )));
        }
    }

    Ok(())
}
