pub mod inspect;
pub mod profiles;
pub mod rename;

use pdfnamer_core::config::{self, builtin, NamerConfig};
use pdfnamer_core::error::NamerError;
use std::path::Path;

/// A custom profile file wins over a preset; neither means the default preset.
fn load_config(path: Option<&Path>, preset: Option<&str>) -> Result<NamerConfig, NamerError> {
    match (path, preset) {
        (Some(path), _) => config::load_profile(path),
        (None, Some(name)) => builtin::load_preset(name),
        (None, None) => builtin::load_preset(builtin::DEFAULT_PRESET),
    }
}

/// The name a document is reported and matched under.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
