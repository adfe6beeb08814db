use crate::config::schema::NamerConfig;
use crate::config::validate_profile;
use crate::error::NamerError;

const VERTRAGSAUSKUNFT_JSON: &str = include_str!("../../../../profiles/vertragsauskunft.json");
const KOMPAKT_JSON: &str = include_str!("../../../../profiles/kompakt.json");

/// Available predefined profiles. The first one is the default.
pub const PRESETS: &[&str] = &["vertragsauskunft", "kompakt"];

pub const DEFAULT_PRESET: &str = "vertragsauskunft";

/// Load a predefined profile by name.
pub fn load_preset(name: &str) -> Result<NamerConfig, NamerError> {
    let json = match name {
        "vertragsauskunft" => VERTRAGSAUSKUNFT_JSON,
        "kompakt" => KOMPAKT_JSON,
        _ => {
            return Err(NamerError::ProfileInvalid(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    let profile: NamerConfig = serde_json::from_str(json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilenameStyle;

    #[test]
    fn test_all_presets_load() {
        for name in PRESETS {
            assert!(load_preset(name).is_ok(), "preset {name} failed to load");
        }
    }

    #[test]
    fn test_default_preset_matches_builtin_defaults() {
        let preset = load_preset(DEFAULT_PRESET).unwrap();
        let defaults = NamerConfig::default();
        assert_eq!(preset.filename_prefix, defaults.filename_prefix);
        assert_eq!(preset.filename_style, FilenameStyle::Spaced);
        assert_eq!(preset.heuristics, defaults.heuristics);
        assert_eq!(preset.anchors, defaults.anchors);
        assert_eq!(preset.name_region, defaults.name_region);
        assert_eq!(preset.blacklist_terms, defaults.blacklist_terms);
        assert!(preset.archive_folder.is_none());
    }

    #[test]
    fn test_kompakt_preset() {
        let preset = load_preset("kompakt").unwrap();
        assert_eq!(preset.filename_style, FilenameStyle::Compact);
        assert_eq!(preset.archive_folder.as_deref(), Some("umbenannt"));
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
    }
}
