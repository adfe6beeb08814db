use pdfnamer_core::config::{self, builtin};
use pdfnamer_core::error::NamerError;
use std::path::Path;

pub fn list() -> Result<(), NamerError> {
    println!("Available predefined profiles:\n");
    for name in builtin::PRESETS {
        let profile = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " (default)"
        } else {
            ""
        };
        println!(
            "  {:<18} {} (v{}){}",
            name, profile.name, profile.version, default_marker
        );
        if let Some(ref desc) = profile.description {
            println!("                     {}", desc);
        }
        println!(
            "                     style: {}, archive folder: {}",
            profile.filename_style,
            profile.archive_folder.as_deref().unwrap_or("-")
        );
        println!();
    }
    Ok(())
}

pub fn show(name: &str) -> Result<(), NamerError> {
    let profile = builtin::load_preset(name)?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

pub fn validate(path: &Path) -> Result<(), NamerError> {
    let profile = config::load_profile(path)?;
    let chain: Vec<String> = profile.heuristics.iter().map(|h| h.to_string()).collect();
    println!("Profile is valid: {} (v{})", profile.name, profile.version);
    println!("  Chain: {}", chain.join(" -> "));
    println!(
        "  Filenames: {} ... .pdf ({})",
        profile.filename_prefix, profile.filename_style
    );
    println!(
        "  Blacklist: {} terms, header collection {}",
        profile.blacklist_terms.len(),
        if profile.collect_header_blacklist { "on" } else { "off" }
    );
    Ok(())
}
