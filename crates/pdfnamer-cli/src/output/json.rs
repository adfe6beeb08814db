use pdfnamer_core::error::NamerError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), NamerError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
