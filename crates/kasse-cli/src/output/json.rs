use kasse_core::error::KasseError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), KasseError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
