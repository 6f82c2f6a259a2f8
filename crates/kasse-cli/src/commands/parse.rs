use kasse_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(
    pdf_file: PathBuf,
    output_format: &str,
    config: Option<PathBuf>,
    page: Option<usize>,
) -> Result<(), kasse_core::error::KasseError> {
    let options = super::load_options(config.as_deref(), page)?;
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let parsed = kasse_core::parse_receipt(&pdf_bytes, &extractor, &options)?;

    match output_format {
        "json" => output::json::print(&parsed)?,
        _ => println!("{}", output::table::format_parsed(&parsed)),
    }

    Ok(())
}
