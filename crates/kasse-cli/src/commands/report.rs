use kasse_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(
    pdf_files: Vec<PathBuf>,
    out: PathBuf,
    catalog: Option<PathBuf>,
    config: Option<PathBuf>,
    page: Option<usize>,
) -> Result<(), kasse_core::error::KasseError> {
    let rules = super::load_rules(catalog.as_deref())?;
    let options = super::load_options(config.as_deref(), page)?;
    let extractor = PdftotextExtractor::new();

    let report = kasse_core::generate_report(&pdf_files, &extractor, &rules, &options, &out)?;

    output::table::print_report_summary(&report, &out);
    Ok(())
}
