pub mod aggregate;
pub mod catalog;
pub mod categorize;
pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod report;

use aggregate::SalesOverview;
use catalog::ProductRules;
use categorize::CategorizedReceipt;
use config::ReportOptions;
use error::KasseError;
use extraction::PdfExtractor;
use parsing::{ParsedReceipt, SkippedRow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything a sales workbook is rendered from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReport {
    /// One entry per input, in input order.
    pub receipts: Vec<CategorizedReceipt>,
    pub overview: SalesOverview,
    /// Rows left out while parsing, across all inputs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_rows: Vec<SkippedRow>,
}

/// Extract and parse a single receipt PDF.
pub fn parse_receipt(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    options: &ReportOptions,
) -> Result<ParsedReceipt, KasseError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    parsing::parse_receipt(&pages, options)
}

/// Parse, categorize and aggregate a batch of receipt PDFs.
///
/// The first failing input aborts the whole batch.
pub fn build_report<B: AsRef<[u8]>>(
    inputs: &[B],
    extractor: &dyn PdfExtractor,
    rules: &ProductRules,
    options: &ReportOptions,
) -> Result<SalesReport, KasseError> {
    if inputs.is_empty() {
        return Err(KasseError::NoInputs);
    }

    let mut receipts = Vec::with_capacity(inputs.len());
    let mut skipped_rows = Vec::new();

    for (i, input) in inputs.iter().enumerate() {
        let parsed = parse_receipt(input.as_ref(), extractor, options)?;
        let categorized = categorize::categorize(&parsed.receipt, rules, options);
        info!(
            input = i + 1,
            location = %categorized.location,
            items = categorized.items().count(),
            dropped = categorized.dropped.len(),
            "receipt processed"
        );
        skipped_rows.extend(parsed.skipped_rows);
        receipts.push(categorized);
    }

    let overview = aggregate::aggregate(&receipts, rules);
    info!(
        receipts = receipts.len(),
        products = overview.rows().count(),
        "report built"
    );

    Ok(SalesReport {
        receipts,
        overview,
        skipped_rows,
    })
}

/// Read receipt PDFs from disk, build the report and write the workbook to
/// `out_path`.
pub fn generate_report(
    paths: &[PathBuf],
    extractor: &dyn PdfExtractor,
    rules: &ProductRules,
    options: &ReportOptions,
    out_path: &Path,
) -> Result<SalesReport, KasseError> {
    let mut inputs = Vec::with_capacity(paths.len());
    for path in paths {
        info!(path = %path.display(), backend = extractor.backend_name(), "reading receipt");
        inputs.push(std::fs::read(path)?);
    }

    let report = build_report(&inputs, extractor, rules, options)?;
    report::write_workbook(&report, &options.labels, out_path)?;
    Ok(report)
}
