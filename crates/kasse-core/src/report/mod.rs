pub mod detail;
pub mod overview;
pub mod styles;

use crate::config::SheetLabels;
use crate::error::KasseError;
use crate::SalesReport;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::Workbook;
use std::collections::HashSet;
use std::path::Path;
use styles::Styles;
use tracing::info;

/// Row (0-based) holding the column headings on every sheet.
pub(crate) const HEADER_ROW: u32 = 2;
pub(crate) const FIRST_DATA_ROW: u32 = 3;

const MAX_SHEET_NAME: usize = 31;
const INVALID_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Build the whole workbook in memory: the overview sheet first, then one
/// detail sheet per receipt.
pub fn render_workbook(report: &SalesReport, labels: &SheetLabels) -> Result<Vec<u8>, KasseError> {
    let styles = Styles::new();
    let mut workbook = Workbook::new();
    let mut taken = HashSet::new();

    let overview_name = unique_sheet_name(&labels.overview_sheet, &mut taken);
    let sheet = workbook.add_worksheet();
    sheet.set_name(&overview_name)?;
    overview::write_overview(sheet, &report.overview, labels, &styles)?;

    for (receipt, location) in report.receipts.iter().zip(&report.overview.locations) {
        let name = unique_sheet_name(location, &mut taken);
        let sheet = workbook.add_worksheet();
        sheet.set_name(&name)?;
        detail::write_detail(sheet, receipt, location, labels, &styles)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Render the workbook and write it to `path`.
///
/// Nothing is written unless the whole workbook renders.
pub fn write_workbook(
    report: &SalesReport,
    labels: &SheetLabels,
    path: &Path,
) -> Result<(), KasseError> {
    let bytes = render_workbook(report, labels)?;
    std::fs::write(path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "workbook written");
    Ok(())
}

pub(crate) fn decimal_cell(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Make `raw` a valid, unused worksheet name.
///
/// Excel limits names to 31 characters, forbids `[]:*?/\`, rejects leading
/// or trailing apostrophes and compares names case-insensitively.
fn unique_sheet_name(raw: &str, taken: &mut HashSet<String>) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if INVALID_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').trim();
    let base = if cleaned.is_empty() { "Sheet" } else { cleaned };

    let mut candidate = truncate_chars(base, MAX_SHEET_NAME);
    let mut n = 2;
    while taken.contains(&candidate.to_lowercase()) {
        let suffix = format!(" ({n})");
        candidate = format!(
            "{}{}",
            truncate_chars(base, MAX_SHEET_NAME - suffix.chars().count()).trim_end(),
            suffix
        );
        n += 1;
    }

    taken.insert(candidate.to_lowercase());
    candidate
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_name_passthrough() {
        let mut taken = HashSet::new();
        assert_eq!(unique_sheet_name("Filiale Nord", &mut taken), "Filiale Nord");
    }

    #[test]
    fn test_sheet_name_invalid_chars() {
        let mut taken = HashSet::new();
        assert_eq!(
            unique_sheet_name("Markt [Innenstadt]: 1/2", &mut taken),
            "Markt _Innenstadt__ 1_2"
        );
    }

    #[test]
    fn test_sheet_name_truncated() {
        let mut taken = HashSet::new();
        let name = unique_sheet_name(&"x".repeat(40), &mut taken);
        assert_eq!(name.chars().count(), 31);
    }

    #[test]
    fn test_sheet_name_collision_case_insensitive() {
        let mut taken = HashSet::new();
        unique_sheet_name("Sales per Location", &mut taken);
        assert_eq!(
            unique_sheet_name("sales per location", &mut taken),
            "sales per location (2)"
        );
        assert_eq!(
            unique_sheet_name("Sales per Location", &mut taken),
            "Sales per Location (3)"
        );
    }

    #[test]
    fn test_sheet_name_long_collision_stays_within_limit() {
        let mut taken = HashSet::new();
        let long = "Wochenmarkt Am Alten Rathausplatz";
        let first = unique_sheet_name(long, &mut taken);
        let second = unique_sheet_name(long, &mut taken);
        assert_eq!(first.chars().count(), 31);
        assert!(second.ends_with(" (2)"));
        assert!(second.chars().count() <= 31);
    }

    #[test]
    fn test_sheet_name_empty() {
        let mut taken = HashSet::new();
        assert_eq!(unique_sheet_name(" '' ", &mut taken), "Sheet");
    }
}
