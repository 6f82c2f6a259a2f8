use crate::categorize::CategorizedReceipt;
use crate::config::SheetLabels;
use crate::error::KasseError;
use crate::report::styles::Styles;
use crate::report::{decimal_cell, FIRST_DATA_ROW, HEADER_ROW};
use rust_xlsxwriter::Worksheet;

const LAST_COL: u16 = 3;

/// Write one location's items, grouped by category and sorted by name.
pub fn write_detail(
    sheet: &mut Worksheet,
    receipt: &CategorizedReceipt,
    location: &str,
    labels: &SheetLabels,
    styles: &Styles,
) -> Result<(), KasseError> {
    sheet.write_string_with_format(
        0,
        0,
        format!("{} {}", labels.detail_heading, location),
        &styles.title,
    )?;

    let headers = [
        &labels.product,
        &labels.net_price,
        &labels.gross_price,
        &labels.quantity,
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(HEADER_ROW, col as u16, *header, &styles.header)?;
    }

    let mut row = FIRST_DATA_ROW;
    for group in &receipt.groups {
        sheet.merge_range(row, 0, row, LAST_COL, &group.category, &styles.detail_category)?;
        row += 1;

        let mut items: Vec<_> = group.items.iter().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));

        for item in items {
            sheet.write_string_with_format(row, 0, &item.name, &styles.cell)?;
            sheet.write_number_with_format(row, 1, decimal_cell(item.net_price), &styles.currency)?;
            sheet.write_number_with_format(row, 2, decimal_cell(item.gross_price), &styles.currency)?;
            sheet.write_number_with_format(row, 3, item.quantity, &styles.cell)?;
            row += 1;
        }
    }

    sheet.set_column_width(0, 50)?;
    for col in 1..=LAST_COL {
        sheet.set_column_width(col, 15)?;
    }

    Ok(())
}
