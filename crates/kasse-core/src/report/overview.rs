use crate::aggregate::SalesOverview;
use crate::config::SheetLabels;
use crate::error::KasseError;
use crate::report::styles::Styles;
use crate::report::{decimal_cell, FIRST_DATA_ROW, HEADER_ROW};
use rust_xlsxwriter::Worksheet;

/// First location column; product, net and gross price come before it.
const FIRST_LOCATION_COL: u16 = 3;

/// Write the cross-location overview: category sections, one row per
/// product or Angebot variant, one column per location and a total column.
pub fn write_overview(
    sheet: &mut Worksheet,
    overview: &SalesOverview,
    labels: &SheetLabels,
    styles: &Styles,
) -> Result<(), KasseError> {
    let total_col = FIRST_LOCATION_COL + overview.locations.len() as u16;

    sheet.write_string_with_format(0, 0, &labels.overview_heading, &styles.title)?;

    sheet.write_string_with_format(HEADER_ROW, 0, &labels.product, &styles.header)?;
    sheet.write_string_with_format(HEADER_ROW, 1, &labels.net_price, &styles.header_strong)?;
    sheet.write_string_with_format(HEADER_ROW, 2, &labels.gross_price, &styles.header_strong)?;
    for (i, location) in overview.locations.iter().enumerate() {
        sheet.write_string_with_format(
            HEADER_ROW,
            FIRST_LOCATION_COL + i as u16,
            location,
            &styles.header_centered,
        )?;
    }
    sheet.write_string_with_format(HEADER_ROW, total_col, &labels.total, &styles.header_strong)?;
    sheet.set_row_height(HEADER_ROW, 30)?;

    let mut row = FIRST_DATA_ROW;
    for section in &overview.sections {
        sheet.merge_range(
            row,
            0,
            row,
            total_col,
            &section.category,
            &styles.overview_category,
        )?;
        row += 1;

        for agg in &section.rows {
            sheet.write_string_with_format(row, 0, agg.label(), &styles.cell)?;
            sheet.write_number_with_format(row, 1, decimal_cell(agg.prices.net), &styles.currency)?;
            sheet.write_number_with_format(row, 2, decimal_cell(agg.prices.gross), &styles.currency)?;
            for (i, quantity) in agg.quantities.iter().enumerate() {
                sheet.write_number_with_format(
                    row,
                    FIRST_LOCATION_COL + i as u16,
                    *quantity as f64,
                    &styles.cell,
                )?;
            }
            sheet.write_number_with_format(row, total_col, agg.total as f64, &styles.total)?;
            row += 1;
        }
    }

    sheet.set_column_width(0, 50)?;
    for col in 1..total_col {
        sheet.set_column_width(col, 15)?;
    }
    sheet.set_column_width(total_col, 20)?;

    Ok(())
}
