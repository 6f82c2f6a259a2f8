pub mod normalize;
pub mod values;

use crate::config::ReportOptions;
use crate::error::KasseError;
use crate::extraction::table::{self, RawRow};
use crate::extraction::PageContent;
use crate::model::{LineItem, Receipt};
use normalize::{collapse_duplicate_size, normalize_name};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use values::{parse_price, parse_quantity};

/// A table row that was discarded during parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row_text: String,
    pub reason: String,
}

/// Result of parsing one receipt, with the rows that were left out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedReceipt {
    pub receipt: Receipt,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_rows: Vec<SkippedRow>,
}

/// Parse extracted page content into a receipt.
///
/// The location label is the second non-blank line of the first page; the
/// product table is read from `options.table_page`.
pub fn parse_receipt(
    pages: &[PageContent],
    options: &ReportOptions,
) -> Result<ParsedReceipt, KasseError> {
    let location = location_label(pages)?;

    let page = options
        .table_page
        .checked_sub(1)
        .and_then(|i| pages.get(i))
        .ok_or(KasseError::MissingPage {
            page: options.table_page,
            available: pages.len(),
        })?;

    let labels = options.columns.labels();
    let table = table::extract_stream_table(page, &labels).ok_or_else(|| {
        KasseError::ParseError(format!(
            "product table header not found on page {} (missing columns: {})",
            page.page_number,
            table::missing_labels(page, &labels).join(", ")
        ))
    })?;

    let (items, skipped_rows) = parse_rows(&table.rows, options)?;
    debug!(
        location = %location,
        items = items.len(),
        skipped = skipped_rows.len(),
        "parsed receipt table"
    );

    Ok(ParsedReceipt {
        receipt: Receipt { location, items },
        skipped_rows,
    })
}

/// The point-of-sale label: second non-blank line of the first page.
fn location_label(pages: &[PageContent]) -> Result<String, KasseError> {
    pages
        .first()
        .and_then(|p| {
            p.lines
                .iter()
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .nth(1)
        })
        .map(|l| l.to_string())
        .ok_or_else(|| {
            KasseError::ParseError("no point-of-sale label on the first page".into())
        })
}

/// How a single table row contributes to the item list.
#[derive(Debug, PartialEq, Eq)]
enum RowKind {
    Item,
    /// Wrapped text belonging to the previous item's name.
    Continuation,
    Skip(&'static str),
}

const PRODUCT: usize = 0;
const NET_PRICE: usize = 1;
const GROSS_PRICE: usize = 2;
const QUANTITY: usize = 3;

fn classify_row(row: &RawRow) -> RowKind {
    let name = row.cell(PRODUCT).trim();
    let net = row.cell(NET_PRICE).trim();
    let quantity = row.cell(QUANTITY).trim();

    if name.is_empty() {
        RowKind::Skip("empty product name")
    } else if net.is_empty() && quantity.is_empty() {
        RowKind::Continuation
    } else if net.is_empty() {
        RowKind::Skip("quantity without net price")
    } else {
        RowKind::Item
    }
}

/// Turn raw table rows into line items.
///
/// Fails on the first row whose price or quantity cannot be parsed.
fn parse_rows(
    rows: &[RawRow],
    options: &ReportOptions,
) -> Result<(Vec<LineItem>, Vec<SkippedRow>), KasseError> {
    let mut items: Vec<LineItem> = Vec::new();
    let mut skipped = Vec::new();

    for row in rows {
        match classify_row(row) {
            RowKind::Item => {
                let item = parse_item(row, &options.currency_marker)?;
                debug!(name = %item.name, net = %item.net_price, quantity = item.quantity, "line item");
                items.push(item);
            }
            RowKind::Continuation => match items.last_mut() {
                Some(previous) => append_continuation(previous, row.cell(PRODUCT)),
                None => {
                    warn!(row = %row.display(), "continuation row before any item");
                    skipped.push(SkippedRow {
                        row_text: row.display(),
                        reason: "continuation without preceding item".into(),
                    });
                }
            },
            RowKind::Skip(reason) => {
                warn!(row = %row.display(), reason, "skipping row");
                skipped.push(SkippedRow {
                    row_text: row.display(),
                    reason: reason.into(),
                });
            }
        }
    }

    Ok((items, skipped))
}

fn parse_item(row: &RawRow, currency_marker: &str) -> Result<LineItem, KasseError> {
    let name = normalize_name(&collapse_duplicate_size(row.cell(PRODUCT).trim()));
    let net_price = parse_price(row.cell(NET_PRICE), currency_marker)
        .map_err(|e| row_error(row, e))?;
    let gross_price = parse_price(row.cell(GROSS_PRICE), currency_marker)
        .map_err(|e| row_error(row, e))?;
    let quantity = parse_quantity(row.cell(QUANTITY)).map_err(|e| row_error(row, e))?;

    Ok(LineItem {
        name,
        net_price,
        gross_price,
        quantity,
    })
}

/// The wrapped line carries the rest of a price phrase ("ab 20." / "Einkauf"):
/// the trailing character of the previous name is replaced by a currency
/// sign before the fragment is appended.
fn append_continuation(previous: &mut LineItem, fragment: &str) {
    previous.name.pop();
    previous.name.push_str("€ ");
    previous.name.push_str(&normalize_name(fragment));
}

fn row_error(row: &RawRow, err: KasseError) -> KasseError {
    match err {
        KasseError::ParseError(msg) => {
            KasseError::ParseError(format!("{msg} (row: {})", row.display()))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(cells: [&str; 4]) -> RawRow {
        RawRow {
            line_index: 0,
            cells: cells.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_normal_row() {
        let (items, skipped) =
            parse_rows(&[row(["Milk", "1,50", "1,65", "2"])], &ReportOptions::default()).unwrap();
        assert!(skipped.is_empty());
        assert_eq!(
            items,
            vec![LineItem {
                name: "Milk".into(),
                net_price: dec!(1.50),
                gross_price: dec!(1.65),
                quantity: 2,
            }]
        );
    }

    #[test]
    fn test_classify_row() {
        assert_eq!(classify_row(&row(["Milch", "1,50", "1,65", "2"])), RowKind::Item);
        assert_eq!(classify_row(&row(["Einkauf", "", "", ""])), RowKind::Continuation);
        assert_eq!(
            classify_row(&row(["Einkauf", "", "0,10", ""])),
            RowKind::Continuation
        );
        assert_eq!(
            classify_row(&row(["Pfand", "", "", "3"])),
            RowKind::Skip("quantity without net price")
        );
        assert_eq!(
            classify_row(&row(["", "1,00", "1,19", "1"])),
            RowKind::Skip("empty product name")
        );
    }

    #[test]
    fn test_continuation_appends_to_previous_item() {
        let (items, _) = parse_rows(
            &[
                row(["Kaffee", "2,00 EUR", "2,38 EUR", "4"]),
                row(["Rabatt ab 20.", "0,50 EUR", "0,60 EUR", "1"]),
                row(["Einkauf", "", "", ""]),
            ],
            &ReportOptions::default(),
        )
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Kaffee");
        assert_eq!(items[1].name, "Rabatt ab 20€ Einkauf");
    }

    #[test]
    fn test_leading_continuation_is_skipped() {
        let (items, skipped) =
            parse_rows(&[row(["Einkauf", "", "", ""])], &ReportOptions::default()).unwrap();
        assert!(items.is_empty());
        assert_eq!(skipped.len(), 1);
    }

    #[test]
    fn test_duplicate_size_collapsed() {
        let (items, _) = parse_rows(
            &[row(["Becher XXL Vanille XXL", "3,00", "3,57", "1"])],
            &ReportOptions::default(),
        )
        .unwrap();
        assert_eq!(items[0].name, "Becher Vanille XXL");
    }

    #[test]
    fn test_invalid_price_fails() {
        let err = parse_rows(&[row(["Milch", "abc", "1,65", "2"])], &ReportOptions::default())
            .unwrap_err();
        assert!(matches!(err, KasseError::ParseError(_)));
    }

    #[test]
    fn test_missing_quantity_with_price_fails() {
        assert!(parse_rows(&[row(["Milch", "1,50", "1,65", ""])], &ReportOptions::default()).is_err());
    }

    fn page(number: usize, lines: &[&str]) -> PageContent {
        PageContent {
            page_number: number,
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_parse_receipt() {
        let pages = vec![
            page(1, &["", "Kassenbericht", "  Filiale Marktplatz  ", "März 2024"]),
            page(2, &["Umsätze nach Zahlart"]),
            page(
                3,
                &[
                    "Produkte                    Nettopreis   Bruttopreis   Menge",
                    "Milch                         1,50 EUR      1,65 EUR       2",
                ],
            ),
        ];
        let parsed = parse_receipt(&pages, &ReportOptions::default()).unwrap();
        assert_eq!(parsed.receipt.location, "Filiale Marktplatz");
        assert_eq!(parsed.receipt.items.len(), 1);
        assert_eq!(parsed.receipt.items[0].gross_price, dec!(1.65));
    }

    #[test]
    fn test_parse_receipt_missing_page() {
        let pages = vec![page(1, &["Kassenbericht", "Filiale"])];
        let err = parse_receipt(&pages, &ReportOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            KasseError::MissingPage {
                page: 3,
                available: 1
            }
        ));
    }

    #[test]
    fn test_parse_receipt_missing_columns() {
        let pages = vec![
            page(1, &["Kassenbericht", "Filiale"]),
            page(2, &[]),
            page(3, &["Produkte   Nettopreis   Menge"]),
        ];
        let err = parse_receipt(&pages, &ReportOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Bruttopreis"));
    }
}
