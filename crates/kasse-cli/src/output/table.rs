use kasse_core::parsing::ParsedReceipt;
use kasse_core::SalesReport;
use std::fmt::Write;
use std::path::Path;

/// Render a parsed receipt as an aligned text table.
pub fn format_parsed(parsed: &ParsedReceipt) -> String {
    let receipt = &parsed.receipt;
    let mut out = String::new();

    let _ = writeln!(out, "Point of sale: {}", receipt.location);
    let _ = writeln!(out, "Items: {}\n", receipt.items.len());

    let width = receipt
        .items
        .iter()
        .map(|i| i.name.chars().count())
        .max()
        .unwrap_or(10)
        .max("Product".len());

    let _ = writeln!(
        out,
        "  {:<width$}  {:>10}  {:>10}  {:>8}",
        "Product",
        "Net",
        "Gross",
        "Quantity",
        width = width
    );
    let _ = writeln!(out, "  {}", "-".repeat(width + 34));
    for item in &receipt.items {
        let _ = writeln!(
            out,
            "  {:<width$}  {:>10}  {:>10}  {:>8}",
            item.name,
            item.net_price,
            item.gross_price,
            item.quantity,
            width = width
        );
    }

    if !parsed.skipped_rows.is_empty() {
        let _ = writeln!(out, "\nSkipped rows:");
        for row in &parsed.skipped_rows {
            let _ = writeln!(out, "  {}  ({})", row.row_text, row.reason);
        }
    }

    out
}

pub fn print_report_summary(report: &SalesReport, out: &Path) {
    println!(
        "Wrote {} location(s), {} product row(s) to {}\n",
        report.overview.locations.len(),
        report.overview.rows().count(),
        out.display()
    );

    for (location, receipt) in report.overview.locations.iter().zip(&report.receipts) {
        println!("  {}: {} item(s)", location, receipt.items().count());
        if !receipt.dropped.is_empty() {
            println!("    dropped (no catalog match): {}", receipt.dropped.join(", "));
        }
    }

    for section in &report.overview.sections {
        if section.rows.is_empty() {
            continue;
        }
        let quantity: u64 = section.rows.iter().map(|r| r.total).sum();
        println!("  [{}] {} row(s), {} sold", section.category, section.rows.len(), quantity);
    }

    if !report.skipped_rows.is_empty() {
        println!("\n  {} row(s) skipped during parsing", report.skipped_rows.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kasse_core::model::{LineItem, Receipt};
    use kasse_core::parsing::SkippedRow;
    use rust_decimal_macros::dec;

    #[test]
    fn parsed_table_lists_items_and_skips() {
        let parsed = ParsedReceipt {
            receipt: Receipt {
                location: "Hofladen Nord".into(),
                items: vec![LineItem {
                    name: "Vollmilch".into(),
                    net_price: dec!(1.00),
                    gross_price: dec!(1.07),
                    quantity: 2,
                }],
            },
            skipped_rows: vec![SkippedRow {
                row_text: " | 1,00 EUR |  | 2".into(),
                reason: "empty product name".into(),
            }],
        };

        let text = format_parsed(&parsed);
        assert!(text.starts_with("Point of sale: Hofladen Nord"));
        assert!(text.contains("Vollmilch"));
        assert!(text.contains("1.07"));
        assert!(text.contains("(empty product name)"));
    }
}
