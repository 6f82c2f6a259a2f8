//! Options controlling receipt parsing, categorization and workbook labels.
//!
//! Everything has a default matching the receipts kasse was built for
//! (German point-of-sale exports with the product table on page 3), so
//! `ReportOptions::default()` is the normal starting point. A JSON file can
//! override any subset of fields.

use crate::error::KasseError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the catch-all category for products no catalog pattern matches.
pub const OTHER_CATEGORY: &str = "Other";

/// Suffix appended to a product name for its second price record.
pub const OFFER_SUFFIX: &str = "Angebot";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// 1-based page holding the product table.
    pub table_page: usize,
    pub columns: TableColumns,
    /// Currency marker stripped from price cells before parsing.
    pub currency_marker: String,
    /// Names containing this word get "ab 3. Einkauf" rewritten to "ab 3€ Einkauf".
    pub purchase_keyword: String,
    /// Names containing this word keep their receipt name after categorization.
    pub offer_keyword: String,
    pub unmatched: UnmatchedPolicy,
    pub labels: SheetLabels,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            table_page: 3,
            columns: TableColumns::default(),
            currency_marker: "EUR".into(),
            purchase_keyword: "einkauf".into(),
            offer_keyword: "angebot".into(),
            unmatched: UnmatchedPolicy::default(),
            labels: SheetLabels::default(),
        }
    }
}

impl ReportOptions {
    /// Load options from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, KasseError> {
        let content = std::fs::read_to_string(path)?;
        let options: ReportOptions = serde_json::from_str(&content)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), KasseError> {
        if self.table_page == 0 {
            return Err(KasseError::ParseError(
                "table_page is 1-based and must be at least 1".into(),
            ));
        }
        if self.columns.labels().iter().any(|l| l.trim().is_empty()) {
            return Err(KasseError::ParseError(
                "table column labels must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Header labels of the four product table columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableColumns {
    pub product: String,
    pub net_price: String,
    pub gross_price: String,
    pub quantity: String,
}

impl Default for TableColumns {
    fn default() -> Self {
        Self {
            product: "Produkte".into(),
            net_price: "Nettopreis".into(),
            gross_price: "Bruttopreis".into(),
            quantity: "Menge".into(),
        }
    }
}

impl TableColumns {
    /// Labels in table order: product, net price, gross price, quantity.
    pub fn labels(&self) -> [&str; 4] {
        [
            &self.product,
            &self.net_price,
            &self.gross_price,
            &self.quantity,
        ]
    }
}

/// What happens to line items that match no catalog pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedPolicy {
    /// Collect them under [`OTHER_CATEGORY`].
    #[default]
    Collect,
    /// Leave them out of the report.
    Drop,
}

/// Text written into the generated workbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLabels {
    pub overview_sheet: String,
    pub overview_heading: String,
    /// Detail sheet heading; the location label is appended.
    pub detail_heading: String,
    pub product: String,
    pub net_price: String,
    pub gross_price: String,
    pub quantity: String,
    pub total: String,
}

impl Default for SheetLabels {
    fn default() -> Self {
        Self {
            overview_sheet: "Sales per Location".into(),
            overview_heading: "Sales Analysis".into(),
            detail_heading: "Revenue".into(),
            product: "Products".into(),
            net_price: "Net price".into(),
            gross_price: "Gross price".into(),
            quantity: "Quantity".into(),
            total: "Total".into(),
        }
    }
}
