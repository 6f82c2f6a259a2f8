use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product line of a receipt's sales table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub net_price: Decimal,
    pub gross_price: Decimal,
    pub quantity: u32,
}

impl LineItem {
    pub fn prices(&self) -> PricePair {
        PricePair {
            net: self.net_price,
            gross: self.gross_price,
        }
    }
}

/// Net and gross price of a product, compared by net price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePair {
    pub net: Decimal,
    pub gross: Decimal,
}

/// Products sold at one point of sale, as read from one PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Point-of-sale label from the first page header.
    pub location: String,
    pub items: Vec<LineItem>,
}
