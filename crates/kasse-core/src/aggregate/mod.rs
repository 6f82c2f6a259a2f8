//! Cross-location aggregation of categorized receipts.
//!
//! Every product gets a primary price record holding the lowest net price
//! seen across all receipts. When the same product was also sold at a higher
//! net price, a second "Angebot" record holds the highest one. Both are
//! computed from the full set of receipts, so the result does not depend on
//! the order the receipts are given in.
//!
//! Quantities are placed by price: items sold at the primary net price count
//! towards the primary row, anything above it towards the Angebot row.

use crate::catalog::ProductRules;
use crate::categorize::CategorizedReceipt;
use crate::config::OFFER_SUFFIX;
use crate::model::PricePair;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Regular,
    Offer,
}

/// One product (or its Angebot variant) across all locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub product: String,
    pub variant: Variant,
    pub prices: PricePair,
    /// Quantity per location, in [`SalesOverview::locations`] order.
    pub quantities: Vec<u64>,
    pub total: u64,
}

impl AggregateRow {
    /// Row label as shown in the report: the product name, with the
    /// Angebot suffix for the second price record.
    pub fn label(&self) -> String {
        match self.variant {
            Variant::Regular => self.product.clone(),
            Variant::Offer => format!("{} {}", self.product, OFFER_SUFFIX),
        }
    }
}

/// Rows of one category, sorted by product name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewSection {
    pub category: String,
    pub rows: Vec<AggregateRow>,
}

/// The cross-location quantity matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesOverview {
    /// Column labels, one per receipt, unique.
    pub locations: Vec<String>,
    pub sections: Vec<OverviewSection>,
}

impl SalesOverview {
    /// Price records keyed by row label ("Milch", "Milch Angebot", ...).
    pub fn price_table(&self) -> BTreeMap<String, PricePair> {
        self.rows().map(|r| (r.label(), r.prices)).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &AggregateRow> {
        self.sections.iter().flat_map(|s| s.rows.iter())
    }

    /// Find a row by its label.
    pub fn row(&self, label: &str) -> Option<&AggregateRow> {
        self.rows().find(|r| r.label() == label)
    }

    pub fn section(&self, category: &str) -> Option<&OverviewSection> {
        self.sections.iter().find(|s| s.category == category)
    }
}

/// Lowest and highest price seen for a product.
#[derive(Debug, Clone)]
struct PriceRange {
    category: String,
    low: PricePair,
    high: PricePair,
}

impl PriceRange {
    fn has_offer(&self) -> bool {
        self.high.net > self.low.net
    }

    fn variant_for(&self, net: rust_decimal::Decimal) -> Variant {
        if net > self.low.net {
            Variant::Offer
        } else {
            Variant::Regular
        }
    }
}

/// Merge categorized receipts into the overview matrix.
///
/// Sections follow catalog order; categories outside the catalog (the
/// catch-all bucket) come last in the order they were first seen. Every
/// catalog category gets a section, even without rows.
pub fn aggregate(receipts: &[CategorizedReceipt], rules: &ProductRules) -> SalesOverview {
    let locations = column_labels(receipts);
    let ranges = price_ranges(receipts);

    let mut categories: Vec<String> = rules.categories().to_vec();
    for receipt in receipts {
        for group in &receipt.groups {
            if !categories.contains(&group.category) {
                categories.push(group.category.clone());
            }
        }
    }

    let mut sections: Vec<OverviewSection> = Vec::with_capacity(categories.len());
    let mut positions: HashMap<(String, Variant), (usize, usize)> = HashMap::new();

    for category in &categories {
        let section_idx = sections.len();
        let mut rows = Vec::new();
        // BTreeMap iteration keeps products alphabetical.
        for (product, range) in ranges.iter().filter(|(_, r)| &r.category == category) {
            positions.insert((product.clone(), Variant::Regular), (section_idx, rows.len()));
            rows.push(empty_row(product, Variant::Regular, range.low, locations.len()));

            if range.has_offer() {
                positions.insert((product.clone(), Variant::Offer), (section_idx, rows.len()));
                rows.push(empty_row(product, Variant::Offer, range.high, locations.len()));
            }
        }
        sections.push(OverviewSection {
            category: category.clone(),
            rows,
        });
    }

    for (column, receipt) in receipts.iter().enumerate() {
        for (_, item) in receipt.items() {
            let Some(range) = ranges.get(&item.name) else {
                continue;
            };
            let variant = range.variant_for(item.net_price);
            if let Some(&(s, r)) = positions.get(&(item.name.clone(), variant)) {
                let row = &mut sections[s].rows[r];
                row.quantities[column] += u64::from(item.quantity);
                row.total += u64::from(item.quantity);
            }
        }
    }

    debug!(
        locations = locations.len(),
        rows = sections.iter().map(|s| s.rows.len()).sum::<usize>(),
        "aggregated overview"
    );

    SalesOverview {
        locations,
        sections,
    }
}

fn empty_row(product: &str, variant: Variant, prices: PricePair, columns: usize) -> AggregateRow {
    AggregateRow {
        product: product.to_string(),
        variant,
        prices,
        quantities: vec![0; columns],
        total: 0,
    }
}

/// Collect the lowest and highest price per product name.
///
/// A product keeps the category it was first seen in. Ties keep the
/// first-seen gross price.
fn price_ranges(receipts: &[CategorizedReceipt]) -> BTreeMap<String, PriceRange> {
    let mut ranges: BTreeMap<String, PriceRange> = BTreeMap::new();

    for receipt in receipts {
        for (category, item) in receipt.items() {
            let prices = item.prices();
            match ranges.get_mut(&item.name) {
                None => {
                    ranges.insert(
                        item.name.clone(),
                        PriceRange {
                            category: category.to_string(),
                            low: prices,
                            high: prices,
                        },
                    );
                }
                Some(range) => {
                    if prices.net < range.low.net {
                        range.low = prices;
                    }
                    if prices.net > range.high.net {
                        range.high = prices;
                    }
                }
            }
        }
    }

    ranges
}

/// One column per receipt. A location that appears more than once gets a
/// running number: "Markt", "Markt (2)", ... skipping labels already in use.
fn column_labels(receipts: &[CategorizedReceipt]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut labels = Vec::with_capacity(receipts.len());

    for receipt in receipts {
        let mut label = receipt.location.clone();
        if taken.contains(&label) {
            warn!(location = %receipt.location, "location appears in more than one receipt");
            let mut n = 2;
            while taken.contains(&label) {
                label = format!("{} ({})", receipt.location, n);
                n += 1;
            }
        }
        taken.insert(label.clone());
        labels.push(label);
    }

    labels
}
