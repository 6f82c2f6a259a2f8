use crate::model::LineItem;
use serde::{Deserialize, Serialize};

/// Items of one receipt that fell into one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: String,
    /// Items in receipt order, names already rewritten to display form.
    pub items: Vec<LineItem>,
}

/// Categorization result for a single receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizedReceipt {
    /// Point-of-sale label of the receipt.
    pub location: String,
    /// One group per catalog category in catalog order, followed by the
    /// catch-all group when unmatched items were collected.
    pub groups: Vec<CategoryGroup>,
    /// Names of items left out because no pattern matched and the
    /// unmatched policy is `drop`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<String>,
}

impl CategorizedReceipt {
    pub fn group(&self, category: &str) -> Option<&CategoryGroup> {
        self.groups.iter().find(|g| g.category == category)
    }

    /// All categorized items, group by group.
    pub fn items(&self) -> impl Iterator<Item = (&str, &LineItem)> {
        self.groups
            .iter()
            .flat_map(|g| g.items.iter().map(move |i| (g.category.as_str(), i)))
    }
}
