use crate::catalog::ProductRules;
use crate::categorize::outcome::{CategorizedReceipt, CategoryGroup};
use crate::config::{ReportOptions, UnmatchedPolicy, OTHER_CATEGORY};
use crate::model::{LineItem, Receipt};
use crate::parsing::normalize::{purchase_ordinal_pattern, render_purchase_ordinal};
use tracing::{debug, warn};

/// Assign every item of a receipt to a catalog category.
///
/// Loyalty phrases are rewritten first ("ab 3. Einkauf" -> "ab 3€ Einkauf"),
/// then each item takes the category of the first matching rule. A matched
/// item is renamed to the pattern text unless its name marks it as an offer,
/// so offers stay distinguishable in the report.
pub fn categorize(
    receipt: &Receipt,
    rules: &ProductRules,
    options: &ReportOptions,
) -> CategorizedReceipt {
    let purchase = purchase_ordinal_pattern(&options.purchase_keyword);
    let offer_keyword = options.offer_keyword.to_lowercase();

    let mut groups: Vec<CategoryGroup> = rules
        .categories()
        .iter()
        .map(|c| CategoryGroup {
            category: c.clone(),
            items: Vec::new(),
        })
        .collect();
    let mut dropped = Vec::new();

    for item in &receipt.items {
        let name = render_purchase_ordinal(&item.name, &purchase);

        match rules.first_match(&name) {
            Some(rule) => {
                let is_offer =
                    !offer_keyword.is_empty() && name.to_lowercase().contains(&offer_keyword);
                let display_name = if is_offer {
                    name
                } else {
                    rule.pattern.clone()
                };
                debug!(item = %item.name, category = %rule.category, display = %display_name, "categorized");
                push_item(&mut groups, &rule.category, renamed(item, display_name));
            }
            None => match options.unmatched {
                UnmatchedPolicy::Collect => {
                    debug!(item = %name, "no catalog match, collecting under {OTHER_CATEGORY}");
                    push_item(&mut groups, OTHER_CATEGORY, renamed(item, name));
                }
                UnmatchedPolicy::Drop => {
                    warn!(item = %name, location = %receipt.location, "no catalog match, dropping item");
                    dropped.push(name);
                }
            },
        }
    }

    CategorizedReceipt {
        location: receipt.location.clone(),
        groups,
        dropped,
    }
}

fn renamed(item: &LineItem, name: String) -> LineItem {
    LineItem {
        name,
        ..item.clone()
    }
}

fn push_item(groups: &mut Vec<CategoryGroup>, category: &str, item: LineItem) {
    match groups.iter_mut().find(|g| g.category == category) {
        Some(group) => group.items.push(item),
        None => groups.push(CategoryGroup {
            category: category.to_string(),
            items: vec![item],
        }),
    }
}
