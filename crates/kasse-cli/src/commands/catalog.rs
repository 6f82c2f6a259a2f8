use kasse_core::catalog::schema::CatalogDef;
use kasse_core::catalog::{builtin, load_catalog, ProductRules};
use kasse_core::error::KasseError;
use std::collections::HashMap;
use std::path::Path;

use crate::output;

pub fn show(path: Option<&Path>, output_format: &str) -> Result<(), KasseError> {
    let catalog = match path {
        Some(p) => load_catalog(p)?,
        None => builtin::load_default()?,
    };

    if output_format == "json" {
        return output::json::print(&catalog);
    }

    println!("{} (version {})\n", catalog.name, catalog.version);
    if let Some(ref desc) = catalog.description {
        println!("{}\n", desc);
    }

    let width = catalog
        .categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(10);

    for category in &catalog.categories {
        println!(
            "  {:<width$}  {}",
            category.name,
            category.patterns.join(", "),
            width = width
        );
    }
    println!();
    println!("Items matching no pattern are listed under \"Other\" unless the");
    println!("options file sets \"unmatched\": \"drop\".");

    Ok(())
}

pub fn schema() -> Result<(), KasseError> {
    print!(
        r#"Catalog Schema
==============

A catalog assigns receipt products to report categories. Each product
name is tested against the patterns in order: categories top to bottom,
patterns left to right. The first pattern matching the start of the name
(case-insensitive) decides the category, and the product is listed in the
report under the pattern text.

Top-level fields:
  name          (string, required)  Human-readable name of the catalog
  description   (string, optional)  What this catalog is for
  version       (string, required)  Version identifier (e.g., "2024.1")
  categories    (array, required)   Ordered list of categories (see below).
                                    The report shows them in this order.

Each entry in "categories":
  name          (string, required)  Category heading in the report.
                                    Must be unique.
  patterns      (array, required)   Regular expressions, at least one.
                                    Anchored at the start of the product
                                    name only: "Milch" matches
                                    "Milch 1,5%" but not "Buttermilch".

Example:
{{
  "name": "Wochenmarkt",
  "description": "Stand catalog for the Saturday market",
  "version": "1.0",
  "categories": [
    {{ "name": "Molkereiprodukte", "patterns": ["Vollmilch", "Joghurt"] }},
    {{ "name": "Backwaren", "patterns": ["Brot|Brötchen", "Brezel"] }},
    {{ "name": "Gutscheine", "patterns": ["Gutschein ab \\d+€ Einkauf"] }}
  ]
}}

Note: patterns are matched after "ab 3. Einkauf" has been rewritten to
"ab 3€ Einkauf". Products whose name contains "Angebot" keep their full
receipt name instead of the pattern text.
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), KasseError> {
    let catalog = load_catalog(file)?;
    let rules = ProductRules::compile(&catalog)?;

    println!(
        "Catalog '{}' (v{}) is valid.",
        catalog.name, catalog.version
    );
    println!("  Categories: {}", catalog.category_names().collect::<Vec<_>>().join(", "));
    println!("  Patterns: {}", rules.rules().len());

    let warnings = duplicate_patterns(&catalog);
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

/// Patterns listed more than once; every occurrence after the first is
/// unreachable.
fn duplicate_patterns(catalog: &CatalogDef) -> Vec<String> {
    let mut first_seen: HashMap<String, &str> = HashMap::new();
    let mut warnings = Vec::new();

    for category in &catalog.categories {
        for pattern in &category.patterns {
            match first_seen.get(&pattern.to_lowercase()) {
                Some(owner) => warnings.push(format!(
                    "pattern '{}' in '{}' is already listed under '{}' and never matches",
                    pattern, category.name, owner
                )),
                None => {
                    first_seen.insert(pattern.to_lowercase(), &category.name);
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use kasse_core::catalog::parse_catalog_str;

    #[test]
    fn duplicate_pattern_reported() {
        let catalog = parse_catalog_str(
            r#"{ "name": "t", "version": "1", "categories": [
                { "name": "Dairy", "patterns": ["Milch"] },
                { "name": "Drinks", "patterns": ["milch", "Saft"] } ] }"#,
        )
        .unwrap();
        let warnings = duplicate_patterns(&catalog);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'Dairy'"));
    }

    #[test]
    fn builtin_catalog_has_no_duplicates() {
        let catalog = builtin::load_default().unwrap();
        assert!(duplicate_patterns(&catalog).is_empty());
    }
}
