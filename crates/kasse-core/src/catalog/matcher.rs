use crate::catalog::schema::CatalogDef;
use crate::catalog::validate_catalog;
use crate::error::KasseError;
use regex::{Regex, RegexBuilder};

/// One catalog pattern, compiled.
#[derive(Debug, Clone)]
pub struct ProductRule {
    pub category: String,
    /// Pattern text as written in the catalog; used as the display name.
    pub pattern: String,
    regex: Regex,
}

impl ProductRule {
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

/// Catalog patterns flattened into one ordered rule list.
///
/// Rules are evaluated top to bottom: categories in catalog order, patterns
/// in list order. The first match decides the category.
#[derive(Debug, Clone)]
pub struct ProductRules {
    categories: Vec<String>,
    rules: Vec<ProductRule>,
}

impl ProductRules {
    pub fn compile(catalog: &CatalogDef) -> Result<Self, KasseError> {
        validate_catalog(catalog)?;

        let mut rules = Vec::new();
        for category in &catalog.categories {
            for pattern in &category.patterns {
                // Anchored at the start only, case-insensitive.
                let regex = RegexBuilder::new(&format!("^(?:{pattern})"))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| {
                        KasseError::CatalogInvalid(format!(
                            "category '{}' has invalid pattern '{}': {}",
                            category.name, pattern, e
                        ))
                    })?;
                rules.push(ProductRule {
                    category: category.name.clone(),
                    pattern: pattern.clone(),
                    regex,
                });
            }
        }

        Ok(Self {
            categories: catalog.category_names().map(String::from).collect(),
            rules,
        })
    }

    /// Category names in catalog order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn rules(&self) -> &[ProductRule] {
        &self.rules
    }

    /// First rule matching the start of `name`, if any.
    pub fn first_match(&self, name: &str) -> Option<&ProductRule> {
        self.rules.iter().find(|r| r.matches(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_catalog_str;

    fn rules(json: &str) -> ProductRules {
        ProductRules::compile(&parse_catalog_str(json).unwrap()).unwrap()
    }

    #[test]
    fn test_first_match_simple() {
        let r = rules(
            r#"{ "name": "t", "version": "1", "categories": [
                { "name": "Dairy", "patterns": ["Milk"] } ] }"#,
        );
        let hit = r.first_match("Milk").unwrap();
        assert_eq!(hit.category, "Dairy");
        assert_eq!(hit.pattern, "Milk");
    }

    #[test]
    fn test_match_is_case_insensitive_and_anchored() {
        let r = rules(
            r#"{ "name": "t", "version": "1", "categories": [
                { "name": "Dairy", "patterns": ["Milk"] } ] }"#,
        );
        assert!(r.first_match("MILK 1,5% 1L").is_some());
        assert!(r.first_match("Buttermilk").is_none());
    }

    #[test]
    fn test_catalog_order_wins() {
        let r = rules(
            r#"{ "name": "t", "version": "1", "categories": [
                { "name": "Drinks", "patterns": ["Kaffee$", "Kaffee"] },
                { "name": "Snacks", "patterns": ["Kaffee Kuchen"] } ] }"#,
        );
        let hit = r.first_match("Kaffee Kuchen").unwrap();
        assert_eq!(hit.category, "Drinks");
        assert_eq!(hit.pattern, "Kaffee");
        assert_eq!(r.rules().len(), 3);
    }

    #[test]
    fn test_alternation_stays_anchored() {
        let r = rules(
            r#"{ "name": "t", "version": "1", "categories": [
                { "name": "Bakery", "patterns": ["Brot|Brötchen"] } ] }"#,
        );
        assert!(r.first_match("Brötchen hell").is_some());
        assert!(r.first_match("Vollkornbrötchen").is_none());
    }
}
