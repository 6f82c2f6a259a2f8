pub mod builtin;
pub mod matcher;
pub mod schema;

use crate::error::KasseError;
use regex::Regex;
use schema::CatalogDef;
use std::collections::HashSet;
use std::path::Path;

pub use matcher::{ProductRule, ProductRules};

/// Load a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<CatalogDef, KasseError> {
    let content = std::fs::read_to_string(path).map_err(|e| KasseError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_catalog(&content, path)
}

/// Parse a catalog from a JSON string.
pub fn parse_catalog(json: &str, source: &Path) -> Result<CatalogDef, KasseError> {
    let catalog: CatalogDef = serde_json::from_str(json).map_err(|e| KasseError::CatalogLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Parse a catalog from a JSON string (no file path context).
pub fn parse_catalog_str(json: &str) -> Result<CatalogDef, KasseError> {
    let catalog: CatalogDef = serde_json::from_str(json).map_err(KasseError::Json)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Validate that a catalog is well-formed.
pub fn validate_catalog(catalog: &CatalogDef) -> Result<(), KasseError> {
    if catalog.categories.is_empty() {
        return Err(KasseError::CatalogInvalid(
            "categories must not be empty".into(),
        ));
    }

    let mut seen = HashSet::new();
    for category in &catalog.categories {
        if category.name.trim().is_empty() {
            return Err(KasseError::CatalogInvalid(
                "category name must not be empty".into(),
            ));
        }

        if !seen.insert(category.name.as_str()) {
            return Err(KasseError::CatalogInvalid(format!(
                "duplicate category '{}'",
                category.name
            )));
        }

        if category.patterns.is_empty() {
            return Err(KasseError::CatalogInvalid(format!(
                "category '{}' has no patterns",
                category.name
            )));
        }

        for pattern in &category.patterns {
            if pattern.trim().is_empty() {
                return Err(KasseError::CatalogInvalid(format!(
                    "category '{}' has an empty pattern",
                    category.name
                )));
            }
            if let Err(e) = Regex::new(pattern) {
                return Err(KasseError::CatalogInvalid(format!(
                    "category '{}' has invalid pattern '{}': {}",
                    category.name, pattern, e
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_catalog() {
        let json = r#"{
            "name": "Test",
            "version": "1.0",
            "categories": [
                { "name": "Dairy", "patterns": ["Milk", "Joghurt .*"] },
                { "name": "Bakery", "patterns": ["Bread"] }
            ]
        }"#;
        let catalog = parse_catalog_str(json).unwrap();
        assert_eq!(catalog.name, "Test");
        assert_eq!(
            catalog.category_names().collect::<Vec<_>>(),
            vec!["Dairy", "Bakery"]
        );
        assert_eq!(catalog.categories[0].patterns.len(), 2);
    }

    #[test]
    fn test_empty_categories_rejected() {
        let json = r#"{ "name": "Bad", "version": "1.0", "categories": [] }"#;
        assert!(parse_catalog_str(json).is_err());
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "categories": [
                { "name": "Dairy", "patterns": ["Milk"] },
                { "name": "Dairy", "patterns": ["Cheese"] }
            ]
        }"#;
        assert!(parse_catalog_str(json).is_err());
    }

    #[test]
    fn test_category_without_patterns_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "categories": [ { "name": "Dairy", "patterns": [] } ]
        }"#;
        assert!(parse_catalog_str(json).is_err());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "categories": [ { "name": "Dairy", "patterns": ["Milk (1,5%"] } ]
        }"#;
        let err = parse_catalog_str(json).unwrap_err();
        assert!(err.to_string().contains("Milk (1,5%"));
    }
}
