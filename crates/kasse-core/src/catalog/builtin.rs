use crate::catalog::parse_catalog_str;
use crate::catalog::schema::CatalogDef;
use crate::error::KasseError;

const DEFAULT_CATALOG_JSON: &str = include_str!("../../../../catalog/default.json");

/// Load the catalog shipped with kasse.
pub fn load_default() -> Result<CatalogDef, KasseError> {
    parse_catalog_str(DEFAULT_CATALOG_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductRules;

    #[test]
    fn test_default_catalog_compiles() {
        let catalog = load_default().unwrap();
        assert_eq!(catalog.categories[0].name, "Backwaren");
        let rules = ProductRules::compile(&catalog).unwrap();
        assert_eq!(
            rules.first_match("Brötchen hell").unwrap().category,
            "Backwaren"
        );
        assert_eq!(rules.first_match("Eier 10er").unwrap().category, "Eier");
    }

    #[test]
    fn test_default_catalog_order_puts_buttermilk_before_butter() {
        let rules = ProductRules::compile(&load_default().unwrap()).unwrap();
        assert_eq!(
            rules.first_match("Buttermilch 500ml").unwrap().pattern,
            "Buttermilch"
        );
    }
}
