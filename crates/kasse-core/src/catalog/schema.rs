use serde::{Deserialize, Serialize};

/// A product catalog: categories with the name patterns that select them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Categories in report order. Earlier categories win when patterns overlap.
    pub categories: Vec<CategoryDef>,
}

/// A single category within a catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    /// Case-insensitive regular expressions matched from the start of a
    /// product name. The pattern text doubles as the product's display name.
    pub patterns: Vec<String>,
}

impl CatalogDef {
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }
}
