pub mod catalog;
pub mod parse;
pub mod report;
pub mod serve;

use kasse_core::catalog::{builtin, load_catalog, ProductRules};
use kasse_core::config::ReportOptions;
use kasse_core::error::KasseError;
use std::path::Path;
use tracing::debug;

/// Compile the catalog at `path`, or the built-in one.
pub fn load_rules(path: Option<&Path>) -> Result<ProductRules, KasseError> {
    let catalog = match path {
        Some(p) => load_catalog(p)?,
        None => builtin::load_default()?,
    };
    debug!(catalog = %catalog.name, version = %catalog.version, "catalog loaded");
    ProductRules::compile(&catalog)
}

/// Options from `config` (or defaults) with the table page override applied.
pub fn load_options(config: Option<&Path>, page: Option<usize>) -> Result<ReportOptions, KasseError> {
    let mut options = match config {
        Some(p) => ReportOptions::load(p)?,
        None => ReportOptions::default(),
    };
    if let Some(page) = page {
        options.table_page = page;
        options.validate()?;
    }
    Ok(options)
}
