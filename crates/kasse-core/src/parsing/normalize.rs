use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Normalize a product name to NFKC and trim surrounding whitespace.
///
/// Receipts mix composed and decomposed umlauts and ligatures; catalog
/// patterns are written in composed form.
pub fn normalize_name(raw: &str) -> String {
    raw.nfkc().collect::<String>().trim().to_string()
}

/// Collapse a doubled size marker: "Shirt XXL Blau XXL" -> "Shirt Blau XXL".
///
/// Only applies when "XXL" occurs exactly twice; the first interior
/// " XXL " is removed.
pub fn collapse_duplicate_size(name: &str) -> String {
    if name.matches("XXL").count() == 2 {
        name.replacen(" XXL ", " ", 1)
    } else {
        name.to_string()
    }
}

/// Build the matcher for loyalty phrases like "ab 3. Einkauf".
pub fn purchase_ordinal_pattern(keyword: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b(ab) (\d+)\. ({})", regex::escape(keyword)))
        .expect("escaped keyword always forms a valid pattern")
}

/// Render the ordinal of a loyalty phrase as an amount:
/// "Rabatt ab 3. Einkauf" -> "Rabatt ab 3€ Einkauf".
pub fn render_purchase_ordinal(name: &str, pattern: &Regex) -> String {
    pattern.replace_all(name, "${1} ${2}€ ${3}").into_owned()
}
