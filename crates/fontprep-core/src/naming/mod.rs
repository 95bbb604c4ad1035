//! Filename normalization and family-name inference.
//!
//! Turns raw variable-font filenames into stable camel-case identifiers and
//! reconstructs `+`-joined family queries for the stylesheet endpoint.

mod family;
mod sanitize;
mod tokenize;

pub use family::{detect_families, family_query, VARIABLE_FONT_EXT};
pub use sanitize::{sanitize, split_extension};
pub use tokenize::{camel_case, family_words, split_words};

/// Stylesheet filename for a family query: `Material+Symbols+Outlined` → `MaterialSymbolsOutlined.css`.
pub fn stylesheet_filename(query: &str) -> String {
    format!("{}.css", query.replace('+', ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_then_detect_agree() {
        let raw = "MaterialSymbolsOutlined[FILL,GRAD,opsz,wght].ttf";
        let sanitized = sanitize(raw);
        assert_eq!(sanitized, "MaterialSymbolsOutlined.ttf");
        // Detection on the raw and the sanitized name gives the same family.
        assert_eq!(family_query(raw), family_query(&sanitized));
    }

    #[test]
    fn stylesheet_filename_drops_plus() {
        assert_eq!(
            stylesheet_filename("Material+Symbols+Outlined"),
            "MaterialSymbolsOutlined.css"
        );
        assert_eq!(stylesheet_filename("Icons"), "Icons.css");
    }
}
