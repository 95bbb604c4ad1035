//! Font-family inference from variable-font filenames.

use std::collections::HashSet;

use super::sanitize::{sanitize, split_extension};
use super::tokenize::family_words;

/// Extension of the variable-font files that drive family detection.
pub const VARIABLE_FONT_EXT: &str = ".ttf";

/// Derives the `+`-joined family query for one filename, or `None` when the
/// file is not a variable font or yields no words.
pub fn family_query(filename: &str) -> Option<String> {
    if !is_variable_font(filename) {
        return None;
    }
    let sanitized = sanitize(filename);
    let (base, _) = split_extension(&sanitized);
    let query = family_words(base).join("+");
    if query.is_empty() {
        None
    } else {
        Some(query)
    }
}

/// Returns the distinct family queries for `filenames`, in order of first appearance.
///
/// With `allow_list`, only queries it contains are returned.
pub fn detect_families<I, S>(filenames: I, allow_list: Option<&HashSet<String>>) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut families: Vec<String> = Vec::new();
    for name in filenames {
        let Some(query) = family_query(name.as_ref()) else {
            continue;
        };
        if let Some(allowed) = allow_list {
            if !allowed.contains(&query) {
                tracing::debug!(family = %query, "family not in allow-list, skipping");
                continue;
            }
        }
        if !families.contains(&query) {
            families.push(query);
        }
    }
    families
}

fn is_variable_font(filename: &str) -> bool {
    let n = filename.len();
    let ext_len = VARIABLE_FONT_EXT.len();
    n >= ext_len
        && filename.is_char_boundary(n - ext_len)
        && filename[n - ext_len..].eq_ignore_ascii_case(VARIABLE_FONT_EXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_symbols_font() {
        assert_eq!(
            detect_families(["MaterialSymbolsOutlined.ttf"], None),
            vec!["Material+Symbols+Outlined"]
        );
    }

    #[test]
    fn axis_tagged_font() {
        assert_eq!(
            detect_families(["MaterialSymbolsRounded[FILL,GRAD,opsz,wght].ttf"], None),
            vec!["Material+Symbols+Rounded"]
        );
    }

    #[test]
    fn allow_list_filters() {
        let allowed = allow(&["Material+Symbols+Rounded"]);
        assert!(detect_families(["MaterialSymbolsOutlined.ttf"], Some(&allowed)).is_empty());

        let allowed = allow(&["Material+Symbols+Outlined"]);
        assert_eq!(
            detect_families(
                ["MaterialSymbolsOutlined.ttf", "MaterialSymbolsSharp.ttf"],
                Some(&allowed)
            ),
            vec!["Material+Symbols+Outlined"]
        );
    }

    #[test]
    fn first_occurrence_order_and_dedup() {
        let names = [
            "MaterialSymbolsSharp[wght].ttf",
            "MaterialSymbolsOutlined[FILL,GRAD,opsz,wght].ttf",
            "material-symbols-sharp.ttf",
            "MaterialSymbolsOutlined.ttf",
        ];
        assert_eq!(
            detect_families(names, None),
            vec!["Material+Symbols+Sharp", "Material+Symbols+Outlined"]
        );
    }

    #[test]
    fn ignores_other_extensions() {
        let names = [
            "MaterialSymbolsOutlined.woff2",
            "MaterialSymbolsOutlined.codepoints",
            "notes.txt",
            "MaterialSymbolsRounded.TTF",
        ];
        assert_eq!(detect_families(names, None), vec!["Material+Symbols+Rounded"]);
    }

    #[test]
    fn acronym_runs() {
        assert_eq!(family_query("ABCDef.ttf").as_deref(), Some("ABC+Def"));
        assert_eq!(family_query("noto-sans-JP.ttf").as_deref(), Some("Noto+Sans+JP"));
    }

    #[test]
    fn no_alphanumerics_keeps_raw_base() {
        // The sanitizer leaves the name untouched, so the raw base becomes the query.
        assert_eq!(family_query("[wght].ttf").as_deref(), Some("[wght]"));
        assert_eq!(family_query(".ttf"), Some("Ttf".to_string()));
        assert_eq!(family_query("ttf"), None);
    }

    #[test]
    fn empty_input() {
        let none: [&str; 0] = [];
        assert!(detect_families(none, None).is_empty());
    }
}
