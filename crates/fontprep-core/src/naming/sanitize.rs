//! Font filename sanitization into camel-case identifiers.

use super::tokenize::{camel_case, split_words};

/// Family prefix that gets a canonical spelling regardless of surrounding noise.
const SYMBOLS_PREFIX: &str = "materialsymbols";
const SYMBOLS_CANONICAL: &str = "MaterialSymbols";

/// Sanitizes a font filename into `<CamelCaseBase><ext>`.
///
/// - Splits off the extension at the last dot (leading dots stay in the base)
/// - Drops a trailing bracketed axis tag such as `[FILL,GRAD,opsz,wght]`
/// - If the base contains `materialsymbols` (any case) followed by identifier
///   characters, only that run is kept and spelled `MaterialSymbols<Tail>`
/// - Otherwise the whole base is camel-cased
/// - A base with no ASCII alphanumerics is returned untouched
///
/// # Examples
///
/// - `sanitize("MaterialSymbolsOutlined[FILL,GRAD,opsz,wght].ttf")` → `"MaterialSymbolsOutlined.ttf"`
/// - `sanitize("some-icon-font.woff2")` → `"SomeIconFont.woff2"`
pub fn sanitize(filename: &str) -> String {
    let (base, ext) = split_extension(filename);
    let stripped = strip_bracket_tag(base);

    if let Some(matched) = find_symbols_run(stripped) {
        let tail = &matched[SYMBOLS_PREFIX.len()..];
        let tail = camel_case(&split_words(tail));
        return format!("{}{}{}", SYMBOLS_CANONICAL, tail, ext);
    }

    let tokens = split_words(stripped);
    if tokens.is_empty() {
        return format!("{}{}", base, ext);
    }
    format!("{}{}", camel_case(&tokens), ext)
}

/// Splits `name` into `(base, ext)`; `ext` keeps its leading dot.
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading_dots = name.len() - name.trim_start_matches('.').len();
    match name[leading_dots..].rfind('.') {
        Some(idx) => name.split_at(leading_dots + idx),
        None => (name, ""),
    }
}

/// Removes a trailing `[...]` tag, cutting at the first `[`.
fn strip_bracket_tag(base: &str) -> &str {
    if !base.ends_with(']') {
        return base;
    }
    match base.find('[') {
        Some(idx) => &base[..idx],
        None => base,
    }
}

/// Finds the first `materialsymbols[A-Za-z0-9_-]*` run, case-insensitively.
fn find_symbols_run(base: &str) -> Option<&str> {
    let lowered = base.to_ascii_lowercase();
    let start = lowered.find(SYMBOLS_PREFIX)?;
    let after = start + SYMBOLS_PREFIX.len();
    let run_len = base[after..]
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'-')
        .count();
    Some(&base[start..after + run_len])
}
