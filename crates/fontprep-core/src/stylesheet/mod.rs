//! Stylesheet request URLs, asset URL extraction and local rewriting.
//!
//! Only URL scanning and literal substitution; the CSS itself is never parsed.

mod path;

pub use path::{filename_from_url_path, local_asset_name};

use std::collections::HashMap;

use url::form_urlencoded::byte_serialize;

/// Builds `<endpoint>?family=<query>[:<axes>]&display=swap`.
///
/// Each `+`-separated word is form-encoded on its own so `+` keeps its
/// meaning of a space between words.
pub fn stylesheet_url(endpoint: &str, family_query: &str, axes: Option<&str>) -> String {
    let family = family_query
        .split('+')
        .map(|word| byte_serialize(word.as_bytes()).collect::<String>())
        .collect::<Vec<_>>()
        .join("+");
    match axes.filter(|a| !a.is_empty()) {
        Some(axes) => {
            let axes: String = byte_serialize(axes.as_bytes()).collect();
            format!("{}?family={}:{}&display=swap", endpoint, family, axes)
        }
        None => format!("{}?family={}&display=swap", endpoint, family),
    }
}

/// Returns each distinct absolute `http(s)://` URL in `css`, in order of first appearance.
///
/// A URL ends at whitespace, a quote or a parenthesis.
pub fn extract_asset_urls(css: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    let mut rest = css;

    while let Some(start) = find_scheme(rest) {
        let candidate = &rest[start..];
        let end = url_end(candidate);
        let url = &candidate[..end];
        let scheme_len = if url.starts_with("https://") { 8 } else { 7 };
        if url.len() > scheme_len && !urls.iter().any(|u| u == url) {
            urls.push(url.to_string());
        }
        rest = &candidate[end.max(scheme_len)..];
    }
    urls
}

/// Length of the URL at the start of `s`.
fn url_end(s: &str) -> usize {
    s.find(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '(' | ')'))
        .unwrap_or(s.len())
}

fn find_scheme(s: &str) -> Option<usize> {
    match (s.find("http://"), s.find("https://")) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Substitutes each whole URL token found in `replacements`.
///
/// Tokens are delimited the same way as in [`extract_asset_urls`], so a
/// URL that is a prefix of another one never touches the longer one.
pub fn rewrite_urls(css: &str, replacements: &[(String, String)]) -> String {
    let map: HashMap<&str, &str> = replacements
        .iter()
        .map(|(remote, local)| (remote.as_str(), local.as_str()))
        .collect();
    let mut out = String::with_capacity(css.len());
    let mut rest = css;

    while let Some(start) = find_scheme(rest) {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let token = &candidate[..url_end(candidate)];
        out.push_str(map.get(token).copied().unwrap_or(token));
        rest = &candidate[token.len()..];
    }
    out.push_str(rest);
    out
}
