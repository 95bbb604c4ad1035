//! Local asset names derived from asset URLs.

use crate::naming::sanitize;

/// Extracts the last path segment from a URL.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Local filename for a remote asset: the URL basename, sanitized like font files.
pub fn local_asset_name(url: &str) -> Option<String> {
    filename_from_url_path(url).map(|name| sanitize(&name))
}
