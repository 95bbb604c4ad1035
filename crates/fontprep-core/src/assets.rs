//! Per-family stylesheet fetch, asset download and local rewrite.
//!
//! Network failures are contained: a stylesheet failure skips the family, an
//! asset failure is recorded and the stylesheet is still written. Filesystem
//! failures propagate.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::AssetCache;
use crate::config::{AssetFailurePolicy, FetchConfig};
use crate::fetch::Fetcher;
use crate::naming::stylesheet_filename;
use crate::stylesheet::{extract_asset_urls, local_asset_name, rewrite_urls, stylesheet_url};

/// Settings for turning a family query into a local stylesheet.
#[derive(Debug, Clone)]
pub struct AssetSettings {
    pub stylesheet_endpoint: String,
    pub axes: BTreeMap<String, String>,
    /// Prepended to the local asset name in the rewritten stylesheet.
    pub asset_prefix: String,
    pub on_failure: AssetFailurePolicy,
}

impl AssetSettings {
    pub fn from_config(fetch: &FetchConfig, asset_prefix: &str, on_failure: AssetFailurePolicy) -> Self {
        Self {
            stylesheet_endpoint: fetch.stylesheet_endpoint.clone(),
            axes: fetch.axes.clone(),
            asset_prefix: asset_prefix.to_string(),
            on_failure,
        }
    }

    pub fn request_url(&self, query: &str) -> String {
        stylesheet_url(
            &self.stylesheet_endpoint,
            query,
            self.axes.get(query).map(String::as_str),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    /// Already in the cache; not fetched.
    Cached,
    Downloaded { bytes: usize },
    /// Download failed; the message is the fetch error.
    Failed(String),
    /// URL has no usable path segment; left untouched in the stylesheet.
    Unnamed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReport {
    pub url: String,
    pub local_name: Option<String>,
    pub status: AssetStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyReport {
    pub query: String,
    pub stylesheet: PathBuf,
    pub assets: Vec<AssetReport>,
}

impl FamilyReport {
    pub fn failed_assets(&self) -> usize {
        self.assets
            .iter()
            .filter(|a| matches!(a.status, AssetStatus::Failed(_)))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyOutcome {
    Written(FamilyReport),
    /// Stylesheet could not be fetched; nothing was produced for this family.
    Skipped { query: String, error: String },
}

/// Fetches, localizes and writes the stylesheet for one family into `css_dir`.
pub fn localize_family(
    query: &str,
    fetcher: &dyn Fetcher,
    cache: &dyn AssetCache,
    css_dir: &Path,
    settings: &AssetSettings,
) -> Result<FamilyOutcome> {
    let request = settings.request_url(query);
    let css = match fetcher.fetch_text(&request) {
        Ok(css) => css,
        Err(e) => {
            tracing::warn!("skipping family {}: stylesheet fetch {} failed: {}", query, request, e);
            return Ok(FamilyOutcome::Skipped {
                query: query.to_string(),
                error: e.to_string(),
            });
        }
    };

    let mut assets = Vec::new();
    let mut replacements: Vec<(String, String)> = Vec::new();
    for url in extract_asset_urls(&css) {
        let Some(local) = local_asset_name(&url) else {
            tracing::warn!("no filename in asset URL {}, leaving it remote", url);
            assets.push(AssetReport {
                url,
                local_name: None,
                status: AssetStatus::Unnamed,
            });
            continue;
        };

        let status = if cache.contains(&local) {
            tracing::debug!("{} already cached as {}", url, local);
            AssetStatus::Cached
        } else {
            match fetcher.fetch_binary(&url) {
                Ok(bytes) => {
                    cache.put(&local, &bytes)?;
                    tracing::info!("downloaded {} -> {}", url, cache.path_of(&local).display());
                    AssetStatus::Downloaded { bytes: bytes.len() }
                }
                Err(e) => {
                    tracing::warn!("asset fetch {} failed: {}", url, e);
                    AssetStatus::Failed(e.to_string())
                }
            }
        };

        let keep_remote = matches!(status, AssetStatus::Failed(_))
            && settings.on_failure == AssetFailurePolicy::KeepRemote;
        if !keep_remote {
            replacements.push((url.clone(), format!("{}{}", settings.asset_prefix, local)));
        }
        assets.push(AssetReport {
            url,
            local_name: Some(local),
            status,
        });
    }

    let rewritten = rewrite_urls(&css, &replacements);
    fs::create_dir_all(css_dir).with_context(|| format!("create dir: {}", css_dir.display()))?;
    let stylesheet = css_dir.join(stylesheet_filename(query));
    fs::write(&stylesheet, rewritten)
        .with_context(|| format!("write stylesheet: {}", stylesheet.display()))?;
    tracing::info!("wrote {} ({} assets)", stylesheet.display(), assets.len());

    Ok(FamilyOutcome::Written(FamilyReport {
        query: query.to_string(),
        stylesheet,
        assets,
    }))
}

/// Runs `localize_family` for each query in order.
pub fn localize_families(
    queries: &[String],
    fetcher: &dyn Fetcher,
    cache: &dyn AssetCache,
    css_dir: &Path,
    settings: &AssetSettings,
) -> Result<Vec<FamilyOutcome>> {
    queries
        .iter()
        .map(|q| localize_family(q, fetcher, cache, css_dir, settings))
        .collect()
}
