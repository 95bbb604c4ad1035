use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Family queries accepted by the build layout when no allow-list is configured.
pub const DEFAULT_BUILD_FAMILIES: [&str; 3] = [
    "Material+Symbols+Outlined",
    "Material+Symbols+Rounded",
    "Material+Symbols+Sharp",
];

/// Output arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `fonts/` and `css/` in the root; everything else in the root is removed.
    #[default]
    Flat,
    /// `build/fonts`, `build/css`, `build/svgs`; only source directories are removed.
    Build,
}

/// When a cached asset counts as present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicy {
    /// The file exists.
    #[default]
    Exists,
    /// The file exists and matches the recorded SHA-256.
    Checksum,
}

/// What the stylesheet references when an asset download fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetFailurePolicy {
    /// Point at the local path anyway (the file may be missing).
    #[default]
    Rewrite,
    /// Leave the remote URL in place.
    KeepRemote,
}

/// Remote stylesheet service settings (`[fetch]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// CSS generation endpoint; `?family=...&display=swap` is appended.
    pub stylesheet_endpoint: String,
    /// Static User-Agent sent with every request. The service picks the
    /// web-font format from it.
    pub user_agent: String,
    pub connect_timeout_secs: u64,
    /// Whole-request timeout.
    pub timeout_secs: u64,
    /// Optional axis spec per family query, e.g.
    /// `"Material+Symbols+Outlined" = "opsz,wght,FILL,GRAD@20..48,100..700,0..1,-50..200"`.
    pub axes: BTreeMap<String, String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            stylesheet_endpoint: "https://fonts.googleapis.com/css2".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 120,
            axes: BTreeMap::new(),
        }
    }
}

/// Global configuration loaded from `~/.config/fontprep/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontprepConfig {
    pub layout: Layout,
    /// Directory (relative to the root) holding the variable fonts.
    pub source_dir: String,
    /// Directory (relative to the root) holding SVG icons; build layout only.
    pub svg_dir: String,
    /// Extra root entries the flat layout must not delete.
    pub preserve: Vec<String>,
    /// Accepted family queries. None = layout default.
    pub allow_list: Option<Vec<String>>,
    /// Accept every detected family even in the build layout.
    pub accept_any_family: bool,
    pub cache: CachePolicy,
    pub on_asset_failure: AssetFailurePolicy,
    /// Prefix for rewritten asset references, relative to the css directory.
    pub asset_prefix: String,
    pub fetch: FetchConfig,
}

impl Default for FontprepConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Flat,
            source_dir: "variablefont".to_string(),
            svg_dir: "svg".to_string(),
            preserve: Vec::new(),
            allow_list: None,
            accept_any_family: false,
            cache: CachePolicy::Exists,
            on_asset_failure: AssetFailurePolicy::Rewrite,
            asset_prefix: "../fonts/".to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

impl FontprepConfig {
    /// Allow-list in effect: explicit list, else the layout default
    /// (flat: everything, build: the Material Symbols families).
    pub fn effective_allow_list(&self) -> Option<HashSet<String>> {
        if self.accept_any_family {
            return None;
        }
        match (&self.allow_list, self.layout) {
            (Some(list), _) => Some(list.iter().cloned().collect()),
            (None, Layout::Flat) => None,
            (None, Layout::Build) => Some(DEFAULT_BUILD_FAMILIES.iter().map(|s| s.to_string()).collect()),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fontprep")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FontprepConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FontprepConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file (`--config`).
pub fn load_from_path(path: &Path) -> Result<FontprepConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: FontprepConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
