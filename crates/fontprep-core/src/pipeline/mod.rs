//! Pipeline driver: copy → detect → fetch/rewrite → relocate → cleanup.
//!
//! All locations come from `PipelineConfig`; nothing depends on the process
//! working directory, so runs against different roots are independent.

mod paths;

pub use paths::{OutputPaths, BUILD_DIR, CSS_DIR, FONTS_DIR, SVGS_DIR};

use anyhow::Result;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::assets::{localize_families, AssetSettings, FamilyOutcome, FamilyReport};
use crate::cache::open_cache;
use crate::config::{CachePolicy, FontprepConfig, Layout};
use crate::fetch::Fetcher;
use crate::fsops::{self, CopiedFile};
use crate::naming::detect_families;

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Working root; source and output directories are resolved against it.
    pub root: PathBuf,
    pub layout: Layout,
    pub source_dir: String,
    pub svg_dir: String,
    /// Root entries the flat layout keeps besides its outputs.
    pub preserve: Vec<String>,
    pub allow_list: Option<HashSet<String>>,
    pub cache: CachePolicy,
    pub assets: AssetSettings,
}

impl PipelineConfig {
    pub fn from_config(root: impl Into<PathBuf>, cfg: &FontprepConfig) -> Self {
        Self {
            root: root.into(),
            layout: cfg.layout,
            source_dir: cfg.source_dir.clone(),
            svg_dir: cfg.svg_dir.clone(),
            preserve: cfg.preserve.clone(),
            allow_list: cfg.effective_allow_list(),
            cache: cfg.cache,
            assets: AssetSettings::from_config(&cfg.fetch, &cfg.asset_prefix, cfg.on_asset_failure),
        }
    }

    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths::for_layout(&self.root, self.layout)
    }
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub paths: OutputPaths,
    pub copied: Vec<CopiedFile>,
    pub families: Vec<FamilyOutcome>,
    /// Entries moved into `build/svgs`.
    pub relocated: Vec<String>,
    /// Paths deleted during cleanup.
    pub removed: Vec<PathBuf>,
}

impl RunReport {
    pub fn written(&self) -> impl Iterator<Item = &FamilyReport> {
        self.families.iter().filter_map(|f| match f {
            FamilyOutcome::Written(r) => Some(r),
            FamilyOutcome::Skipped { .. } => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&str, &str)> {
        self.families.iter().filter_map(|f| match f {
            FamilyOutcome::Skipped { query, error } => Some((query.as_str(), error.as_str())),
            FamilyOutcome::Written(_) => None,
        })
    }
}

/// Runs the whole pipeline once.
pub fn run(cfg: &PipelineConfig, fetcher: &dyn Fetcher) -> Result<RunReport> {
    let paths = cfg.output_paths();
    fsops::ensure_dir(&paths.fonts)?;
    fsops::ensure_dir(&paths.css)?;
    if let Some(svgs) = &paths.svgs {
        fsops::ensure_dir(svgs)?;
    }

    let source = cfg.root.join(&cfg.source_dir);
    let copied = fsops::copy_sanitized(&source, &paths.fonts)?;
    tracing::info!("copied {} file(s) from {}", copied.len(), source.display());

    let queries = detect_families(
        copied.iter().map(|c| c.source_name.as_str()),
        cfg.allow_list.as_ref(),
    );
    tracing::info!("detected families: {:?}", queries);

    let cache = open_cache(cfg.cache, &paths.fonts);
    let families = localize_families(&queries, fetcher, cache.as_ref(), &paths.css, &cfg.assets)?;

    let mut relocated = Vec::new();
    let removed = match cfg.layout {
        Layout::Flat => {
            let mut keep: Vec<&str> = vec![FONTS_DIR, CSS_DIR];
            keep.extend(cfg.preserve.iter().map(String::as_str));
            fsops::remove_all_except(&cfg.root, &keep)?
        }
        Layout::Build => {
            let svg_source = cfg.root.join(&cfg.svg_dir);
            if let Some(svgs) = &paths.svgs {
                if svg_source.is_dir() {
                    relocated = fsops::move_dir_contents(&svg_source, svgs)?;
                    tracing::info!("moved {} svg entries to {}", relocated.len(), svgs.display());
                }
            }
            let mut removed = Vec::new();
            for dir in [source, svg_source] {
                if dir.exists() {
                    fsops::remove_path_if_exists(&dir)?;
                    removed.push(dir);
                }
            }
            removed
        }
    };
    for path in &removed {
        tracing::debug!("removed {}", path.display());
    }

    Ok(RunReport {
        paths,
        copied,
        families,
        relocated,
        removed,
    })
}
