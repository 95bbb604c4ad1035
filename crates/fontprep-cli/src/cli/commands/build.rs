//! Build command: run the pipeline against a working root and summarize.

use anyhow::{Context, Result};
use fontprep_core::assets::AssetStatus;
use fontprep_core::config::FontprepConfig;
use fontprep_core::fetch::CurlFetcher;
use fontprep_core::pipeline::{self, PipelineConfig, RunReport};
use std::path::PathBuf;

/// Runs the pipeline on a blocking thread; libcurl transfers are synchronous.
pub async fn run_build(cfg: FontprepConfig, root: PathBuf) -> Result<()> {
    let pipeline_cfg = PipelineConfig::from_config(root, &cfg);
    let fetcher = CurlFetcher::from_config(&cfg.fetch);
    tracing::info!(
        "building {:?} layout in {}",
        pipeline_cfg.layout,
        pipeline_cfg.root.display()
    );

    let report = tokio::task::spawn_blocking(move || pipeline::run(&pipeline_cfg, &fetcher))
        .await
        .context("build task panicked")??;

    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    println!("Copied {} file(s) into {}", report.copied.len(), report.paths.fonts.display());

    for family in report.written() {
        let mut downloaded = 0usize;
        let mut cached = 0usize;
        for asset in &family.assets {
            match asset.status {
                AssetStatus::Downloaded { .. } => downloaded += 1,
                AssetStatus::Cached => cached += 1,
                AssetStatus::Failed(_) | AssetStatus::Unnamed => {}
            }
        }
        println!(
            "  {} -> {} ({} downloaded, {} cached)",
            family.query,
            family.stylesheet.display(),
            downloaded,
            cached
        );
        for asset in &family.assets {
            if let AssetStatus::Failed(err) = &asset.status {
                println!("    failed {}: {}", asset.url, err);
            }
        }
    }
    for (query, error) in report.skipped() {
        println!("  {} skipped: {}", query, error);
    }

    if !report.relocated.is_empty() {
        if let Some(svgs) = &report.paths.svgs {
            println!("Moved {} SVG entries into {}", report.relocated.len(), svgs.display());
        }
    }

    let failed: usize = report.written().map(|f| f.failed_assets()).sum();
    let skipped = report.skipped().count();
    if failed == 0 && skipped == 0 {
        println!("Font assets prepared.");
    } else {
        println!(
            "Font assets prepared with {} skipped family(ies) and {} failed asset(s).",
            skipped, failed
        );
    }
}
