//! Families command: list the family queries a build would fetch.

use anyhow::{Context, Result};
use fontprep_core::{fsops, naming};
use std::collections::HashSet;
use std::path::Path;

/// Scans `dir` and prints one detected query per line with its stylesheet name.
///
/// `allow_list` is the effective list for the chosen layout, as a build would apply it.
pub fn run_families(dir: &Path, allow_list: Option<&HashSet<String>>) -> Result<()> {
    let names = fsops::list_file_names(dir)
        .with_context(|| format!("listing {}", dir.display()))?;

    let families = naming::detect_families(&names, allow_list);
    if families.is_empty() {
        println!("No variable-font families found in {}", dir.display());
        return Ok(());
    }
    for query in families {
        println!("{}  -> {}", query, naming::stylesheet_filename(&query));
    }
    Ok(())
}
