//! Checksum-verified directory cache (manifest as JSON next to the assets).

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{write_file, AssetCache};
use crate::checksum::{sha256_bytes, sha256_path};

/// Manifest filename inside the cache directory.
///
/// It lives in the output fonts directory, next to the files it describes.
pub const MANIFEST_FILE: &str = ".fontprep-checksums.json";

const TEMP_SUFFIX: &str = ".part";

/// Cache that only reports a hit when the file's SHA-256 matches the manifest.
#[derive(Debug, Clone)]
pub struct VerifiedDirCache {
    dir: PathBuf,
}

impl VerifiedDirCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }

    /// Reads the manifest. Missing or unparsable manifests count as empty.
    fn load_manifest(&self) -> BTreeMap<String, String> {
        let path = self.manifest_path();
        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(_) => return BTreeMap::new(),
        };
        match serde_json::from_slice(&bytes) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("ignoring unreadable checksum manifest {}: {}", path.display(), e);
                BTreeMap::new()
            }
        }
    }

    /// Writes `<manifest>.part`, then renames it over the manifest.
    fn save_manifest(&self, manifest: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(manifest).context("serialize checksum manifest")?;
        let path = self.manifest_path();
        let tmp = self.dir.join(format!("{}{}", MANIFEST_FILE, TEMP_SUFFIX));
        write_file(&tmp, json.as_bytes())?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("rename {} to {}", tmp.display(), path.display()))
    }

    fn verify(&self, path: &Path, expected: &str) -> bool {
        match sha256_path(path) {
            Ok(actual) => actual == expected,
            Err(_) => false,
        }
    }
}

impl AssetCache for VerifiedDirCache {
    fn contains(&self, name: &str) -> bool {
        let path = self.path_of(name);
        if !path.is_file() {
            return false;
        }
        match self.load_manifest().get(name) {
            Some(expected) if self.verify(&path, expected) => true,
            Some(_) => {
                tracing::info!("checksum mismatch for {}, refetching", path.display());
                false
            }
            None => false,
        }
    }

    fn put(&self, name: &str, bytes: &[u8]) -> Result<()> {
        write_file(&self.path_of(name), bytes)?;
        let mut manifest = self.load_manifest();
        manifest.insert(name.to_string(), sha256_bytes(bytes));
        self.save_manifest(&manifest)
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}
