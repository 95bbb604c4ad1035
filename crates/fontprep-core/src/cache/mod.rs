//! Asset cache keyed by local asset name.
//!
//! The output fonts directory doubles as the download cache. The policy that
//! decides whether a cached file is good enough sits behind `AssetCache`:
//! `DirCache` trusts any existing file, `VerifiedDirCache` also checks the
//! SHA-256 recorded when the file was stored.

mod verified;

pub use verified::{VerifiedDirCache, MANIFEST_FILE};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CachePolicy;

pub trait AssetCache {
    /// True if `name` is present and usable; a fetch is skipped in that case.
    fn contains(&self, name: &str) -> bool;
    /// Stores `bytes` under `name`.
    fn put(&self, name: &str, bytes: &[u8]) -> Result<()>;
    /// On-disk location for `name`.
    fn path_of(&self, name: &str) -> PathBuf;
}

/// Skip-if-present cache over a directory.
#[derive(Debug, Clone)]
pub struct DirCache {
    dir: PathBuf,
}

impl DirCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl AssetCache for DirCache {
    fn contains(&self, name: &str) -> bool {
        self.path_of(name).is_file()
    }

    fn put(&self, name: &str, bytes: &[u8]) -> Result<()> {
        write_file(&self.path_of(name), bytes)
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

/// Builds the cache for `policy` rooted at `dir`.
pub fn open_cache(policy: CachePolicy, dir: &Path) -> Box<dyn AssetCache> {
    match policy {
        CachePolicy::Exists => Box::new(DirCache::new(dir)),
        CachePolicy::Checksum => Box::new(VerifiedDirCache::new(dir)),
    }
}

pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir: {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("write asset: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn dir_cache_put_then_contains() {
        let dir = tempdir().unwrap();
        let cache = DirCache::new(dir.path().join("fonts"));
        assert!(!cache.contains("Icons.woff2"));
        cache.put("Icons.woff2", b"wOF2").unwrap();
        assert!(cache.contains("Icons.woff2"));
        assert_eq!(fs::read(cache.path_of("Icons.woff2")).unwrap(), b"wOF2");
    }

    #[test]
    fn dir_cache_trusts_existing_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Old.woff2"), b"whatever").unwrap();
        let cache = DirCache::new(dir.path());
        assert!(cache.contains("Old.woff2"));
    }

    #[test]
    fn directories_are_not_cached_files() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("Sub.woff2")).unwrap();
        assert!(!DirCache::new(dir.path()).contains("Sub.woff2"));
    }

    #[test]
    fn open_cache_by_policy() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("A.woff2"), b"a").unwrap();
        assert!(open_cache(CachePolicy::Exists, dir.path()).contains("A.woff2"));
        assert!(!open_cache(CachePolicy::Checksum, dir.path()).contains("A.woff2"));
    }
}
