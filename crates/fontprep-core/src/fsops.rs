//! Filesystem steps of the pipeline: sanitized copy, relocation, cleanup.
//!
//! Every failure here is fatal and carries the offending path.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::naming::sanitize;

/// One file copied from the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedFile {
    pub source_name: String,
    pub sanitized_name: String,
}

/// Create a directory (and parents) if it doesn't exist.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        tracing::debug!("creating directory {}", dir.display());
        fs::create_dir_all(dir).with_context(|| format!("create dir: {}", dir.display()))?;
    }
    Ok(())
}

/// Names of the regular files directly under `dir`, sorted for stable output.
pub fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir: {}", dir.display()))? {
        let entry = entry.with_context(|| format!("read dir entry: {}", dir.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("file type: {}", entry.path().display()))?;
        if file_type.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Copies every regular file in `src_dir` to `dest_dir` under its sanitized name.
///
/// Existing destination files are overwritten. When two sources sanitize to
/// the same name, the later one (in sorted order) wins.
pub fn copy_sanitized(src_dir: &Path, dest_dir: &Path) -> Result<Vec<CopiedFile>> {
    ensure_dir(dest_dir)?;
    let mut copied: Vec<CopiedFile> = Vec::new();
    for name in list_file_names(src_dir)? {
        let sanitized = sanitize(&name);
        if let Some(prev) = copied.iter().find(|c| c.sanitized_name == sanitized) {
            tracing::warn!(
                "{} and {} both sanitize to {}; keeping the latter",
                prev.source_name,
                name,
                sanitized
            );
        }
        let from = src_dir.join(&name);
        let to = dest_dir.join(&sanitized);
        fs::copy(&from, &to)
            .with_context(|| format!("copy {} to {}", from.display(), to.display()))?;
        tracing::debug!("copied {} -> {}", name, sanitized);
        copied.push(CopiedFile {
            source_name: name,
            sanitized_name: sanitized,
        });
    }
    Ok(copied)
}

/// Moves a file or directory, falling back to copy + delete when rename fails
/// (e.g. across filesystems).
pub fn move_path(src: &Path, dest: &Path) -> Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::debug!("rename {} failed ({}), copying instead", src.display(), e);
            if src.is_dir() {
                copy_dir_recursive(src, dest)?;
                fs::remove_dir_all(src)
                    .with_context(|| format!("remove dir: {}", src.display()))?;
            } else {
                fs::copy(src, dest)
                    .with_context(|| format!("copy {} to {}", src.display(), dest.display()))?;
                fs::remove_file(src).with_context(|| format!("remove file: {}", src.display()))?;
            }
            Ok(())
        }
    }
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<()> {
    ensure_dir(dest)?;
    for entry in fs::read_dir(src).with_context(|| format!("read dir: {}", src.display()))? {
        let entry = entry?;
        let from = entry.path();
        let to = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&from, &to)?;
        } else {
            fs::copy(&from, &to)
                .with_context(|| format!("copy {} to {}", from.display(), to.display()))?;
        }
    }
    Ok(())
}

/// Moves every entry of `src` into `dest`, replacing same-named entries.
/// Returns the moved entry names.
pub fn move_dir_contents(src: &Path, dest: &Path) -> Result<Vec<String>> {
    ensure_dir(dest)?;
    let mut moved = Vec::new();
    for entry in fs::read_dir(src).with_context(|| format!("read dir: {}", src.display()))? {
        let entry = entry?;
        let name = entry.file_name();
        let target = dest.join(&name);
        remove_path_if_exists(&target)?;
        move_path(&entry.path(), &target)?;
        moved.push(name.to_string_lossy().into_owned());
    }
    moved.sort();
    Ok(moved)
}

/// Deletes every entry of `root` whose name is not in `keep`. Returns what was removed.
pub fn remove_all_except(root: &Path, keep: &[&str]) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for entry in fs::read_dir(root).with_context(|| format!("read dir: {}", root.display()))? {
        let entry = entry?;
        let name = entry.file_name();
        if keep.iter().any(|k| name.to_str() == Some(*k)) {
            continue;
        }
        let path = entry.path();
        remove_path_if_exists(&path)?;
        removed.push(path);
    }
    removed.sort();
    Ok(removed)
}

/// Removes a file or a whole directory tree; missing paths are fine.
pub fn remove_path_if_exists(path: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).with_context(|| format!("stat {}", path.display())),
    };
    if meta.is_dir() {
        fs::remove_dir_all(path).with_context(|| format!("remove dir: {}", path.display()))
    } else {
        fs::remove_file(path).with_context(|| format!("remove file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copy_sanitized_renames_every_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("variablefont");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("MaterialSymbolsOutlined[FILL,GRAD,opsz,wght].ttf"), b"ttf").unwrap();
        fs::write(src.join("MaterialSymbolsOutlined[FILL,GRAD,opsz,wght].codepoints"), b"cp").unwrap();
        fs::create_dir(src.join("nested")).unwrap();

        let dest = dir.path().join("fonts");
        let copied = copy_sanitized(&src, &dest).unwrap();
        assert_eq!(copied.len(), 2);
        assert_eq!(fs::read(dest.join("MaterialSymbolsOutlined.ttf")).unwrap(), b"ttf");
        assert_eq!(fs::read(dest.join("MaterialSymbolsOutlined.codepoints")).unwrap(), b"cp");
        assert!(!dest.join("nested").exists());
        // sources are left in place
        assert!(src.join("MaterialSymbolsOutlined[FILL,GRAD,opsz,wght].ttf").exists());
    }

    #[test]
    fn copy_sanitized_collision_keeps_latter() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("icon-font.ttf"), b"first").unwrap();
        fs::write(src.join("icon_font.ttf"), b"second").unwrap();
        let dest = dir.path().join("out");
        copy_sanitized(&src, &dest).unwrap();
        assert_eq!(fs::read(dest.join("IconFont.ttf")).unwrap(), b"second");
    }

    #[test]
    fn copy_sanitized_missing_source_is_an_error() {
        let dir = tempdir().unwrap();
        let err = copy_sanitized(&dir.path().join("nope"), &dir.path().join("out")).unwrap_err();
        assert!(format!("{:#}", err).contains("nope"));
    }

    #[test]
    fn move_dir_contents_replaces_existing() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("svg");
        let dest = dir.path().join("build/svgs");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("home.svg"), b"<svg/>").unwrap();
        fs::write(src.join("sub/star.svg"), b"<svg>*</svg>").unwrap();
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("home.svg"), b"old").unwrap();

        let moved = move_dir_contents(&src, &dest).unwrap();
        assert_eq!(moved, vec!["home.svg".to_string(), "sub".to_string()]);
        assert_eq!(fs::read(dest.join("home.svg")).unwrap(), b"<svg/>");
        assert!(dest.join("sub/star.svg").is_file());
        assert_eq!(fs::read_dir(&src).unwrap().count(), 0);
    }

    #[test]
    fn remove_all_except_keeps_listed() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("fonts")).unwrap();
        fs::create_dir(root.join("css")).unwrap();
        fs::create_dir_all(root.join("variablefont/deep")).unwrap();
        fs::write(root.join("package.json"), b"{}").unwrap();
        fs::write(root.join("stray.txt"), b"x").unwrap();

        let removed = remove_all_except(root, &["fonts", "css", "package.json"]).unwrap();
        assert_eq!(removed.len(), 2);
        assert!(root.join("fonts").is_dir());
        assert!(root.join("css").is_dir());
        assert!(root.join("package.json").is_file());
        assert!(!root.join("variablefont").exists());
        assert!(!root.join("stray.txt").exists());
    }

    #[test]
    fn remove_missing_path_is_ok() {
        let dir = tempdir().unwrap();
        remove_path_if_exists(&dir.path().join("ghost")).unwrap();
    }
}
