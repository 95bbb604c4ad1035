//! Output directory locations per layout.

use std::path::{Path, PathBuf};

use crate::config::Layout;

pub const FONTS_DIR: &str = "fonts";
pub const CSS_DIR: &str = "css";
pub const BUILD_DIR: &str = "build";
pub const SVGS_DIR: &str = "svgs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub fonts: PathBuf,
    pub css: PathBuf,
    /// Only the build layout collects SVGs.
    pub svgs: Option<PathBuf>,
}

impl OutputPaths {
    pub fn for_layout(root: &Path, layout: Layout) -> Self {
        match layout {
            Layout::Flat => Self {
                fonts: root.join(FONTS_DIR),
                css: root.join(CSS_DIR),
                svgs: None,
            },
            Layout::Build => {
                let build = root.join(BUILD_DIR);
                Self {
                    fonts: build.join(FONTS_DIR),
                    css: build.join(CSS_DIR),
                    svgs: Some(build.join(SVGS_DIR)),
                }
            }
        }
    }
}
