//! CLI for fontprep.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use fontprep_core::config::{self, AssetFailurePolicy, CachePolicy, FontprepConfig, Layout};
use std::path::PathBuf;

use commands::{run_build, run_completions, run_families, run_man, run_sanitize};

/// Top-level CLI for fontprep.
#[derive(Debug, Parser)]
#[command(name = "fontprep")]
#[command(about = "fontprep: prepare a local icon-font distribution", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/fontprep/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log to stderr instead of the state-dir log file.
    #[arg(long, global = true)]
    pub log_stderr: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Copy, detect, fetch and lay out the font assets.
    Build(BuildArgs),

    /// Print the sanitized form of each filename.
    Sanitize {
        /// Raw filenames.
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// List the family queries a build would fetch from a directory of fonts.
    Families {
        /// Directory holding the variable fonts.
        dir: PathBuf,
        /// Layout whose default allow-list applies.
        #[arg(long, value_enum)]
        layout: Option<LayoutArg>,
        /// Only report these family queries (repeatable).
        #[arg(long = "allow", value_name = "QUERY")]
        allow: Vec<String>,
        /// Report every detected family, ignoring any allow-list.
        #[arg(long, conflicts_with = "allow")]
        any_family: bool,
    },

    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print the man page.
    Man,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Flat,
    Build,
}

impl From<LayoutArg> for Layout {
    fn from(l: LayoutArg) -> Self {
        match l {
            LayoutArg::Flat => Layout::Flat,
            LayoutArg::Build => Layout::Build,
        }
    }
}

/// Flags for `fontprep build`; each one overrides the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
    /// Working root (default: current directory).
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Output layout.
    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Source font directory, relative to the root.
    #[arg(long, value_name = "NAME")]
    pub source: Option<String>,

    /// SVG directory, relative to the root (build layout).
    #[arg(long, value_name = "NAME")]
    pub svg_dir: Option<String>,

    /// Accept only these family queries (repeatable).
    #[arg(long = "allow", value_name = "QUERY")]
    pub allow: Vec<String>,

    /// Accept every detected family, ignoring any allow-list.
    #[arg(long, conflicts_with = "allow")]
    pub any_family: bool,

    /// Keep this root entry during flat-layout cleanup (repeatable).
    #[arg(long = "preserve", value_name = "NAME")]
    pub preserve: Vec<String>,

    /// Trust cached assets only when their SHA-256 matches.
    #[arg(long)]
    pub verify_checksums: bool,

    /// Leave the remote URL in the stylesheet when an asset download fails.
    #[arg(long)]
    pub keep_remote_on_failure: bool,
}

impl BuildArgs {
    /// Applies the flags on top of the loaded config.
    pub fn apply(&self, cfg: &mut FontprepConfig) {
        apply_family_filter(cfg, self.layout, &self.allow, self.any_family);
        if let Some(source) = &self.source {
            cfg.source_dir = source.clone();
        }
        if let Some(svg_dir) = &self.svg_dir {
            cfg.svg_dir = svg_dir.clone();
        }
        cfg.preserve.extend(self.preserve.iter().cloned());
        if self.verify_checksums {
            cfg.cache = CachePolicy::Checksum;
        }
        if self.keep_remote_on_failure {
            cfg.on_asset_failure = AssetFailurePolicy::KeepRemote;
        }
    }
}

/// Layout and allow-list overrides shared by `build` and `families`.
pub fn apply_family_filter(
    cfg: &mut FontprepConfig,
    layout: Option<LayoutArg>,
    allow: &[String],
    any_family: bool,
) {
    if let Some(layout) = layout {
        cfg.layout = layout.into();
    }
    if !allow.is_empty() {
        cfg.allow_list = Some(allow.to_vec());
    }
    if any_family {
        cfg.accept_any_family = true;
    }
}

impl Cli {
    fn load_config(&self) -> Result<FontprepConfig> {
        let cfg = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        Ok(cfg)
    }

    pub async fn run(self) -> Result<()> {
        match &self.command {
            CliCommand::Build(args) => {
                let mut cfg = self.load_config()?;
                args.apply(&mut cfg);
                let root = match &args.root {
                    Some(root) => root.clone(),
                    None => std::env::current_dir()?,
                };
                run_build(cfg, root).await?;
            }
            CliCommand::Sanitize { names } => run_sanitize(names),
            CliCommand::Families {
                dir,
                layout,
                allow,
                any_family,
            } => {
                let mut cfg = self.load_config()?;
                apply_family_filter(&mut cfg, *layout, allow, *any_family);
                run_families(dir, cfg.effective_allow_list().as_ref())?;
            }
            CliCommand::Completions { shell } => run_completions(*shell),
            CliCommand::Man => run_man()?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
