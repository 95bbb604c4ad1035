use anyhow::Result;
use clap::CommandFactory;

use crate::cli::Cli;

/// Renders the roff man page to stdout.
pub fn run_man() -> Result<()> {
    let man = clap_mangen::Man::new(Cli::command());
    man.render(&mut std::io::stdout())?;
    Ok(())
}
