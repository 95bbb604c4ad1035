//! CLI command handlers, one file per command.

mod build;
mod completions;
mod families;
mod man;
mod sanitize;

pub use build::run_build;
pub use completions::run_completions;
pub use families::run_families;
pub use man::run_man;
pub use sanitize::run_sanitize;
