//! Sanitize command: print the sanitized form of each filename.

use fontprep_core::naming;

/// Prints `sanitized  original` per name, in argument order.
pub fn run_sanitize(names: &[String]) {
    for name in names {
        println!("{}  {}", naming::sanitize(name), name);
    }
}
