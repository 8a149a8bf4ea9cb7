pub mod config;
pub mod corpus;
pub mod format;
pub mod generators;
pub mod harness;
pub mod memory;
pub mod plot;

use std::path::Path;

pub fn fmt_open_err(e: impl ToString, path: &Path) -> String {
    format!("Unable to open {}: {}", path_str(path), e.to_string())
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().unwrap_or("<unknown path>")
}
