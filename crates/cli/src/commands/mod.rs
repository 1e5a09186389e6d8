pub mod query;
pub mod show_config;
pub mod sync;

use anyhow::{Context, Result};
use std::path::PathBuf;

pub use query::{inputs_command, outputs_command};
pub use show_config::show_config_command;
pub use sync::sync_command;

/// Workspace root from `--workspace` or the current directory
pub(crate) fn workspace_root(workspace: Option<PathBuf>) -> Result<PathBuf> {
    let root = match workspace {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    root.canonicalize()
        .with_context(|| format!("Workspace root {} does not exist", root.display()))
}
