use anyhow::{Context, Result};
use bazel_bridge_core::config::CONFIG_FILE_NAME;
use bazel_bridge_core::Config;
use std::path::PathBuf;

use super::workspace_root;

pub fn show_config_command(workspace: Option<PathBuf>) -> Result<()> {
    let workspace_root = workspace_root(workspace)?;
    let config_path = workspace_root.join(CONFIG_FILE_NAME);
    let config = Config::load_for_workspace(&workspace_root)
        .context("Failed to load configuration")?;

    if config_path.exists() {
        println!("📋 Config: {}", config_path.display());
    } else {
        println!("📋 Config: defaults (no {} found)", CONFIG_FILE_NAME);
    }
    println!("💾 Cache: {}", config.cache_path(&workspace_root).display());
    println!(
        "{}",
        serde_json::to_string_pretty(&config).context("Failed to render configuration")?
    );
    Ok(())
}
