use anyhow::{Context, Result};
use bazel_bridge_core::cache::{FileProjectStorage, ProjectCache};
use bazel_bridge_core::sync::ProjectResolver;
use bazel_bridge_core::{BazelInfo, BazelPathsResolver, CancellationToken, Config};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use super::workspace_root;
use crate::display::formatter::print_project_summary;
use crate::source::DirectoryTargetInfoSource;

pub fn sync_command(
    workspace: Option<PathBuf>,
    aspect_output: &Path,
    exec_root: Option<PathBuf>,
    refresh: bool,
    json: bool,
) -> Result<()> {
    let workspace_root = workspace_root(workspace)?;
    let config = Config::load_for_workspace(&workspace_root)
        .context("Failed to load configuration")?;
    let exec_root = exec_root.unwrap_or_else(|| workspace_root.clone());
    let cache_path = config.cache_path(&workspace_root);
    info!("Using project cache at {}", cache_path.display());

    let paths = BazelPathsResolver::new(BazelInfo::new(&workspace_root, exec_root));
    let source = Arc::new(DirectoryTargetInfoSource::new(aspect_output));
    let resolver = ProjectResolver::new(source, paths, config);
    let cache = ProjectCache::new(
        Arc::new(resolver),
        Arc::new(FileProjectStorage::new(cache_path)),
    );

    let cancel = CancellationToken::new();
    let project = if refresh {
        cache.refresh_and_get(&cancel)
    } else {
        cache.get(&cancel)
    }
    .context("Failed to resolve project")?;

    if json {
        let rendered =
            serde_json::to_string_pretty(project.as_ref()).context("Failed to render project")?;
        println!("{rendered}");
    } else {
        print_project_summary(&project);
    }

    Ok(())
}
