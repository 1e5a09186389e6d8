use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::ProjectView;

/// File name looked up in the workspace root
pub const CONFIG_FILE_NAME: &str = ".bazel-bridge.json";

/// Environment variable overriding the project cache location
pub const CACHE_ENV_VAR: &str = "BAZEL_BRIDGE_CACHE";

const DEFAULT_CACHE_FILE: &str = ".bazel-bridge/project-cache.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Target patterns to import; `-` prefixed patterns are excluded
    #[serde(default)]
    pub targets: ProjectView,

    #[serde(default)]
    pub merge: MergeConfig,

    #[serde(default)]
    pub tree_fix: TreeFixConfig,

    /// Project cache location, relative to the workspace root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_file: Option<PathBuf>,
}

/// Folding of colocated targets into one module per directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct MergeConfig {
    /// Off unless requested; only Scala payloads can be folded together
    #[serde(default)]
    pub enabled: bool,

    /// Source-root suffixes known to hold broken generated sources; a merged
    /// module touching one of them gets an empty source set
    #[serde(default = "default_ignored_source_roots")]
    pub ignored_source_roots: Vec<String>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ignored_source_roots: default_ignored_source_roots(),
        }
    }
}

/// Placeholder modules that keep the IDE's directory tree contiguous
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct TreeFixConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for TreeFixConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

fn default_ignored_source_roots() -> Vec<String> {
    vec!["tools/src/main/scala/".to_string()]
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))?;
        Ok(config)
    }

    /// Load `.bazel-bridge.json` from the workspace root, or defaults when absent
    pub fn load_for_workspace(workspace_root: &Path) -> Result<Self> {
        let path = workspace_root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, workspace_root.display());
            return Ok(Self::default());
        }
        tracing::debug!("Loading config from {}", path.display());
        Self::load_from_file(&path)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Absolute cache path; `BAZEL_BRIDGE_CACHE` wins over the config file
    pub fn cache_path(&self, workspace_root: &Path) -> PathBuf {
        self.resolve_cache_path(workspace_root, std::env::var(CACHE_ENV_VAR).ok().as_deref())
    }

    fn resolve_cache_path(&self, workspace_root: &Path, env_override: Option<&str>) -> PathBuf {
        if let Some(from_env) = env_override.filter(|p| !p.is_empty()) {
            return workspace_root.join(from_env);
        }
        workspace_root.join(
            self.cache_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_FILE)),
        )
    }
}
