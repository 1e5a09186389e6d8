//! Configuration management for bazel-bridge

mod project_view;
mod settings;

// Re-export main types
pub use project_view::ProjectView;
pub use settings::{CACHE_ENV_VAR, CONFIG_FILE_NAME, Config, MergeConfig, TreeFixConfig};
