//! bazel-bridge-core - Bazel workspace to IDE project model
//!
//! This crate provides functionality to:
//! - Map target records produced by a build aspect to IDE modules
//! - Merge colocated targets and fill gaps in the project tree
//! - Query the action graph for a target's inputs and outputs
//! - Cache the resolved project in memory and on disk
pub mod bazel;
pub mod cache;
pub mod config;
pub mod error;
pub mod languages;
pub mod paths;
pub mod sync;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use bazel::ActionGraphParser;
pub use cache::{FileProjectStorage, ProjectCache, ProjectSource, ProjectStorage};
pub use config::{Config, ProjectView};
pub use paths::{BazelInfo, BazelPathsResolver};
pub use sync::{FetchedTargets, ProjectMapper, ProjectResolver, TargetInfoReader, TargetInfoSource};

pub use tokio_util::sync::CancellationToken;
