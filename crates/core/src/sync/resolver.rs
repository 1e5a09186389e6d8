//! End-to-end project resolution

use crate::cache::ProjectSource;
use crate::config::{Config, ProjectView};
use crate::error::{Error, Result};
use crate::paths::BazelPathsResolver;
use crate::types::{Project, TargetRecord};
use crate::utils::timed;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::mapper::ProjectMapper;

/// Targets produced by one aspect build
#[derive(Debug, Default, Clone)]
pub struct FetchedTargets {
    /// Every target the aspect visited
    pub targets: HashMap<String, TargetRecord>,
    /// Targets selected by the project view
    pub root_targets: HashSet<String>,
}

/// Where target records come from: a Bazel invocation, or files it left behind
pub trait TargetInfoSource: Send + Sync {
    fn fetch(&self, view: &ProjectView, cancel: &CancellationToken) -> Result<FetchedTargets>;
}

/// Fetches target records and maps them; a fresh mapper is used per run
pub struct ProjectResolver {
    source: Arc<dyn TargetInfoSource>,
    paths: BazelPathsResolver,
    config: Config,
}

impl ProjectResolver {
    pub fn new(source: Arc<dyn TargetInfoSource>, paths: BazelPathsResolver, config: Config) -> Self {
        Self {
            source,
            paths,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolve(&self, cancel: &CancellationToken) -> Result<Project> {
        let view = &self.config.targets;
        tracing::info!("Resolving project for targets {:?}", view.to_bazel_args());

        let fetched = timed("Building project with aspect", || self.source.fetch(view, cancel))?;
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        tracing::info!(
            "Fetched {} targets ({} roots)",
            fetched.targets.len(),
            fetched.root_targets.len()
        );

        let mapper = ProjectMapper::new(self.paths.clone(), &self.config);
        timed("Mapping to internal model", || {
            mapper.create_project(&fetched.targets, &fetched.root_targets, view, cancel)
        })
    }
}

impl ProjectSource for ProjectResolver {
    fn resolve_project(&self, cancel: &CancellationToken) -> Result<Project> {
        self.resolve(cancel)
    }
}
