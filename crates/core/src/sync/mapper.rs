//! Turn the raw target universe into IDE modules

use crate::bazel::{DependencyGraph, TargetKindResolver};
use crate::config::{Config, MergeConfig, ProjectView, TreeFixConfig};
use crate::error::{Error, Result};
use crate::languages::LanguagePluginRegistry;
use crate::paths::BazelPathsResolver;
use crate::types::{Label, Language, LanguageTable, Module, Project, SourceSet, Tag, TargetRecord};
use std::collections::{BTreeSet, HashMap, HashSet};
use tokio_util::sync::CancellationToken;

use super::merger::ModuleMerger;
use super::tree_fix::TreeSynthesizer;

/// Rule kind whose sources are always treated as Scala
const SCALA_BINARY_KIND: &str = "scala_binary";

/// Maps target records to a [`Project`].
///
/// Pipeline: per-target modules, `no_ide` filtering, optional directory
/// merge, optional placeholder synthesis, then the reverse source index.
pub struct ProjectMapper {
    paths: BazelPathsResolver,
    plugins: LanguagePluginRegistry,
    kinds: TargetKindResolver,
    languages: LanguageTable,
    merge: MergeConfig,
    tree_fix: TreeFixConfig,
}

impl ProjectMapper {
    /// Mapper with the JVM plugins registered
    pub fn new(paths: BazelPathsResolver, config: &Config) -> Self {
        Self {
            plugins: LanguagePluginRegistry::with_jvm_plugins(paths.clone()),
            paths,
            kinds: TargetKindResolver::new(),
            languages: LanguageTable::default(),
            merge: config.merge.clone(),
            tree_fix: config.tree_fix.clone(),
        }
    }

    pub fn with_plugins(mut self, plugins: LanguagePluginRegistry) -> Self {
        self.plugins = plugins;
        self
    }

    pub fn with_language_table(mut self, languages: LanguageTable) -> Self {
        self.languages = languages;
        self
    }

    pub fn create_project(
        &self,
        targets: &HashMap<String, TargetRecord>,
        root_targets: &HashSet<String>,
        view: &ProjectView,
        cancel: &CancellationToken,
    ) -> Result<Project> {
        self.plugins.prepare_sync(targets);
        let graph = DependencyGraph::new(targets, root_targets);
        check_cancelled(cancel)?;

        let mut selected: Vec<&TargetRecord> = root_targets
            .iter()
            .filter_map(|id| targets.get(id))
            .collect();
        selected.sort_by(|a, b| a.id.cmp(&b.id));
        if selected.len() < root_targets.len() {
            tracing::debug!(
                "{} root targets have no record and are skipped",
                root_targets.len() - selected.len()
            );
        }

        let mut modules = Vec::with_capacity(selected.len());
        for target in selected {
            check_cancelled(cancel)?;
            match self.create_module(target, &graph) {
                Ok(module) => modules.push(module),
                Err(e) => tracing::warn!("Skipping target {}: {}", target.id, e),
            }
        }

        modules.retain(|m| !m.has_tag(Tag::NoIde));

        if self.merge.enabled {
            check_cancelled(cancel)?;
            modules = ModuleMerger::new(self.merge.ignored_source_roots.clone())
                .merge_modules(modules)?;
        }

        if self.tree_fix.enabled {
            let placeholders = TreeSynthesizer::new().create_modules(
                self.paths.workspace_root(),
                &modules,
                view,
            );
            modules.extend(placeholders);
        }

        check_cancelled(cancel)?;
        tracing::info!("Mapped {} modules", modules.len());
        Ok(Project::new(self.paths.workspace_root().to_path_buf(), modules))
    }

    /// Module of a single target; fails on labels that don't name a package
    pub fn create_module(
        &self,
        target: &TargetRecord,
        graph: &DependencyGraph<'_>,
    ) -> Result<Module> {
        let label = Label::new(target.id.as_str());
        let base_directory = self.paths.label_to_directory(&label)?;
        let languages = self.infer_languages(target);
        let plugin = self.plugins.get_plugin(&languages);

        let sources: BTreeSet<_> = self.paths.resolve_all(&target.sources).into_iter().collect();
        let source_roots = sources
            .iter()
            .filter_map(|source| plugin.calculate_source_root(source))
            .collect();

        Ok(Module {
            direct_dependencies: target.dependency_ids().map(Label::new).collect(),
            tags: self.kinds.resolve_tags(target),
            source_set: SourceSet::new(sources, source_roots),
            resources: self.paths.resolve_all(&target.resources).into_iter().collect(),
            source_dependencies: plugin.dependency_sources(target, graph),
            language_data: plugin.resolve_module(target),
            is_synthetic: false,
            label,
            languages,
            base_directory,
        })
    }

    fn infer_languages(&self, target: &TargetRecord) -> BTreeSet<Language> {
        if target.kind == SCALA_BINARY_KIND {
            return BTreeSet::from([Language::Scala]);
        }
        target
            .sources
            .iter()
            .flat_map(|source| self.languages.languages_of(&source.relative_path))
            .collect()
    }
}

fn check_cancelled(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    Ok(())
}
