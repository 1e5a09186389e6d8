//! Language plugins
//!
//! A plugin interprets the language-specific part of a target record: it
//! builds the module's language payload, guesses source roots and collects
//! dependency sources. Plugins are looked up through
//! [`LanguagePluginRegistry`] by the module's language set.

pub mod java;
pub mod scala;
pub mod source_root;

pub use java::{JavaLanguagePlugin, JavaModule};
pub use scala::{ScalaLanguagePlugin, ScalaModule};

use crate::bazel::DependencyGraph;
use crate::types::{Language, TargetRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Language-specific payload attached to a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LanguageData {
    Java(JavaModule),
    Scala(ScalaModule),
}

/// Discriminant of [`LanguageData`], used as the merge-table key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageDataKind {
    Java,
    Scala,
}

impl fmt::Display for LanguageDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageDataKind::Java => f.write_str("java"),
            LanguageDataKind::Scala => f.write_str("scala"),
        }
    }
}

impl LanguageData {
    pub fn kind(&self) -> LanguageDataKind {
        match self {
            LanguageData::Java(_) => LanguageDataKind::Java,
            LanguageData::Scala(_) => LanguageDataKind::Scala,
        }
    }

    /// The JVM part of the payload, if any
    pub fn java_module(&self) -> Option<&JavaModule> {
        match self {
            LanguageData::Java(java) => Some(java),
            LanguageData::Scala(scala) => scala.java_module.as_ref(),
        }
    }
}

/// Capabilities a language plugin offers to the project mapper
pub trait LanguagePlugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Languages this plugin is responsible for
    fn languages(&self) -> &[Language];

    /// Called once per resolution with the whole target universe
    fn prepare_sync(&self, _targets: &HashMap<String, TargetRecord>) {}

    fn resolve_module(&self, _target: &TargetRecord) -> Option<LanguageData> {
        None
    }

    fn dependency_sources(
        &self,
        _target: &TargetRecord,
        _graph: &DependencyGraph<'_>,
    ) -> BTreeSet<PathBuf> {
        BTreeSet::new()
    }

    /// Source root of a resolved source file
    fn calculate_source_root(&self, source: &Path) -> Option<PathBuf> {
        source.parent().map(Path::to_path_buf)
    }
}

/// Fallback used when no registered plugin claims a module's languages
pub struct EmptyLanguagePlugin;

impl LanguagePlugin for EmptyLanguagePlugin {
    fn name(&self) -> &'static str {
        "empty"
    }

    fn languages(&self) -> &[Language] {
        &[]
    }
}

/// Ordered plugin registry; earlier registrations take precedence
pub struct LanguagePluginRegistry {
    plugins: Vec<Arc<dyn LanguagePlugin>>,
    fallback: Arc<dyn LanguagePlugin>,
}

impl Default for LanguagePluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguagePluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
            fallback: Arc::new(EmptyLanguagePlugin),
        }
    }

    /// Registry with the JVM plugins, Scala taking precedence over Java
    pub fn with_jvm_plugins(paths: crate::paths::BazelPathsResolver) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ScalaLanguagePlugin::new(paths.clone())));
        registry.register(Arc::new(JavaLanguagePlugin::new(paths)));
        registry
    }

    pub fn register(&mut self, plugin: Arc<dyn LanguagePlugin>) {
        tracing::debug!("Registering language plugin {}", plugin.name());
        self.plugins.push(plugin);
    }

    pub fn prepare_sync(&self, targets: &HashMap<String, TargetRecord>) {
        for plugin in &self.plugins {
            plugin.prepare_sync(targets);
        }
    }

    /// First registered plugin handling any of `languages`
    pub fn get_plugin(&self, languages: &BTreeSet<Language>) -> &dyn LanguagePlugin {
        self.plugins
            .iter()
            .find(|p| p.languages().iter().any(|l| languages.contains(l)))
            .unwrap_or(&self.fallback)
            .as_ref()
    }
}
