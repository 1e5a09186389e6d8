//! Scala targets

use crate::bazel::DependencyGraph;
use crate::paths::BazelPathsResolver;
use crate::types::{Language, TargetRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use super::java::{JavaLanguagePlugin, JavaModule};
use super::source_root::calculate_jvm_source_root;
use super::{LanguageData, LanguagePlugin};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalaModule {
    pub scalac_opts: Vec<String>,
    pub compiler_classpath: Vec<PathBuf>,
    pub java_module: Option<JavaModule>,
}

/// Scala plugin; the JVM part of a target is delegated to an inner Java plugin
pub struct ScalaLanguagePlugin {
    paths: BazelPathsResolver,
    java: JavaLanguagePlugin,
}

impl ScalaLanguagePlugin {
    pub fn new(paths: BazelPathsResolver) -> Self {
        Self {
            java: JavaLanguagePlugin::new(paths.clone()),
            paths,
        }
    }
}

impl LanguagePlugin for ScalaLanguagePlugin {
    fn name(&self) -> &'static str {
        "scala"
    }

    fn languages(&self) -> &[Language] {
        &[Language::Scala]
    }

    fn prepare_sync(&self, targets: &HashMap<String, TargetRecord>) {
        self.java.prepare_sync(targets);
    }

    fn resolve_module(&self, target: &TargetRecord) -> Option<LanguageData> {
        let info = target.scala_target_info.as_ref()?;
        Some(LanguageData::Scala(ScalaModule {
            scalac_opts: info.scalac_opts.clone(),
            compiler_classpath: self.paths.resolve_all(&info.compiler_classpath),
            java_module: self.java.java_module_of(target),
        }))
    }

    fn dependency_sources(
        &self,
        target: &TargetRecord,
        graph: &DependencyGraph<'_>,
    ) -> BTreeSet<PathBuf> {
        self.java.dependency_sources(target, graph)
    }

    fn calculate_source_root(&self, source: &Path) -> Option<PathBuf> {
        calculate_jvm_source_root(source, true)
    }
}
