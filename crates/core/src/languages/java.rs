//! Java and Kotlin targets

use crate::bazel::DependencyGraph;
use crate::paths::BazelPathsResolver;
use crate::types::{JavaTargetInfo, Language, TargetRecord};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use super::source_root::calculate_jvm_source_root;
use super::{LanguageData, LanguagePlugin};

/// JVM compilation settings of a module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaModule {
    /// Project-wide language level, resolved from all targets' javac options
    pub java_version: Option<String>,
    pub javac_opts: Vec<String>,
    pub jvm_opts: Vec<String>,
    pub main_output: Option<PathBuf>,
    pub all_outputs: Vec<PathBuf>,
    pub main_class: Option<String>,
    pub args: Vec<String>,
    pub runtime_classpath: Vec<PathBuf>,
    pub compile_classpath: Vec<PathBuf>,
    pub sources_classpath: Vec<PathBuf>,
}

pub struct JavaLanguagePlugin {
    paths: BazelPathsResolver,
    java_version: Mutex<Option<String>>,
}

impl JavaLanguagePlugin {
    pub fn new(paths: BazelPathsResolver) -> Self {
        Self {
            paths,
            java_version: Mutex::new(None),
        }
    }

    /// Build the JVM payload of a target carrying java info
    pub fn java_module_of(&self, target: &TargetRecord) -> Option<JavaModule> {
        let info = target.java_target_info.as_ref()?;

        let main_output = info
            .jars
            .first()
            .and_then(|jars| jars.binary_jars.first())
            .map(|jar| self.paths.resolve(jar));
        let all_outputs = info
            .jars
            .iter()
            .flat_map(|jars| jars.interface_jars.iter().chain(jars.binary_jars.iter()))
            .map(|jar| self.paths.resolve(jar))
            .collect();
        let main_class = Some(info.main_class.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Some(JavaModule {
            java_version: self.java_version.lock().clone(),
            javac_opts: info.javac_opts.clone(),
            jvm_opts: info.jvm_flags.clone(),
            main_output,
            all_outputs,
            main_class,
            args: info.args.clone(),
            runtime_classpath: self.paths.resolve_all(&info.runtime_classpath),
            compile_classpath: self.paths.resolve_all(&info.compile_classpath),
            sources_classpath: self.paths.resolve_all(&info.source_classpath),
        })
    }

    fn source_jars_of<'a>(
        &'a self,
        info: &'a JavaTargetInfo,
    ) -> impl Iterator<Item = PathBuf> + 'a {
        info.jars
            .iter()
            .flat_map(|jars| jars.source_jars.iter())
            .map(|jar| self.paths.resolve(jar))
    }
}

impl LanguagePlugin for JavaLanguagePlugin {
    fn name(&self) -> &'static str {
        "java"
    }

    fn languages(&self) -> &[Language] {
        &[Language::Java, Language::Kotlin]
    }

    fn prepare_sync(&self, targets: &HashMap<String, TargetRecord>) {
        let version = most_common_java_version(targets.values());
        tracing::debug!("Resolved project java version: {:?}", version);
        *self.java_version.lock() = version;
    }

    fn resolve_module(&self, target: &TargetRecord) -> Option<LanguageData> {
        self.java_module_of(target).map(LanguageData::Java)
    }

    fn dependency_sources(
        &self,
        target: &TargetRecord,
        graph: &DependencyGraph<'_>,
    ) -> BTreeSet<PathBuf> {
        let Some(info) = target.java_target_info.as_ref() else {
            return BTreeSet::new();
        };

        let own = self.paths.resolve_all(&info.source_classpath);
        let transitive = graph
            .transitive_dependencies_without_root_targets(&target.id)
            .into_iter()
            .filter_map(|dep| dep.java_target_info.as_ref())
            .flat_map(|dep_info| self.source_jars_of(dep_info).collect::<Vec<_>>());

        own.into_iter().chain(transitive).collect()
    }

    fn calculate_source_root(&self, source: &Path) -> Option<PathBuf> {
        calculate_jvm_source_root(source, false)
    }
}

/// Most frequent `-source`/`--release` value across all targets
fn most_common_java_version<'a>(
    targets: impl Iterator<Item = &'a TargetRecord>,
) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for info in targets.filter_map(|t| t.java_target_info.as_ref()) {
        let mut opts = info.javac_opts.iter();
        while let Some(opt) = opts.next() {
            if opt == "-source" || opt == "--release" {
                if let Some(value) = opts.next() {
                    *counts.entry(value.as_str()).or_default() += 1;
                }
            } else if let Some(value) = opt.strip_prefix("--release=") {
                *counts.entry(value).or_default() += 1;
            }
        }
    }

    counts
        .into_iter()
        .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then_with(|| vb.cmp(va)))
        .map(|(version, _)| version.to_string())
}
