//! Fold colocated targets into one module per directory
//!
//! Bazel packages routinely define a library, its tests and generated
//! variants side by side. Consumers that model one compilation unit per
//! directory get a single merged module instead, and every dependency edge
//! that pointed at one of the folded targets is redirected to it.

use crate::error::{Error, Result};
use crate::languages::{LanguageData, LanguageDataKind};
use crate::types::{Label, Module, SourceSet};
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::PathBuf;

/// Target name given to merged modules
pub const MERGED_TARGET_NAME: &str = "bridge-merged";

type MergeFn = fn(LanguageData, LanguageData) -> LanguageData;

/// Supported language-payload combinations; anything else is an error
const LANGUAGE_MERGE_TABLE: &[(LanguageDataKind, LanguageDataKind, MergeFn)] = &[
    (LanguageDataKind::Scala, LanguageDataKind::Scala, keep_left),
    (LanguageDataKind::Scala, LanguageDataKind::Java, keep_left),
    (LanguageDataKind::Java, LanguageDataKind::Scala, keep_right),
];

fn keep_left(left: LanguageData, _right: LanguageData) -> LanguageData {
    left
}

fn keep_right(_left: LanguageData, right: LanguageData) -> LanguageData {
    right
}

/// Single-use merger; `merge_modules` consumes it so the rename table can
/// never leak into another resolution.
pub struct ModuleMerger {
    ignored_source_roots: Vec<String>,
    remapping: HashMap<Label, Label>,
}

impl ModuleMerger {
    pub fn new(ignored_source_roots: Vec<String>) -> Self {
        Self {
            ignored_source_roots,
            remapping: HashMap::new(),
        }
    }

    pub fn merge_modules(mut self, modules: Vec<Module>) -> Result<Vec<Module>> {
        let mut by_directory: IndexMap<PathBuf, Vec<Module>> = IndexMap::new();
        for module in modules {
            by_directory
                .entry(module.base_directory.clone())
                .or_default()
                .push(module);
        }

        let mut merged = Vec::with_capacity(by_directory.len());
        for (_, group) in by_directory {
            merged.push(self.merge_group(group)?);
        }

        Ok(merged
            .into_iter()
            .map(|module| self.remap_dependencies(module))
            .collect())
    }

    fn merge_group(&mut self, mut group: Vec<Module>) -> Result<Module> {
        if group.len() == 1 {
            if let Some(module) = group.pop() {
                return Ok(module);
            }
        }
        self.merge_many(group)
    }

    fn merge_many(&mut self, modules: Vec<Module>) -> Result<Module> {
        let head = &modules[0];
        let label = head.label.with_name(MERGED_TARGET_NAME);
        let base_directory = head.base_directory.clone();
        tracing::debug!(
            "Merging {} modules in {} into {}",
            modules.len(),
            base_directory.display(),
            label
        );

        let mut source_set = SourceSet::new(
            modules.iter().flat_map(|m| m.source_set.sources.iter().cloned()).collect(),
            modules.iter().flat_map(|m| m.source_set.source_roots.iter().cloned()).collect(),
        );
        if let Some(root) = source_set.source_roots.iter().find(|r| self.is_ignored_root(r)) {
            tracing::info!("Dropping sources of {} because {} is ignored", label, root.display());
            source_set = SourceSet::default();
        }

        let mut seen = HashSet::new();
        let direct_dependencies = modules
            .iter()
            .flat_map(|m| m.direct_dependencies.iter())
            .filter(|dep| seen.insert(*dep))
            .cloned()
            .collect();

        for module in &modules {
            self.remapping.insert(module.label.clone(), label.clone());
        }

        let is_synthetic = modules.iter().all(|m| m.is_synthetic);
        let languages = modules.iter().flat_map(|m| m.languages.iter().copied()).collect();
        let tags = modules.iter().flat_map(|m| m.tags.iter().copied()).collect();
        let resources: BTreeSet<PathBuf> =
            modules.iter().flat_map(|m| m.resources.iter().cloned()).collect();
        let source_dependencies = modules
            .iter()
            .flat_map(|m| m.source_dependencies.iter().cloned())
            .collect();
        let language_data = merge_language_data(modules.into_iter().filter_map(|m| m.language_data))?;

        Ok(Module {
            label,
            is_synthetic,
            direct_dependencies,
            languages,
            tags,
            base_directory,
            source_set,
            resources,
            source_dependencies,
            language_data,
        })
    }

    fn is_ignored_root(&self, root: &std::path::Path) -> bool {
        let root = root.to_string_lossy();
        let root = root.trim_end_matches('/');
        self.ignored_source_roots
            .iter()
            .map(|ignored| ignored.trim_end_matches('/'))
            .any(|ignored| !ignored.is_empty() && root.ends_with(ignored))
    }

    fn remap_dependencies(&self, mut module: Module) -> Module {
        let mut seen = HashSet::new();
        module.direct_dependencies = module
            .direct_dependencies
            .iter()
            .map(|dep| self.remapping.get(dep).unwrap_or(dep).clone())
            .filter(|dep| *dep != module.label)
            .filter(|dep| seen.insert(dep.clone()))
            .collect();
        module
    }
}

fn merge_language_data(
    payloads: impl Iterator<Item = LanguageData>,
) -> Result<Option<LanguageData>> {
    let mut merged: Option<LanguageData> = None;
    for payload in payloads {
        merged = Some(match merged {
            None => payload,
            Some(acc) => merge_two(acc, payload)?,
        });
    }
    Ok(merged)
}

fn merge_two(left: LanguageData, right: LanguageData) -> Result<LanguageData> {
    let (left_kind, right_kind) = (left.kind(), right.kind());
    let merge = LANGUAGE_MERGE_TABLE
        .iter()
        .find(|(l, r, _)| *l == left_kind && *r == right_kind)
        .map(|(_, _, merge)| *merge)
        .ok_or_else(|| Error::MergeUnsupported {
            left: left_kind.to_string(),
            right: right_kind.to_string(),
        })?;
    Ok(merge(left, right))
}
