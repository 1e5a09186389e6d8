//! Placeholder modules that keep the IDE's directory tree contiguous
//!
//! IDEs only show directories that belong to some module. When a partial
//! import selects targets deep inside the workspace, the directories above
//! them disappear from the project tree. Each uncovered subtree root gets a
//! synthetic, never-built module owning the directory as a resource.

use crate::config::ProjectView;
use crate::types::{Label, Module, SourceSet, Tag};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// Label of the placeholder owning the workspace root itself
pub const WORKSPACE_ROOT_MODULE: &str = "bazel-bridge-workspace-root";

const MODULES_ROOT_SUFFIX: &str = "-modules-root";

#[derive(Debug, Default, Clone)]
pub struct TreeSynthesizer;

impl TreeSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Placeholder modules for every directory the IDE needs but no module
    /// covers through its source roots.
    pub fn create_modules(
        &self,
        workspace_root: &Path,
        modules: &[Module],
        view: &ProjectView,
    ) -> Vec<Module> {
        let existing_roots: HashSet<&Path> = modules
            .iter()
            .flat_map(|m| m.source_set.source_roots.iter())
            .map(PathBuf::as_path)
            .collect();

        if view.is_full_workspace_import() {
            if existing_roots.contains(workspace_root) {
                return Vec::new();
            }
            return vec![placeholder(Label::new(WORKSPACE_ROOT_MODULE), workspace_root)];
        }

        expected_roots(modules)
            .into_iter()
            .filter(|root| !existing_roots.contains(root.as_path()))
            .map(|root| {
                let relative = root
                    .strip_prefix(workspace_root)
                    .map(|p| p.to_string_lossy().trim_end_matches('/').to_string())
                    .unwrap_or_else(|_| root.to_string_lossy().to_string());
                tracing::debug!("Adding placeholder module for {}", root.display());
                let label = if relative.is_empty() {
                    Label::new(WORKSPACE_ROOT_MODULE)
                } else {
                    Label::new(format!("{relative}{MODULES_ROOT_SUFFIX}"))
                };
                placeholder(label, &root)
            })
            .collect()
    }
}

/// Topmost base directories: sorted as strings, a directory whose string
/// starts with the current group's first entry falls into that group.
fn expected_roots(modules: &[Module]) -> Vec<PathBuf> {
    let mut directories: Vec<String> = modules
        .iter()
        .map(|m| m.base_directory.to_string_lossy().into_owned())
        .collect();
    directories.sort();

    let mut roots: Vec<String> = Vec::new();
    for directory in directories {
        match roots.last() {
            Some(head) if directory.starts_with(head.as_str()) => {}
            _ => roots.push(directory),
        }
    }
    roots.into_iter().map(PathBuf::from).collect()
}

fn placeholder(label: Label, directory: &Path) -> Module {
    Module {
        label,
        is_synthetic: true,
        direct_dependencies: Vec::new(),
        languages: BTreeSet::new(),
        tags: BTreeSet::from([Tag::NoBuild]),
        base_directory: directory.to_path_buf(),
        source_set: SourceSet::default(),
        resources: BTreeSet::from([directory.to_path_buf()]),
        source_dependencies: BTreeSet::new(),
        language_data: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(label: &str, dir: &str, roots: &[&str]) -> Module {
        Module {
            label: Label::from(label),
            is_synthetic: false,
            direct_dependencies: Vec::new(),
            languages: BTreeSet::new(),
            tags: BTreeSet::from([Tag::Library]),
            base_directory: PathBuf::from(dir),
            source_set: SourceSet::new(
                BTreeSet::new(),
                roots.iter().map(PathBuf::from).collect(),
            ),
            resources: BTreeSet::new(),
            source_dependencies: BTreeSet::new(),
            language_data: None,
        }
    }

    fn partial_view() -> ProjectView {
        ProjectView::new(["//a/..."])
    }

    #[test]
    fn test_full_import_adds_workspace_placeholder() {
        let modules = vec![module("//a:a", "/ws/a", &["/ws/a/src"])];
        let created =
            TreeSynthesizer::new().create_modules(Path::new("/ws"), &modules, &ProjectView::default());

        assert_eq!(created.len(), 1);
        let root = &created[0];
        assert_eq!(root.label.as_str(), WORKSPACE_ROOT_MODULE);
        assert!(root.is_synthetic);
        assert!(root.has_tag(Tag::NoBuild));
        assert!(root.source_set.is_empty());
        assert_eq!(root.resources, BTreeSet::from([PathBuf::from("/ws")]));
    }

    #[test]
    fn test_full_import_with_covered_root_adds_nothing() {
        let modules = vec![module("//:root", "/ws", &["/ws"])];
        let created =
            TreeSynthesizer::new().create_modules(Path::new("/ws"), &modules, &ProjectView::default());
        assert!(created.is_empty());
    }

    #[test]
    fn test_disjoint_subtrees_get_one_placeholder_each() {
        let modules = vec![
            module("//x/y:y", "/ws/x/y", &["/ws/x/y/src"]),
            module("//a/b:b", "/ws/a/b", &["/ws/a/b/src"]),
            module("//a/b/c:c", "/ws/a/b/c", &["/ws/a/b/c/src"]),
        ];
        let created = TreeSynthesizer::new().create_modules(Path::new("/ws"), &modules, &partial_view());

        let summary: Vec<(String, PathBuf)> = created
            .iter()
            .map(|m| (m.label.to_string(), m.base_directory.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("a/b-modules-root".to_string(), PathBuf::from("/ws/a/b")),
                ("x/y-modules-root".to_string(), PathBuf::from("/ws/x/y")),
            ]
        );
    }

    #[test]
    fn test_covered_subtree_gets_no_placeholder() {
        let modules = vec![
            module("//a:a", "/ws/a", &["/ws/a"]),
            module("//a/b:b", "/ws/a/b", &["/ws/a/b/src"]),
        ];
        let created = TreeSynthesizer::new().create_modules(Path::new("/ws"), &modules, &partial_view());
        assert!(created.is_empty());
    }

    #[test]
    fn test_grouping_is_by_string_prefix() {
        let modules = vec![
            module("//a/b:b", "/ws/a/b", &[]),
            module("//a/bc:bc", "/ws/a/bc", &[]),
        ];
        let created = TreeSynthesizer::new().create_modules(Path::new("/ws"), &modules, &partial_view());

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].base_directory, PathBuf::from("/ws/a/b"));
    }

    #[test]
    fn test_partial_import_at_workspace_root_uses_root_label() {
        let modules = vec![
            module("//:root", "/ws", &[]),
            module("//a:a", "/ws/a", &["/ws/a/src"]),
        ];
        let created = TreeSynthesizer::new().create_modules(Path::new("/ws"), &modules, &partial_view());

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].label.as_str(), WORKSPACE_ROOT_MODULE);
        assert_eq!(created[0].base_directory, PathBuf::from("/ws"));
    }
}
