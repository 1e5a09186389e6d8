use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{Label, Module};

/// Internal model of an imported workspace.
///
/// Bazel aspect output -> `Project` -> IDE protocol responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    workspace_root: PathBuf,
    modules: Vec<Module>,
    source_to_target: BTreeMap<PathBuf, Label>,
}

impl Project {
    /// Assemble a project and index every source and resource location.
    ///
    /// Modules are indexed in order; when two modules claim the same location
    /// the later one wins and the collision is logged.
    pub fn new(workspace_root: PathBuf, modules: Vec<Module>) -> Self {
        let source_to_target = build_reverse_index(&modules);
        Self {
            workspace_root,
            modules,
            source_to_target,
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn source_to_target(&self) -> &BTreeMap<PathBuf, Label> {
        &self.source_to_target
    }

    pub fn find_module(&self, label: &Label) -> Option<&Module> {
        self.modules.iter().find(|m| &m.label == label)
    }

    pub fn find_module_by_source(&self, path: &Path) -> Option<&Module> {
        let label = self.source_to_target.get(path)?;
        self.find_module(label)
    }
}

fn build_reverse_index(modules: &[Module]) -> BTreeMap<PathBuf, Label> {
    let mut index = BTreeMap::new();
    for module in modules {
        for location in module.owned_locations() {
            if let Some(previous) = index.insert(location.clone(), module.label.clone()) {
                if previous != module.label {
                    tracing::warn!(
                        "{} is claimed by both {} and {}; keeping {}",
                        location.display(),
                        previous,
                        module.label,
                        module.label
                    );
                }
            }
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SourceSet, Tag};
    use std::collections::BTreeSet;

    fn module(label: &str, sources: &[&str], resources: &[&str]) -> Module {
        Module {
            label: Label::from(label),
            is_synthetic: false,
            direct_dependencies: vec![],
            languages: BTreeSet::new(),
            tags: BTreeSet::from([Tag::Library]),
            base_directory: PathBuf::from("/ws"),
            source_set: SourceSet::new(
                sources.iter().map(PathBuf::from).collect(),
                BTreeSet::new(),
            ),
            resources: resources.iter().map(PathBuf::from).collect(),
            source_dependencies: BTreeSet::new(),
            language_data: None,
        }
    }

    #[test]
    fn test_reverse_index_covers_sources_and_resources() {
        let project = Project::new(
            PathBuf::from("/ws"),
            vec![module("//a:a", &["/ws/a/A.java"], &["/ws/a/res.txt"])],
        );

        assert_eq!(project.source_to_target().len(), 2);
        let owner = project.find_module_by_source(Path::new("/ws/a/res.txt")).unwrap();
        assert_eq!(owner.label, Label::from("//a:a"));
    }

    #[test]
    fn test_reverse_index_last_module_wins_on_collision() {
        let project = Project::new(
            PathBuf::from("/ws"),
            vec![
                module("//a:first", &["/ws/shared/S.java"], &[]),
                module("//a:second", &["/ws/shared/S.java"], &[]),
            ],
        );

        assert_eq!(
            project.source_to_target().get(Path::new("/ws/shared/S.java")),
            Some(&Label::from("//a:second"))
        );
    }

    #[test]
    fn test_project_serde_round_trip_keeps_index() {
        let project = Project::new(
            PathBuf::from("/ws"),
            vec![module("//a:a", &["/ws/a/A.java"], &[])],
        );
        let json = serde_json::to_string(&project).unwrap();
        let restored: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, project);
    }
}
