//! Resolve compiler inputs and outputs of a target from an action graph

use super::{Action, ActionGraphContainer, Artifact, DepSetOfFiles, PathFragment};
use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// Scheme used for artifact paths relative to the exec root
pub const EXEC_ROOT_PREFIX: &str = "exec-root://";

/// Suffixes the IDE asks for when it wants a target's classpath inputs
const CLASSPATH_INPUT_SUFFIXES: &[&str] = &[".jar", "js"];

/// Read-only view over one action-graph snapshot.
///
/// Indexes are built once in [`ActionGraphParser::new`]; afterwards every
/// query is a pure function, so one parser can serve concurrent requests.
pub struct ActionGraphParser {
    graph: ActionGraphContainer,
    artifacts: HashMap<u32, usize>,
    depsets: HashMap<u32, usize>,
    fragments: HashMap<u32, usize>,
}

impl ActionGraphParser {
    pub fn new(graph: ActionGraphContainer) -> Self {
        let artifacts = index_by(&graph.artifacts, |a: &Artifact| a.id);
        let depsets = index_by(&graph.dep_set_of_files, |d: &DepSetOfFiles| d.id);
        let fragments = index_by(&graph.path_fragments, |f: &PathFragment| f.id);
        Self {
            graph,
            artifacts,
            depsets,
            fragments,
        }
    }

    /// Numeric id of the target with the given label
    pub fn lookup_target_id(&self, label: &str) -> Result<u32> {
        self.graph
            .targets
            .iter()
            .find(|t| t.label == label)
            .map(|t| t.id)
            .ok_or_else(|| Error::TargetNotFound {
                label: label.to_string(),
                known: self.graph.targets.iter().map(|t| t.label.clone()).collect(),
            })
    }

    /// All actions registered by the target
    pub fn actions_of(&self, label: &str) -> Result<Vec<&Action>> {
        let target_id = self.lookup_target_id(label)?;
        Ok(self
            .graph
            .actions
            .iter()
            .filter(|a| a.target_id == target_id)
            .collect())
    }

    /// Artifact ids reachable from the given depsets.
    ///
    /// Each depset is expanded at most once, so self-referencing or mutually
    /// referencing depsets terminate.
    pub fn expand_depsets(&self, root_ids: impl IntoIterator<Item = u32>) -> BTreeSet<u32> {
        let mut queue: VecDeque<u32> = root_ids.into_iter().collect();
        let mut expanded = HashSet::new();
        let mut artifact_ids = BTreeSet::new();

        while let Some(depset_id) = queue.pop_front() {
            if !expanded.insert(depset_id) {
                continue;
            }
            let Some(&index) = self.depsets.get(&depset_id) else {
                tracing::debug!("depset {} is not part of the action graph", depset_id);
                continue;
            };
            let depset = &self.graph.dep_set_of_files[index];
            artifact_ids.extend(depset.direct_artifact_ids.iter().copied());
            queue.extend(depset.transitive_dep_set_ids.iter().copied());
        }

        artifact_ids
    }

    /// Inputs of all the target's actions as sorted, de-duplicated
    /// `exec-root://` URIs ending with one of `suffixes`
    pub fn get_inputs(&self, target: &str, suffixes: &[&str]) -> Result<Vec<String>> {
        let depset_ids = self
            .actions_of(target)?
            .into_iter()
            .flat_map(|a| a.input_dep_set_ids.iter().copied());

        let inputs: BTreeSet<String> = self
            .expand_depsets(depset_ids)
            .into_iter()
            .filter_map(|id| self.artifact_path(id))
            .map(|path| format!("{}{}", EXEC_ROOT_PREFIX, path))
            .filter(|uri| matches_suffix(uri, suffixes))
            .collect();

        Ok(inputs.into_iter().collect())
    }

    /// Direct outputs of the target's actions ending with one of `suffixes`.
    ///
    /// Outputs keep action order and are not de-duplicated.
    pub fn get_outputs(&self, target: &str, suffixes: &[&str]) -> Result<Vec<String>> {
        Ok(self
            .actions_of(target)?
            .into_iter()
            .flat_map(|a| a.output_ids.iter().copied())
            .filter_map(|id| self.artifact_path(id))
            .filter(|path| matches_suffix(path, suffixes))
            .collect())
    }

    /// Classpath inputs of the target as absolute paths under `exec_root`
    pub fn inputs_as_paths(&self, target: &str, exec_root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self
            .get_inputs(target, CLASSPATH_INPUT_SUFFIXES)?
            .iter()
            .map(|uri| exec_root.join(uri.trim_start_matches(EXEC_ROOT_PREFIX)))
            .collect())
    }

    fn artifact_path(&self, artifact_id: u32) -> Option<String> {
        let Some(&index) = self.artifacts.get(&artifact_id) else {
            tracing::debug!("artifact {} is not part of the action graph", artifact_id);
            return None;
        };
        let artifact = &self.graph.artifacts[index];
        match (&artifact.exec_path, artifact.path_fragment_id) {
            (Some(exec_path), _) => Some(exec_path.clone()),
            (None, Some(fragment_id)) => self.construct_path(fragment_id),
            (None, None) => None,
        }
    }

    fn construct_path(&self, fragment_id: u32) -> Option<String> {
        let mut segments = Vec::new();
        let mut current = fragment_id;
        while current != 0 {
            // A parent chain longer than the fragment table is a cycle
            if segments.len() > self.fragments.len() {
                tracing::warn!("path fragment {} has a cyclic parent chain", fragment_id);
                return None;
            }
            let fragment = &self.graph.path_fragments[*self.fragments.get(&current)?];
            segments.push(fragment.label.as_str());
            current = fragment.parent_id;
        }
        segments.reverse();
        Some(segments.join("/"))
    }
}

fn index_by<T>(items: &[T], key: impl Fn(&T) -> u32) -> HashMap<u32, usize> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| (key(item), index))
        .collect()
}

fn matches_suffix(path: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| path.ends_with(suffix))
}
