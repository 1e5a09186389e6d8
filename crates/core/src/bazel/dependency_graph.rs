//! Transitive dependency index over the imported target universe

use crate::types::TargetRecord;
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::Arc;

/// Dependency index built once per resolution.
///
/// Only targets present in the record map are reported; edges pointing
/// outside the universe are ignored. Transitive closures are computed on
/// first request and memoized.
pub struct DependencyGraph<'a> {
    targets: &'a HashMap<String, TargetRecord>,
    root_targets: &'a HashSet<String>,
    closures: Mutex<HashMap<String, Arc<BTreeSet<String>>>>,
}

impl<'a> DependencyGraph<'a> {
    pub fn new(
        targets: &'a HashMap<String, TargetRecord>,
        root_targets: &'a HashSet<String>,
    ) -> Self {
        Self {
            targets,
            root_targets,
            closures: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_root_target(&self, id: &str) -> bool {
        self.root_targets.contains(id)
    }

    /// Direct dependencies of `id` that exist in the universe
    pub fn direct_dependencies(&self, id: &str) -> Vec<&'a TargetRecord> {
        let Some(target) = self.targets.get(id) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        target
            .dependency_ids()
            .filter(|dep| seen.insert(*dep))
            .filter_map(|dep| self.targets.get(dep))
            .collect()
    }

    /// Direct and transitive dependencies of `id`, excluding `id` itself
    pub fn transitive_dependencies(&self, id: &str) -> Vec<&'a TargetRecord> {
        self.closure_of(id)
            .iter()
            .filter_map(|dep| self.targets.get(dep))
            .collect()
    }

    /// Transitive dependencies reached through direct dependencies that are
    /// not root targets themselves.
    ///
    /// Root targets become modules of their own, so their closure is already
    /// represented in the project and must not be duplicated as sources.
    pub fn transitive_dependencies_without_root_targets(&self, id: &str) -> Vec<&'a TargetRecord> {
        let Some(target) = self.targets.get(id) else {
            return Vec::new();
        };

        let mut ids = BTreeSet::new();
        for dep in target.dependency_ids().filter(|d| !self.is_root_target(d)) {
            if !self.targets.contains_key(dep) {
                continue;
            }
            ids.insert(dep.to_string());
            ids.extend(self.closure_of(dep).iter().cloned());
        }

        ids.iter().filter_map(|dep| self.targets.get(dep)).collect()
    }

    fn closure_of(&self, id: &str) -> Arc<BTreeSet<String>> {
        if let Some(cached) = self.closures.lock().get(id) {
            return Arc::clone(cached);
        }

        let closure = Arc::new(self.compute_closure(id));
        self.closures
            .lock()
            .insert(id.to_string(), Arc::clone(&closure));
        closure
    }

    fn compute_closure(&self, id: &str) -> BTreeSet<String> {
        let mut visited = BTreeSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([id]);

        while let Some(current) = queue.pop_front() {
            let Some(target) = self.targets.get(current) else {
                continue;
            };
            for dep in target.dependency_ids() {
                if dep != id && self.targets.contains_key(dep) && visited.insert(dep.to_string()) {
                    queue.push_back(dep);
                }
            }
        }

        visited
    }
}
