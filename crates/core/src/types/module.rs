use crate::impl_case_insensitive_deserialize;
use crate::languages::LanguageData;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

use super::{Label, Language};

/// Semantic classification of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Library,
    Application,
    Test,
    NoIde,
    NoBuild,
    Manual,
}

impl_case_insensitive_deserialize!(
    Tag,
    Library => "library",
    Application => "application",
    Test => "test",
    NoIde => "no_ide",
    NoBuild => "no_build",
    Manual => "manual"
);

/// Resolved sources of a module together with their inferred roots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSet {
    pub sources: BTreeSet<PathBuf>,
    pub source_roots: BTreeSet<PathBuf>,
}

impl SourceSet {
    pub fn new(sources: BTreeSet<PathBuf>, source_roots: BTreeSet<PathBuf>) -> Self {
        Self {
            sources,
            source_roots,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.source_roots.is_empty()
    }
}

/// IDE-facing import unit derived from one or more build targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub label: Label,
    pub is_synthetic: bool,
    pub direct_dependencies: Vec<Label>,
    pub languages: BTreeSet<Language>,
    pub tags: BTreeSet<Tag>,
    pub base_directory: PathBuf,
    pub source_set: SourceSet,
    pub resources: BTreeSet<PathBuf>,
    pub source_dependencies: BTreeSet<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_data: Option<LanguageData>,
}

impl Module {
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Every location this module claims: sources first, then resources.
    pub fn owned_locations(&self) -> impl Iterator<Item = &PathBuf> {
        self.source_set.sources.iter().chain(self.resources.iter())
    }
}
