//! Model of `bazel aquery --output=jsonproto` and the queries run over it

pub mod parser;

pub use parser::{ActionGraphParser, EXEC_ROOT_PREFIX};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionGraphContainer {
    pub artifacts: Vec<Artifact>,
    pub actions: Vec<Action>,
    pub targets: Vec<Target>,
    pub dep_set_of_files: Vec<DepSetOfFiles>,
    pub path_fragments: Vec<PathFragment>,
}

impl ActionGraphContainer {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A file consumed or produced by an action.
///
/// Newer Bazel versions only report `path_fragment_id`; older ones report
/// the exec path directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Artifact {
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_fragment_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exec_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Action {
    pub target_id: u32,
    pub mnemonic: String,
    pub arguments: Vec<String>,
    pub input_dep_set_ids: Vec<u32>,
    pub output_ids: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Target {
    pub id: u32,
    pub label: String,
}

/// A node of the nested-set graph: direct files plus references to other sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DepSetOfFiles {
    pub id: u32,
    pub direct_artifact_ids: Vec<u32>,
    pub transitive_dep_set_ids: Vec<u32>,
}

/// One path segment; `parent_id == 0` marks a root segment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PathFragment {
    pub id: u32,
    pub label: String,
    pub parent_id: u32,
}
