//! Raw per-target records produced by the build-graph query (aspect output)

use serde::{Deserialize, Serialize};

/// Location of a file as reported by Bazel, before resolution to a real path
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FileLocation {
    pub relative_path: String,
    /// Output-root fragment such as `bazel-out/k8-fastbuild/bin`
    pub root_execution_path_fragment: String,
    pub is_source: bool,
    pub is_external: bool,
}

impl FileLocation {
    pub fn source(relative_path: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            is_source: true,
            ..Default::default()
        }
    }

    pub fn generated(root_fragment: impl Into<String>, relative_path: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            root_execution_path_fragment: root_fragment.into(),
            ..Default::default()
        }
    }
}

/// A single dependency edge of a target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub id: String,
}

/// JVM compilation outputs attached by the aspect to java/kotlin/scala rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct JavaTargetInfo {
    pub jars: Vec<JavaOutputJars>,
    pub javac_opts: Vec<String>,
    pub jvm_flags: Vec<String>,
    pub main_class: String,
    pub args: Vec<String>,
    pub runtime_classpath: Vec<FileLocation>,
    pub compile_classpath: Vec<FileLocation>,
    pub source_classpath: Vec<FileLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct JavaOutputJars {
    pub binary_jars: Vec<FileLocation>,
    pub interface_jars: Vec<FileLocation>,
    pub source_jars: Vec<FileLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ScalaTargetInfo {
    pub scalac_opts: Vec<String>,
    pub compiler_classpath: Vec<FileLocation>,
}

/// Everything the aspect knows about one target
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TargetRecord {
    pub id: String,
    pub kind: String,
    pub tags: Vec<String>,
    pub dependencies: Vec<Dependency>,
    pub sources: Vec<FileLocation>,
    pub resources: Vec<FileLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_target_info: Option<JavaTargetInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scala_target_info: Option<ScalaTargetInfo>,
}

impl TargetRecord {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    pub fn dependency_ids(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(|d| d.id.as_str())
    }

    pub fn with_dependencies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = ids.into_iter().map(|id| Dependency { id: id.into() }).collect();
        self
    }

    pub fn with_sources(mut self, sources: Vec<FileLocation>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}
