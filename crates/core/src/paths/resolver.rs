//! Resolves aspect-reported file locations and target labels to real paths
//!
//! Bazel reports three kinds of locations: main-workspace sources (relative to
//! the workspace root), generated or external files (relative to the exec
//! root plus an output-root fragment) and, occasionally, absolute paths that
//! a rule already resolved. The resolver is a pure function over the two
//! roots and is safe to share between threads.

use crate::error::{Error, Result};
use crate::types::{FileLocation, Label};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Facts obtained from `bazel info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BazelInfo {
    pub workspace_root: PathBuf,
    pub exec_root: PathBuf,
}

impl BazelInfo {
    pub fn new(workspace_root: impl Into<PathBuf>, exec_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            exec_root: exec_root.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BazelPathsResolver {
    info: BazelInfo,
}

impl BazelPathsResolver {
    pub fn new(info: BazelInfo) -> Self {
        Self { info }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.info.workspace_root
    }

    pub fn exec_root(&self) -> &Path {
        &self.info.exec_root
    }

    /// Resolve a single file location to an absolute path
    pub fn resolve(&self, location: &FileLocation) -> PathBuf {
        if Self::is_existing_absolute(location) {
            PathBuf::from(&location.relative_path)
        } else if Self::is_main_workspace_source(location) {
            self.info.workspace_root.join(&location.relative_path)
        } else {
            self.info
                .exec_root
                .join(&location.root_execution_path_fragment)
                .join(&location.relative_path)
        }
    }

    pub fn resolve_all<'a>(
        &self,
        locations: impl IntoIterator<Item = &'a FileLocation>,
    ) -> Vec<PathBuf> {
        locations.into_iter().map(|l| self.resolve(l)).collect()
    }

    /// Directory of the package that defines `label`
    pub fn label_to_directory(&self, label: &Label) -> Result<PathBuf> {
        let package = Self::extract_package_path(label.as_str())?;
        Ok(self.info.workspace_root.join(package))
    }

    fn extract_package_path(label: &str) -> Result<&str> {
        let without_prefix = label
            .strip_prefix("//")
            .ok_or_else(|| Error::malformed_label(label, "label didn't start with //"))?;

        match without_prefix.split_once(':') {
            Some((package, name)) if !name.contains(':') => Ok(package),
            _ => Err(Error::malformed_label(
                label,
                "label didn't contain exactly one ':'",
            )),
        }
    }

    fn is_existing_absolute(location: &FileLocation) -> bool {
        let path = Path::new(&location.relative_path);
        path.is_absolute() && path.exists()
    }

    fn is_main_workspace_source(location: &FileLocation) -> bool {
        location.is_source && !location.is_external
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn resolver() -> BazelPathsResolver {
        BazelPathsResolver::new(BazelInfo::new("/workspace", "/execroot/_main"))
    }

    #[test]
    fn test_label_to_directory() {
        let dir = resolver()
            .label_to_directory(&Label::from("//java/com/example:lib"))
            .unwrap();
        assert_eq!(dir, PathBuf::from("/workspace/java/com/example"));
    }

    #[test]
    fn test_root_package_label_maps_to_workspace_root() {
        let dir = resolver().label_to_directory(&Label::from("//:all")).unwrap();
        assert_eq!(dir, PathBuf::from("/workspace/"));
    }

    #[test]
    fn test_malformed_labels_are_rejected() {
        for label in ["@maven//:guava", "pkg:name", "//pkg", "//pkg:a:b"] {
            let err = resolver().label_to_directory(&Label::from(label)).unwrap_err();
            assert!(
                matches!(err, Error::MalformedLabel { .. }),
                "expected MalformedLabel for {label}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_resolve_main_workspace_source() {
        let location = FileLocation::source("lib/src/Lib.java");
        assert_eq!(
            resolver().resolve(&location),
            PathBuf::from("/workspace/lib/src/Lib.java")
        );
    }

    #[test]
    fn test_resolve_generated_file_under_exec_root() {
        let location = FileLocation::generated("bazel-out/k8-fastbuild/bin", "lib/liblib.jar");
        assert_eq!(
            resolver().resolve(&location),
            PathBuf::from("/execroot/_main/bazel-out/k8-fastbuild/bin/lib/liblib.jar")
        );
    }

    #[test]
    fn test_external_source_resolves_under_exec_root() {
        let location = FileLocation {
            relative_path: "external/maven/guava.jar".to_string(),
            root_execution_path_fragment: String::new(),
            is_source: true,
            is_external: true,
        };
        assert_eq!(
            resolver().resolve(&location),
            PathBuf::from("/execroot/_main/external/maven/guava.jar")
        );
    }

    #[test]
    fn test_existing_absolute_path_is_returned_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("Gen.java");
        std::fs::write(&file, "class Gen {}").unwrap();

        let location = FileLocation::generated("bazel-out/bin", file.to_string_lossy());
        assert_eq!(resolver().resolve(&location), file);
    }
}
