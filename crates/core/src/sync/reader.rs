//! Reading per-target info files written by the build aspect

use crate::error::Result;
use crate::types::TargetRecord;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// File name suffix of aspect outputs
pub const TARGET_INFO_SUFFIX: &str = ".target-info.json";

/// Reads aspect outputs, one JSON-encoded [`TargetRecord`] per file
#[derive(Debug, Default, Clone)]
pub struct TargetInfoReader;

impl TargetInfoReader {
    pub fn new() -> Self {
        Self
    }

    pub fn is_target_info_file(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(TARGET_INFO_SUFFIX))
    }

    pub fn read_file(&self, path: &Path) -> Result<TargetRecord> {
        let content = fs::read_to_string(path)?;
        let record = serde_json::from_str(&content)?;
        Ok(record)
    }

    /// Record map keyed by target id; a later file wins over an earlier one
    /// with the same id
    pub fn read_files<P: AsRef<Path>>(
        &self,
        paths: impl IntoIterator<Item = P>,
    ) -> Result<HashMap<String, TargetRecord>> {
        let mut targets = HashMap::new();
        for path in paths {
            let record = self.read_file(path.as_ref())?;
            if let Some(previous) = targets.insert(record.id.clone(), record) {
                tracing::debug!("Duplicate target info for {}", previous.id);
            }
        }
        Ok(targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_read_files() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.target-info.json");
        let b = dir.path().join("b.target-info.json");
        fs::write(
            &a,
            r#"{"id": "//lib:a", "kind": "java_library", "sources": [{"relative_path": "lib/A.java", "is_source": true}]}"#,
        )
        .unwrap();
        fs::write(&b, r#"{"id": "//lib:b", "kind": "java_test", "dependencies": [{"id": "//lib:a"}]}"#)
            .unwrap();

        let targets = TargetInfoReader::new().read_files([&a, &b]).unwrap();

        assert_eq!(targets.len(), 2);
        assert_eq!(targets["//lib:a"].sources[0].relative_path, "lib/A.java");
        assert_eq!(targets["//lib:b"].dependency_ids().collect::<Vec<_>>(), vec!["//lib:a"]);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("x.target-info.json");
        fs::write(&path, "{not json").unwrap();

        let err = TargetInfoReader::new().read_file(&path).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_is_target_info_file() {
        assert!(TargetInfoReader::is_target_info_file(Path::new("out/a.target-info.json")));
        assert!(!TargetInfoReader::is_target_info_file(Path::new("out/a.json")));
    }
}
