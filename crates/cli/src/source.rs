//! Target records read from a directory of aspect outputs

use bazel_bridge_core::config::ProjectView;
use bazel_bridge_core::sync::{FetchedTargets, TargetInfoReader, TargetInfoSource};
use bazel_bridge_core::{CancellationToken, Error, Result};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;
use walkdir::WalkDir;

/// Reads every `*.target-info.json` below a directory.
///
/// Root targets are the records selected by the project view.
pub struct DirectoryTargetInfoSource {
    root: PathBuf,
    reader: TargetInfoReader,
}

impl DirectoryTargetInfoSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            reader: TargetInfoReader::new(),
        }
    }

    fn info_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::Other(format!("Failed to walk aspect output: {e}")))?;
            if entry.file_type().is_file() && TargetInfoReader::is_target_info_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

impl TargetInfoSource for DirectoryTargetInfoSource {
    fn fetch(&self, view: &ProjectView, cancel: &CancellationToken) -> Result<FetchedTargets> {
        let files = self.info_files()?;
        debug!("Found {} target info files in {}", files.len(), self.root.display());
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let targets = self.reader.read_files(&files)?;
        let root_targets: HashSet<String> = targets
            .keys()
            .filter(|id| view.matches(id))
            .cloned()
            .collect();

        Ok(FetchedTargets {
            targets,
            root_targets,
        })
    }
}
