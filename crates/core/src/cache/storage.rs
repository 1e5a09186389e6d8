//! Persistence of a resolved project between runs

use crate::error::{Error, Result};
use crate::types::Project;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bumped whenever the persisted [`Project`] shape changes
pub const STORAGE_VERSION: u32 = 1;

pub trait ProjectStorage: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<Project>>;

    fn store(&self, project: &Project) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    checksum: String,
    project: Project,
}

/// Single JSON file holding the project and an md5 checksum of it
#[derive(Debug, Clone)]
pub struct FileProjectStorage {
    path: PathBuf,
}

impl FileProjectStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn checksum(project: &Project) -> Result<String> {
        let serialized = serde_json::to_string(project)?;
        Ok(format!("{:x}", md5::compute(serialized.as_bytes())))
    }
}

impl ProjectStorage for FileProjectStorage {
    fn load(&self) -> Result<Option<Project>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let envelope: Envelope = serde_json::from_str(&contents)?;
        if envelope.version != STORAGE_VERSION {
            return Err(Error::Cache(format!(
                "Unsupported cache version {} in {} (expected {})",
                envelope.version,
                self.path.display(),
                STORAGE_VERSION
            )));
        }
        if Self::checksum(&envelope.project)? != envelope.checksum {
            return Err(Error::Cache(format!(
                "Checksum mismatch in {}",
                self.path.display()
            )));
        }

        tracing::debug!("Loaded project from {}", self.path.display());
        Ok(Some(envelope.project))
    }

    fn store(&self, project: &Project) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let envelope = Envelope {
            version: STORAGE_VERSION,
            checksum: Self::checksum(project)?,
            project: project.clone(),
        };
        let contents = serde_json::to_string_pretty(&envelope)
            .map_err(|e| Error::Cache(format!("Failed to serialize project: {}", e)))?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &self.path)?;

        tracing::debug!("Stored project to {}", self.path.display());
        Ok(())
    }
}

/// Keeps the last stored project in memory
#[derive(Debug, Default)]
pub struct InMemoryProjectStorage {
    project: Mutex<Option<Project>>,
}

impl InMemoryProjectStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStorage for InMemoryProjectStorage {
    fn load(&self) -> Result<Option<Project>> {
        Ok(self.project.lock().clone())
    }

    fn store(&self, project: &Project) -> Result<()> {
        *self.project.lock() = Some(project.clone());
        Ok(())
    }
}
