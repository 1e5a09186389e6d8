//! Caching of the resolved project, in memory and on disk

pub mod project_cache;
pub mod storage;

pub use project_cache::{ProjectCache, ProjectSource, RefreshListener};
pub use storage::{FileProjectStorage, InMemoryProjectStorage, ProjectStorage, STORAGE_VERSION};
