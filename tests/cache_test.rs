//! Project cache backed by a file on disk

use bazel_bridge_core::cache::{FileProjectStorage, ProjectCache, ProjectSource, ProjectStorage};
use bazel_bridge_core::{CancellationToken, Error, Project, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

#[derive(Default)]
struct Counting(AtomicUsize);

impl ProjectSource for Counting {
    fn resolve_project(&self, cancel: &CancellationToken) -> Result<Project> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let n = self.0.fetch_add(1, Ordering::SeqCst);
        Ok(Project::new(PathBuf::from(format!("/ws/{n}")), Vec::new()))
    }
}

#[test]
fn test_second_process_reads_stored_project() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cache/project.json");

    let first = Arc::new(Counting::default());
    ProjectCache::new(first.clone(), Arc::new(FileProjectStorage::new(&path)))
        .get(&CancellationToken::new())
        .unwrap();
    assert_eq!(first.0.load(Ordering::SeqCst), 1);

    let second = Arc::new(Counting::default());
    let project = ProjectCache::new(second.clone(), Arc::new(FileProjectStorage::new(&path)))
        .get(&CancellationToken::new())
        .unwrap();

    assert_eq!(project.workspace_root(), std::path::Path::new("/ws/0"));
    assert_eq!(second.0.load(Ordering::SeqCst), 0);
}

#[test]
fn test_corrupt_cache_falls_back_to_resolution() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("project.json");
    fs::write(&path, "{\"version\": 1, \"checksum\": \"nope\"").unwrap();

    let source = Arc::new(Counting::default());
    let storage = Arc::new(FileProjectStorage::new(&path));
    let cache = ProjectCache::new(source.clone(), storage.clone());

    let project = cache.get(&CancellationToken::new()).unwrap();

    assert_eq!(source.0.load(Ordering::SeqCst), 1);
    assert_eq!(storage.load().unwrap().as_ref(), Some(project.as_ref()));
}

#[test]
fn test_refresh_notifies_listeners_with_new_project() {
    let dir = TempDir::new().unwrap();
    let cache = ProjectCache::new(
        Arc::new(Counting::default()),
        Arc::new(FileProjectStorage::new(dir.path().join("project.json"))),
    );
    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    cache.on_refresh(move |project| sink.lock().push(project.workspace_root().to_path_buf()));

    let cancel = CancellationToken::new();
    cache.get(&cancel).unwrap();
    cache.refresh_and_get(&cancel).unwrap();
    cache.get(&cancel).unwrap();

    assert_eq!(*seen.lock(), vec![PathBuf::from("/ws/1")]);
}

#[test]
fn test_concurrent_gets_resolve_once() {
    let dir = TempDir::new().unwrap();
    let source = Arc::new(Counting::default());
    let cache = Arc::new(ProjectCache::new(
        source.clone(),
        Arc::new(FileProjectStorage::new(dir.path().join("project.json"))),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || cache.get(&CancellationToken::new()).unwrap())
        })
        .collect();
    let projects: Vec<Arc<Project>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(source.0.load(Ordering::SeqCst), 1);
    assert!(projects.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}
