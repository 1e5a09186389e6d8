//! Process-wide cache of the resolved project

use crate::error::{Error, Result};
use crate::types::Project;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::storage::ProjectStorage;

/// Something able to resolve a fresh project
pub trait ProjectSource: Send + Sync {
    fn resolve_project(&self, cancel: &CancellationToken) -> Result<Project>;
}

pub type RefreshListener = Arc<dyn Fn(&Arc<Project>) + Send + Sync>;

/// Holds the current project.
///
/// Resolutions are serialized: the slot lock is held while resolving and
/// storing, so concurrent callers wait for the running resolution instead of
/// starting another one. Listeners run after both locks are released, so
/// they may read the cache or register further listeners.
pub struct ProjectCache {
    source: Arc<dyn ProjectSource>,
    storage: Arc<dyn ProjectStorage>,
    slot: Mutex<Option<Arc<Project>>>,
    listeners: Mutex<Vec<RefreshListener>>,
}

impl ProjectCache {
    pub fn new(source: Arc<dyn ProjectSource>, storage: Arc<dyn ProjectStorage>) -> Self {
        Self {
            source,
            storage,
            slot: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Register a callback run once after every successful refresh
    pub fn on_refresh(&self, listener: impl Fn(&Arc<Project>) + Send + Sync + 'static) {
        self.listeners.lock().push(Arc::new(listener));
    }

    /// Current project without triggering a resolution
    pub fn current(&self) -> Option<Arc<Project>> {
        self.slot.lock().clone()
    }

    /// Cached project, falling back to storage and then to a resolution.
    ///
    /// A failed store is reported as [`Error::Cache`]; the freshly resolved
    /// project stays cached and is returned by the next call.
    pub fn get(&self, cancel: &CancellationToken) -> Result<Arc<Project>> {
        let mut slot = self.slot.lock();
        if let Some(project) = slot.as_ref() {
            return Ok(Arc::clone(project));
        }

        match self.storage.load() {
            Ok(Some(project)) => {
                tracing::info!("Loaded project from storage");
                let project = Arc::new(project);
                *slot = Some(Arc::clone(&project));
                return Ok(project);
            }
            Ok(None) => tracing::debug!("No stored project, resolving"),
            Err(e) => tracing::warn!("Ignoring unusable stored project: {}", e),
        }

        let project = Arc::new(self.source.resolve_project(cancel)?);
        *slot = Some(Arc::clone(&project));
        self.store(&project)?;
        Ok(project)
    }

    /// Always resolve, replacing whatever was cached, then notify listeners.
    ///
    /// On failure or cancellation the previous project is left in place.
    pub fn refresh_and_get(&self, cancel: &CancellationToken) -> Result<Arc<Project>> {
        let (project, stored) = {
            let mut slot = self.slot.lock();
            let project = Arc::new(self.source.resolve_project(cancel)?);
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            *slot = Some(Arc::clone(&project));
            let stored = self.store(&project);
            (project, stored)
        };

        let listeners: Vec<RefreshListener> = self.listeners.lock().clone();
        for listener in &listeners {
            listener(&project);
        }

        stored.map(|()| project)
    }

    fn store(&self, project: &Project) -> Result<()> {
        self.storage.store(project).map_err(|e| {
            tracing::error!("Failed to store project: {}", e);
            Error::Cache(format!("Failed to store project: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::storage::InMemoryProjectStorage;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl ProjectSource for CountingSource {
        fn resolve_project(&self, cancel: &CancellationToken) -> Result<Project> {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            if self.fail {
                return Err(Error::Other("bazel failed".to_string()));
            }
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Project::new(PathBuf::from(format!("/ws{n}")), Vec::new()))
        }
    }

    struct BrokenStorage;

    impl ProjectStorage for BrokenStorage {
        fn load(&self) -> Result<Option<Project>> {
            Err(Error::Cache("corrupt".to_string()))
        }

        fn store(&self, _project: &Project) -> Result<()> {
            Err(Error::Cache("disk full".to_string()))
        }
    }

    fn cache_with(source: Arc<CountingSource>) -> ProjectCache {
        ProjectCache::new(source, Arc::new(InMemoryProjectStorage::new()))
    }

    #[test]
    fn test_get_resolves_once() {
        let source = Arc::new(CountingSource::default());
        let cache = cache_with(source.clone());
        let cancel = CancellationToken::new();

        let first = cache.get(&cancel).unwrap();
        let second = cache.get(&cancel).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_get_prefers_storage() {
        let source = Arc::new(CountingSource::default());
        let storage = Arc::new(InMemoryProjectStorage::new());
        storage
            .store(&Project::new(PathBuf::from("/stored"), Vec::new()))
            .unwrap();
        let cache = ProjectCache::new(source.clone(), storage);

        let project = cache.get(&CancellationToken::new()).unwrap();

        assert_eq!(project.workspace_root(), std::path::Path::new("/stored"));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_refresh_always_resolves_and_notifies_once() {
        let source = Arc::new(CountingSource::default());
        let cache = cache_with(source.clone());
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&notified);
        cache.on_refresh(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let cancel = CancellationToken::new();

        let first = cache.get(&cancel).unwrap();
        let refreshed = cache.refresh_and_get(&cancel).unwrap();

        assert!(!Arc::ptr_eq(&first, &refreshed));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(notified.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&cache.get(&cancel).unwrap(), &refreshed));
    }

    #[test]
    fn test_failed_refresh_keeps_previous_project() {
        let good = Arc::new(CountingSource::default());
        let storage = Arc::new(InMemoryProjectStorage::new());
        let warm = ProjectCache::new(good, storage.clone());
        let previous = warm.get(&CancellationToken::new()).unwrap();

        let failing = ProjectCache::new(
            Arc::new(CountingSource {
                fail: true,
                ..Default::default()
            }),
            storage,
        );
        *failing.slot.lock() = Some(Arc::clone(&previous));

        assert!(failing.refresh_and_get(&CancellationToken::new()).is_err());
        assert!(Arc::ptr_eq(&failing.current().unwrap(), &previous));
    }

    #[test]
    fn test_cancelled_refresh_keeps_previous_project() {
        let source = Arc::new(CountingSource::default());
        let cache = cache_with(source.clone());
        let previous = cache.get(&CancellationToken::new()).unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(matches!(cache.refresh_and_get(&cancel), Err(Error::Cancelled)));
        assert!(Arc::ptr_eq(&cache.current().unwrap(), &previous));
    }

    #[test]
    fn test_store_failure_is_reported_but_project_kept() {
        let source = Arc::new(CountingSource::default());
        let cache = ProjectCache::new(source.clone(), Arc::new(BrokenStorage));
        let cancel = CancellationToken::new();

        assert!(matches!(cache.get(&cancel), Err(Error::Cache(_))));

        let project = cache.get(&cancel).unwrap();
        assert_eq!(project.workspace_root(), std::path::Path::new("/ws0"));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_can_use_cache_during_refresh() {
        let cache = Arc::new(cache_with(Arc::new(CountingSource::default())));
        let late_calls = Arc::new(AtomicUsize::new(0));
        let registered = Arc::new(AtomicBool::new(false));
        let seen_current = Arc::new(AtomicBool::new(false));

        let weak = Arc::downgrade(&cache);
        let (late, once, seen) = (late_calls.clone(), registered.clone(), seen_current.clone());
        cache.on_refresh(move |project| {
            let Some(cache) = weak.upgrade() else { return };
            if let Some(current) = cache.current() {
                seen.store(Arc::ptr_eq(&current, project), Ordering::SeqCst);
            }
            if !once.swap(true, Ordering::SeqCst) {
                let late = late.clone();
                cache.on_refresh(move |_| {
                    late.fetch_add(1, Ordering::SeqCst);
                });
            }
        });
        let cancel = CancellationToken::new();

        cache.refresh_and_get(&cancel).unwrap();
        assert!(seen_current.load(Ordering::SeqCst));
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);

        cache.refresh_and_get(&cancel).unwrap();
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }
}
