//! One-time engine initialization.
//!
//! The similarity matrix is built on first use and shared for the rest
//! of the process. Concurrent first callers wait on the single build.
//! A failed build leaves the cache empty so the next caller retries.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::Engine;

/// Memoized engine handle.
#[derive(Debug, Default)]
pub struct EngineCache {
    cell: OnceCell<Arc<Engine>>,
}

impl EngineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached engine, building it with `build` on first call.
    pub fn get_or_init<F, E>(&self, build: F) -> Result<Arc<Engine>, E>
    where
        F: FnOnce() -> Result<Engine, E>,
    {
        self.cell
            .get_or_try_init(|| build().map(Arc::new))
            .map(Arc::clone)
    }

    /// The engine, if already built.
    pub fn get(&self) -> Option<Arc<Engine>> {
        self.cell.get().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use cinerec_config::SimilarityConfig;

    use super::*;
    use crate::corpus::Item;

    fn build_counted(counter: &AtomicUsize) -> Result<Engine, String> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Engine::build(
            vec![Item::new(1, "A", "space"), Item::new(2, "B", "space")],
            &SimilarityConfig::default(),
        ))
    }

    #[test]
    fn builds_once() {
        let cache = EngineCache::new();
        let builds = AtomicUsize::new(0);
        assert!(!cache.is_initialized());

        let first = cache.get_or_init(|| build_counted(&builds)).unwrap();
        let second = cache.get_or_init(|| build_counted(&builds)).unwrap();

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_initialized());
        assert!(Arc::ptr_eq(&first, &cache.get().unwrap()));
    }

    #[test]
    fn failed_build_not_cached() {
        let cache = EngineCache::new();
        let err = cache
            .get_or_init(|| Err::<Engine, _>("corpus missing".to_string()))
            .unwrap_err();
        assert_eq!(err, "corpus missing");
        assert!(cache.get().is_none());

        let builds = AtomicUsize::new(0);
        assert!(cache.get_or_init(|| build_counted(&builds)).is_ok());
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn concurrent_first_use_builds_once() {
        let cache = Arc::new(EngineCache::new());
        let builds = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let builds = Arc::clone(&builds);
                std::thread::spawn(move || {
                    cache
                        .get_or_init(|| build_counted(&builds))
                        .unwrap()
                        .len()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }
}
