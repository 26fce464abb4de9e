//! Artifact caching so repeated builds share already-loaded objects.
//!
//! Artifacts are immutable after load, so every pipeline built from the
//! same paths can share one in-memory copy. The global cache gives the
//! process load-once semantics: after the first successful load for a
//! given key, storage is never read again.

use crate::error::Result;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Trait implemented by builder option types to generate a stable cache key.
pub trait ModelOptions {
    /// Key under which artifacts loaded from these options are memoized.
    fn cache_key(&self) -> String;
}

type CacheStorage = HashMap<(TypeId, String), Arc<dyn Any + Send + Sync>>;

/// A thread-safe cache for loaded artifact objects.
///
/// Keyed by value type and caller-supplied key, so a classifier and a
/// vectorizer loaded from the same path pair occupy separate slots.
pub struct ArtifactCache {
    cache: Mutex<CacheStorage>,
}

impl ArtifactCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached value for `key`, loading it with `loader` on the
    /// first call.
    ///
    /// The lock is held across the load, so concurrent first calls block
    /// until one loader has populated the slot; storage is read at most
    /// once per key. `loader` must not call back into the cache.
    pub fn get_or_create<M, F>(&self, key: &str, loader: F) -> Result<M>
    where
        M: Clone + Send + Sync + 'static,
        F: FnOnce() -> Result<M>,
    {
        let cache_key = (TypeId::of::<M>(), key.to_string());

        let mut cache = self.cache.lock().unwrap();
        if let Some(cached) = cache.get(&cache_key) {
            if let Some(value) = cached.downcast_ref::<M>() {
                return Ok(value.clone());
            }
        }

        let value = loader()?;
        cache.insert(
            cache_key,
            Arc::new(value.clone()) as Arc<dyn Any + Send + Sync>,
        );

        Ok(value)
    }

    /// Drop every cached entry. Subsequent builds re-read from storage.
    pub fn clear(&self) {
        let mut cache = self.cache.lock().unwrap();
        cache.clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        let cache = self.cache.lock().unwrap();
        cache.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        let cache = self.cache.lock().unwrap();
        cache.is_empty()
    }
}

impl Default for ArtifactCache {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_ARTIFACT_CACHE: once_cell::sync::Lazy<ArtifactCache> =
    once_cell::sync::Lazy::new(ArtifactCache::new);

/// The process-global artifact cache used by pipeline builders.
pub fn global_cache() -> &'static ArtifactCache {
    &GLOBAL_ARTIFACT_CACHE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct FakeArtifact {
        id: String,
    }

    #[test]
    fn first_load_wins() {
        let cache = ArtifactCache::new();
        let first = cache
            .get_or_create::<FakeArtifact, _>("key", || {
                Ok(FakeArtifact {
                    id: "original".into(),
                })
            })
            .unwrap();
        let second = cache
            .get_or_create::<FakeArtifact, _>("key", || Ok(FakeArtifact { id: "new".into() }))
            .unwrap();
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn same_key_different_types_are_distinct_slots() {
        #[derive(Clone)]
        struct Other(u32);

        let cache = ArtifactCache::new();
        let _ = cache
            .get_or_create::<FakeArtifact, _>("key", || Ok(FakeArtifact { id: "a".into() }))
            .unwrap();
        let _ = cache.get_or_create::<Other, _>("key", || Ok(Other(7))).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let cache = ArtifactCache::new();
        let err = cache.get_or_create::<FakeArtifact, _>("key", || {
            Err(crate::error::SentimentError::ArtifactLoad("boom".into()))
        });
        assert!(err.is_err());
        assert!(cache.is_empty());

        let ok = cache
            .get_or_create::<FakeArtifact, _>("key", || Ok(FakeArtifact { id: "ok".into() }))
            .unwrap();
        assert_eq!(ok.id, "ok");
    }

    #[test]
    fn concurrent_first_loads_read_storage_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Barrier;
        use std::time::Duration;

        let cache = Arc::new(ArtifactCache::new());
        let loads = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let loads = Arc::clone(&loads);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    cache
                        .get_or_create::<FakeArtifact, _>("shared", move || {
                            loads.fetch_add(1, Ordering::SeqCst);
                            std::thread::sleep(Duration::from_millis(100));
                            Ok(FakeArtifact {
                                id: "loaded".into(),
                            })
                        })
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().id, "loaded");
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = ArtifactCache::new();
        let _ = cache
            .get_or_create::<FakeArtifact, _>("k", || Ok(FakeArtifact { id: "x".into() }))
            .unwrap();
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }
}
