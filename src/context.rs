//! # Resolver Context
//!
//! A per-operation cache of shared `FileSystem` and `FileObject` handles,
//! reference counted so that a backend re-opening its own parent during
//! `open()` finds it already resident instead of paying to reconstruct it,
//! while a zero-refcount entry still stays around until evicted under
//! capacity pressure rather than being destroyed the instant its last
//! external reference drops.
//!
//! A `Context` is **not** thread-safe at the object level — see
//! [`ResolverContext::default_context`] for the process-wide convenience
//! instance, which is only made `Sync` by the `Mutex` wrapped around it.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::VfsError;
use crate::path_spec::Fingerprint;
use crate::traits::{FileObject, FileSystem};

/// A fixed- or unlimited-capacity cache of `(value, refcount)` pairs keyed
/// by `K`, with LRU eviction restricted to the zero-refcount subset.
///
/// Implemented per the original's design note: a `HashMap<K, (V, u32)>`
/// plus an LRU queue over only the entries currently at refcount zero.
/// Live (refcount > 0) entries are never evicted.
struct RefCountedCache<K, V> {
    entries: HashMap<K, (V, u32)>,
    zero_refcount_lru: VecDeque<K>,
    capacity: Option<usize>,
}

impl<K, V> RefCountedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            zero_refcount_lru: VecDeque::new(),
            capacity,
        }
    }

    /// If `key` is cached, increments its refcount and returns a clone of
    /// the shared handle; otherwise `None`, signalling the caller to
    /// construct a fresh one and call [`insert`](Self::insert).
    fn get(&mut self, key: &K) -> Option<V> {
        let (value, count) = self.entries.get_mut(key)?;
        if *count == 0 {
            self.zero_refcount_lru.retain(|k| k != key);
        }
        *count += 1;
        Some(value.clone())
    }

    /// Insert a freshly constructed handle with refcount 1. Evicts the
    /// least-recently-released zero-refcount entry if at capacity; fails
    /// if the cache is full and nothing is evictable.
    fn insert(&mut self, key: K, value: V) -> Result<(), VfsError> {
        if self.entries.contains_key(&key) {
            return Ok(());
        }
        if let Some(capacity) = self.capacity {
            if self.entries.len() >= capacity {
                match self.zero_refcount_lru.pop_front() {
                    Some(evict_key) => {
                        self.entries.remove(&evict_key);
                    }
                    None => return Err(VfsError::CacheFull),
                }
            }
        }
        self.entries.insert(key, (value, 1));
        Ok(())
    }

    /// Decrement `key`'s refcount. At zero, the entry becomes evictable but
    /// is not destroyed immediately.
    fn release(&mut self, key: &K) {
        if let Some((_, count)) = self.entries.get_mut(key) {
            if *count > 0 {
                *count -= 1;
            }
            if *count == 0 {
                self.zero_refcount_lru.push_back(key.clone());
            }
        }
    }

    /// Drop every entry regardless of refcount.
    fn empty(&mut self) {
        self.entries.clear();
        self.zero_refcount_lru.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Per-operation cache of opened `FileSystem` and `FileObject` handles.
///
/// Not `Sync`: construct one per worker, or guard the
/// [`default_context`](Self::default_context) with external
/// synchronisation.
pub struct ResolverContext {
    file_systems: RefCountedCache<Fingerprint, Arc<dyn FileSystem>>,
    file_objects: RefCountedCache<Fingerprint, Arc<dyn FileObject>>,
}

impl ResolverContext {
    /// Start building a context with explicit cache capacities.
    pub fn builder() -> ResolverContextBuilder {
        ResolverContextBuilder {
            file_system_capacity: None,
            file_object_capacity: None,
        }
    }

    /// A context with unlimited cache capacity.
    pub fn unbounded() -> Self {
        Self::builder().build()
    }

    /// The process-wide default context. Not multi-process safe; prefer a
    /// per-worker context for concurrent callers.
    pub fn default_context() -> MutexGuard<'static, ResolverContext> {
        static GLOBAL: std::sync::OnceLock<Mutex<ResolverContext>> = std::sync::OnceLock::new();
        GLOBAL
            .get_or_init(|| Mutex::new(ResolverContext::unbounded()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Look up a cached `FileSystem` by fingerprint, incrementing its
    /// refcount on hit.
    pub fn get_file_system(&mut self, fingerprint: &Fingerprint) -> Option<Arc<dyn FileSystem>> {
        self.file_systems.get(fingerprint)
    }

    /// Cache a freshly opened `FileSystem` with refcount 1.
    pub fn cache_file_system(
        &mut self,
        fingerprint: Fingerprint,
        file_system: Arc<dyn FileSystem>,
    ) -> Result<(), VfsError> {
        self.file_systems.insert(fingerprint, file_system)
    }

    /// Release a previously obtained `FileSystem` reference.
    pub fn release_file_system(&mut self, fingerprint: &Fingerprint) {
        self.file_systems.release(fingerprint);
    }

    /// Look up a cached `FileObject` by fingerprint, incrementing its
    /// refcount on hit.
    pub fn get_file_object(&mut self, fingerprint: &Fingerprint) -> Option<Arc<dyn FileObject>> {
        self.file_objects.get(fingerprint)
    }

    /// Cache a freshly opened `FileObject` with refcount 1.
    pub fn cache_file_object(
        &mut self,
        fingerprint: Fingerprint,
        file_object: Arc<dyn FileObject>,
    ) -> Result<(), VfsError> {
        self.file_objects.insert(fingerprint, file_object)
    }

    /// Release a previously obtained `FileObject` reference.
    pub fn release_file_object(&mut self, fingerprint: &Fingerprint) {
        self.file_objects.release(fingerprint);
    }

    /// Drop every cached handle regardless of residual reference count.
    /// Intended for teardown; any stacked `FileObject` still holding a
    /// cloned `Arc` keeps working until it too is dropped, but no further
    /// lookup will find it in this context.
    pub fn empty(&mut self) {
        self.file_systems.empty();
        self.file_objects.empty();
    }

    /// Number of cached `FileSystem` entries (including zero-refcount
    /// ones not yet evicted). Exposed for tests.
    pub fn file_system_cache_len(&self) -> usize {
        self.file_systems.len()
    }

    /// Number of cached `FileObject` entries. Exposed for tests.
    pub fn file_object_cache_len(&self) -> usize {
        self.file_objects.len()
    }
}

/// Builder for [`ResolverContext`].
pub struct ResolverContextBuilder {
    file_system_capacity: Option<usize>,
    file_object_capacity: Option<usize>,
}

impl ResolverContextBuilder {
    /// Cap the `FileSystem` cache at `capacity` entries.
    pub fn file_system_capacity(mut self, capacity: usize) -> Self {
        self.file_system_capacity = Some(capacity);
        self
    }

    /// Cap the `FileObject` cache at `capacity` entries.
    pub fn file_object_capacity(mut self, capacity: usize) -> Self {
        self.file_object_capacity = Some(capacity);
        self
    }

    /// Build the context.
    pub fn build(self) -> ResolverContext {
        ResolverContext {
            file_systems: RefCountedCache::new(self.file_system_capacity),
            file_objects: RefCountedCache::new(self.file_object_capacity),
        }
    }
}
