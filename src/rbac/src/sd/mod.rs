//! Separation-of-duty set lookup
//!
//! [`ConflictSetStore`] is the read interface the checker consumes;
//! [`InMemoryConflictSetStore`] is a tenant-keyed implementation and
//! [`CachedConflictSetStore`] adds a TTL cache in front of any store.

pub mod store;
pub mod cache;

pub use store::{ConflictSetStore, InMemoryConflictSetStore};
pub use cache::{CacheStats, CachedConflictSetStore};

use crate::config::CacheConfig;
use std::sync::Arc;

/// Put a [`CachedConflictSetStore`] in front of `store` when caching is enabled
pub fn cached_if_enabled(
    store: Arc<dyn ConflictSetStore>,
    config: &CacheConfig,
) -> Arc<dyn ConflictSetStore> {
    if config.enabled {
        Arc::new(CachedConflictSetStore::new(store, config))
    } else {
        store
    }
}
