//! TTL cache in front of a conflict-set store
//!
//! Lookups are cached per (tenant, kind, role) so that different role
//! combinations share entries. Results may be up to one TTL stale; the
//! checker only requires "recently fresh" data.

use super::store::ConflictSetStore;
use crate::config::CacheConfig;
use crate::error::Result;
use dashmap::DashMap;
use fortress_core::types::{fold, RoleSet, SdSet, SdType};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Cache key for one role's conflict sets
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    tenant: String,
    kind: SdType,
    role: String,
}

/// Cache entry with TTL
#[derive(Debug, Clone)]
struct CacheEntry {
    sets: Vec<SdSet>,
    created_at: Instant,
}

impl CacheEntry {
    fn new(sets: Vec<SdSet>) -> Self {
        Self {
            sets,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Statistics about cache performance
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Number of expired entries encountered
    pub expirations: usize,
    /// Total number of entries in cache
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Conflict-set store decorator with per-role TTL caching
///
/// Merged results are de-duplicated and returned in set-name order.
pub struct CachedConflictSetStore<S> {
    inner: S,
    entries: Arc<DashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    max_entries: usize,
    stats: Arc<DashMap<&'static str, usize>>,
}

impl<S: ConflictSetStore> CachedConflictSetStore<S> {
    /// Wrap `inner` with the given cache settings
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        Self {
            inner,
            entries: Arc::new(DashMap::new()),
            ttl: config.ttl(),
            max_entries: config.max_entries.max(1),
            stats: Arc::new(DashMap::new()),
        }
    }

    /// Wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drop every entry belonging to `tenant`
    pub fn invalidate_tenant(&self, tenant: &str) {
        self.entries.retain(|key, _| key.tenant != tenant);
        debug!(tenant, "invalidated conflict set cache");
    }

    /// Drop every entry and reset statistics
    pub fn clear(&self) {
        self.entries.clear();
        self.stats.clear();
    }

    /// Current cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.get_stat("hits"),
            misses: self.get_stat("misses"),
            expirations: self.get_stat("expirations"),
            entries: self.entries.len(),
        }
    }

    fn lookup_role(&self, kind: SdType, role: &str, tenant: &str) -> Result<Vec<SdSet>> {
        let key = CacheKey {
            tenant: tenant.to_string(),
            kind,
            role: fold(role),
        };

        if let Some(entry) = self.entries.get(&key) {
            if !entry.is_expired(self.ttl) {
                self.increment_stat("hits");
                return Ok(entry.sets.clone());
            }
            drop(entry);
            self.entries.remove(&key);
            self.increment_stat("expirations");
        } else {
            self.increment_stat("misses");
        }

        let single: RoleSet = [role.to_string()].into();
        let sets = self.inner.sets_touching(kind, &single, tenant)?;

        if self.entries.len() >= self.max_entries {
            self.evict();
        }
        self.entries.insert(key, CacheEntry::new(sets.clone()));

        Ok(sets)
    }

    /// Purge expired entries, then about 10% of the rest if still full
    fn evict(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| !entry.is_expired(ttl));

        if self.entries.len() >= self.max_entries {
            let to_remove = (self.max_entries / 10).max(1);
            let mut removed = 0;
            self.entries.retain(|_, _| {
                if removed < to_remove {
                    removed += 1;
                    false
                } else {
                    true
                }
            });
        }
    }

    fn increment_stat(&self, key: &'static str) {
        self.stats
            .entry(key)
            .and_modify(|count| *count += 1)
            .or_insert(1);
    }

    fn get_stat(&self, key: &'static str) -> usize {
        self.stats.get(key).map(|v| *v).unwrap_or(0)
    }
}

impl<S: ConflictSetStore> ConflictSetStore for CachedConflictSetStore<S> {
    fn sets_touching(&self, kind: SdType, roles: &RoleSet, tenant: &str) -> Result<Vec<SdSet>> {
        let mut merged: BTreeMap<String, SdSet> = BTreeMap::new();

        for role in roles {
            for set in self.lookup_role(kind, role, tenant)? {
                merged.entry(fold(&set.name)).or_insert(set);
            }
        }

        Ok(merged.into_values().collect())
    }
}
