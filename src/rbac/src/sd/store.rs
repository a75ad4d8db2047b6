//! Conflict-set storage and lookup

use crate::error::{RbacError, Result};
use fortress_core::types::{fold, RoleSet, SdSet, SdType};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

/// Read access to separation-of-duty sets
///
/// Results are a snapshot for the current call only. The order of the
/// returned sets is the store's natural order and must be stable, since it
/// decides which role is blamed when several sets conflict.
pub trait ConflictSetStore: Send + Sync {
    /// Every set of `kind` with at least one member in `roles`
    fn sets_touching(&self, kind: SdType, roles: &RoleSet, tenant: &str) -> Result<Vec<SdSet>>;

    /// Dynamic sets touching `roles`
    fn dsd_sets_touching(&self, roles: &RoleSet, tenant: &str) -> Result<Vec<SdSet>> {
        self.sets_touching(SdType::Dynamic, roles, tenant)
    }

    /// Static sets touching `roles`
    fn ssd_sets_touching(&self, roles: &RoleSet, tenant: &str) -> Result<Vec<SdSet>> {
        self.sets_touching(SdType::Static, roles, tenant)
    }
}

impl<T: ConflictSetStore + ?Sized> ConflictSetStore for Arc<T> {
    fn sets_touching(&self, kind: SdType, roles: &RoleSet, tenant: &str) -> Result<Vec<SdSet>> {
        (**self).sets_touching(kind, roles, tenant)
    }
}

type SetKey = (SdType, String);

/// In-memory conflict-set store keyed by tenant
///
/// Sets are kept ordered by kind and case-folded name, which is the order
/// lookups return them in.
#[derive(Debug, Default)]
pub struct InMemoryConflictSetStore {
    sets: RwLock<HashMap<String, BTreeMap<SetKey, SdSet>>>,
}

impl InMemoryConflictSetStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a set
    ///
    /// Malformed sets (cardinality below 2, fewer than two members) are
    /// stored as given so the checker's malformed-set policy decides what
    /// happens to them; a warning is logged here.
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::InvalidInput`] if the set name is empty.
    pub fn put(&self, tenant: &str, set: SdSet) -> Result<()> {
        if set.name.trim().is_empty() {
            return Err(RbacError::InvalidInput(
                "Conflict set name cannot be empty".to_string(),
            ));
        }

        if let Err(e) = set.validate() {
            warn!(tenant, set = %set.name, error = %e, "storing malformed conflict set");
        }

        debug!(tenant, set = %set.name, kind = %set.kind, "stored conflict set");
        self.sets
            .write()
            .entry(tenant.to_string())
            .or_default()
            .insert((set.kind, fold(&set.name)), set);
        Ok(())
    }

    /// Delete a set; returns the removed set if it existed
    pub fn remove(&self, tenant: &str, kind: SdType, name: &str) -> Option<SdSet> {
        self.sets
            .write()
            .get_mut(tenant)
            .and_then(|sets| sets.remove(&(kind, fold(name))))
    }

    /// Fetch a set by name
    pub fn get(&self, tenant: &str, kind: SdType, name: &str) -> Option<SdSet> {
        self.sets
            .read()
            .get(tenant)
            .and_then(|sets| sets.get(&(kind, fold(name))).cloned())
    }

    /// All sets of `kind` in a tenant, in name order
    pub fn list(&self, tenant: &str, kind: SdType) -> Vec<SdSet> {
        self.sets
            .read()
            .get(tenant)
            .map(|sets| {
                sets.values()
                    .filter(|set| set.kind == kind)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl ConflictSetStore for InMemoryConflictSetStore {
    fn sets_touching(&self, kind: SdType, roles: &RoleSet, tenant: &str) -> Result<Vec<SdSet>> {
        let sets = self.sets.read();
        let Some(tenant_sets) = sets.get(tenant) else {
            return Ok(Vec::new());
        };

        Ok(tenant_sets
            .values()
            .filter(|set| set.kind == kind && set.intersects(roles))
            .cloned()
            .collect())
    }
}
