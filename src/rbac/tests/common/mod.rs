//! Shared fixtures for the integration tests

#![allow(dead_code)]

use fortress_core::types::{RoleSet, SdSet, SdType, UserRole};
use fortress_rbac::{
    ConflictSetStore, HierarchyStore, InMemoryConflictSetStore, InMemoryHierarchyStore, RbacConfig,
    RbacError, Result, SodChecker,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

pub const TENANT: &str = "acme";
pub const USER: &str = "jsmith";

static TRACING: Once = Once::new();

/// Install a tracing subscriber honouring `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Hierarchy built from (child, parent) edges
pub fn hierarchy(edges: &[(&str, &str)]) -> Arc<InMemoryHierarchyStore> {
    let store = InMemoryHierarchyStore::new();
    for (child, parent) in edges {
        store
            .add_inheritance(TENANT, child, parent)
            .expect("valid edge");
    }
    Arc::new(store)
}

/// Conflict-set store holding `sets`
pub fn conflict_sets(sets: Vec<SdSet>) -> Arc<InMemoryConflictSetStore> {
    let store = InMemoryConflictSetStore::new();
    for set in sets {
        store.put(TENANT, set).expect("valid set");
    }
    Arc::new(store)
}

pub fn checker(edges: &[(&str, &str)], sets: Vec<SdSet>) -> SodChecker {
    checker_with_config(edges, sets, RbacConfig::default())
}

pub fn checker_with_config(edges: &[(&str, &str)], sets: Vec<SdSet>, config: RbacConfig) -> SodChecker {
    init_tracing();
    SodChecker::with_config(hierarchy(edges), conflict_sets(sets), config)
}

pub fn roles(names: &[&str]) -> Vec<UserRole> {
    names.iter().map(|name| UserRole::new(USER, *name)).collect()
}

pub fn names(roles: &[UserRole]) -> Vec<String> {
    roles.iter().map(|role| role.name.clone()).collect()
}

/// Hierarchy store that answers the first `budget` lookups, then fails
pub struct FlakyHierarchy {
    inner: Arc<InMemoryHierarchyStore>,
    budget: usize,
    calls: AtomicUsize,
}

impl FlakyHierarchy {
    pub fn new(inner: Arc<InMemoryHierarchyStore>, budget: usize) -> Self {
        Self {
            inner,
            budget,
            calls: AtomicUsize::new(0),
        }
    }

    fn spend(&self, role: &str, tenant: &str) -> Result<()> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.budget {
            return Err(RbacError::hierarchy_lookup(role, tenant, "directory unavailable"));
        }
        Ok(())
    }
}

impl HierarchyStore for FlakyHierarchy {
    fn ascendants(&self, role: &str, tenant: &str) -> Result<RoleSet> {
        self.spend(role, tenant)?;
        self.inner.ascendants(role, tenant)
    }

    fn descendants(&self, role: &str, tenant: &str) -> Result<RoleSet> {
        self.spend(role, tenant)?;
        self.inner.descendants(role, tenant)
    }
}

/// Conflict-set store that is always down
pub struct UnavailableConflictSets;

impl ConflictSetStore for UnavailableConflictSets {
    fn sets_touching(&self, _kind: SdType, _roles: &RoleSet, tenant: &str) -> Result<Vec<SdSet>> {
        Err(RbacError::conflict_set_lookup(tenant, "connection refused"))
    }
}

/// Conflict-set store counting how often it is consulted
pub struct CountingConflictSets {
    inner: Arc<InMemoryConflictSetStore>,
    pub calls: AtomicUsize,
}

impl CountingConflictSets {
    pub fn new(inner: Arc<InMemoryConflictSetStore>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ConflictSetStore for CountingConflictSets {
    fn sets_touching(&self, kind: SdType, roles: &RoleSet, tenant: &str) -> Result<Vec<SdSet>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.sets_touching(kind, roles, tenant)
    }
}
