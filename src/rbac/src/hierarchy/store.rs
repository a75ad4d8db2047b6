//! Hierarchy lookups used by the separation-of-duty checker

use super::graph::{GraphError, RoleGraph};
use crate::error::{RbacError, Result};
use fortress_core::types::{fold, RoleSet};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Read access to the role hierarchy of a tenant
///
/// Implementations may be backed by a directory, a database or memory. A
/// role without recorded edges yields an empty set; an unreachable backend
/// yields [`RbacError::HierarchyLookup`], which callers treat as fatal.
pub trait HierarchyStore: Send + Sync {
    /// Roles `role` inherits from, transitively, excluding itself
    fn ascendants(&self, role: &str, tenant: &str) -> Result<RoleSet>;

    /// Roles that inherit from `role`, transitively, excluding itself
    fn descendants(&self, role: &str, tenant: &str) -> Result<RoleSet>;

    /// Union of `{r} ∪ ascendants(r)` for every role
    ///
    /// This is the authorized role set: everything a user can exercise
    /// through the given assignments.
    fn inherited_roles(&self, roles: &[String], tenant: &str) -> Result<RoleSet> {
        let mut seen = HashSet::new();
        let mut result = RoleSet::new();

        for role in roles {
            if seen.insert(fold(role)) {
                result.insert(role.clone());
            }
            for parent in self.ascendants(role, tenant)? {
                if seen.insert(fold(&parent)) {
                    result.insert(parent);
                }
            }
        }

        Ok(result)
    }
}

/// In-memory hierarchy keyed by tenant
#[derive(Debug, Default)]
pub struct InMemoryHierarchyStore {
    graphs: RwLock<HashMap<String, RoleGraph>>,
}

impl InMemoryHierarchyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a whole graph for a tenant, replacing any previous one
    pub fn set_graph(&self, tenant: &str, graph: RoleGraph) {
        self.graphs.write().insert(tenant.to_string(), graph);
    }

    /// Record that `child` inherits from `parent` in `tenant`
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::CircularHierarchy`] when the edge would close a
    /// cycle and [`RbacError::InvalidInput`] for empty or self-referencing
    /// names. The graph is left unchanged on error.
    pub fn add_inheritance(&self, tenant: &str, child: &str, parent: &str) -> Result<()> {
        let mut graphs = self.graphs.write();
        let graph = graphs.entry(tenant.to_string()).or_default();

        graph.add_inheritance(child, parent).map_err(|e| match e {
            GraphError::CircularDependency(path) => RbacError::CircularHierarchy(path),
            other => RbacError::InvalidInput(other.to_string()),
        })?;

        debug!(tenant, child, parent, "added role inheritance");
        Ok(())
    }

    /// Remove an inheritance edge; returns false if it did not exist
    pub fn remove_inheritance(&self, tenant: &str, child: &str, parent: &str) -> bool {
        let mut graphs = self.graphs.write();
        let removed = graphs
            .get_mut(tenant)
            .map(|graph| graph.remove_inheritance(child, parent))
            .unwrap_or(false);

        if removed {
            debug!(tenant, child, parent, "removed role inheritance");
        }
        removed
    }

    /// Snapshot of a tenant's graph
    pub fn graph(&self, tenant: &str) -> Option<RoleGraph> {
        self.graphs.read().get(tenant).cloned()
    }
}

impl HierarchyStore for InMemoryHierarchyStore {
    fn ascendants(&self, role: &str, tenant: &str) -> Result<RoleSet> {
        Ok(self
            .graphs
            .read()
            .get(tenant)
            .map(|graph| graph.ascendants(role))
            .unwrap_or_default())
    }

    fn descendants(&self, role: &str, tenant: &str) -> Result<RoleSet> {
        Ok(self
            .graphs
            .read()
            .get(tenant)
            .map(|graph| graph.descendants(role))
            .unwrap_or_default())
    }
}
